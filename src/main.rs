//! Headless kitchen runner.
//!
//! Loads `kitchen.ini` (or the file given with `--config`), builds a
//! [`Kitchen`], and plays a scripted scene frame by frame:
//!
//! - **grill**: a skewer is turned on the grill, each side cooked in turn
//! - **pour**: a cup sits under a dispenser while the lever is pulled
//!
//! Progress is logged as it happens; a summary (or a JSON snapshot with
//! `--json`) is printed at the end.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run -- --scenario all --seconds 20
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use kitchensim::color::Rgb;
use kitchensim::components::skewer::{Side, SkewerState};
use kitchensim::error::{SimError, check_delta};
use kitchensim::kitchen::Kitchen;
use kitchensim::resources::kitchenconfig::KitchenConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Scenario {
    Grill,
    Pour,
    All,
}

/// Kitchen simulation runner
#[derive(Parser)]
#[command(version, about = "Runs the grill and liquid pouring simulation headless.")]
struct Cli {
    /// INI configuration file. Defaults are used when it is missing.
    #[arg(long, value_name = "PATH", default_value = "./kitchen.ini")]
    config: PathBuf,

    /// Which scene to play.
    #[arg(long, value_enum, default_value_t = Scenario::All)]
    scenario: Scenario,

    /// Frame delta in seconds.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Simulated seconds to run.
    #[arg(long, default_value_t = 20.0)]
    seconds: f32,

    /// Print the final snapshot as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Number of `dt` frames needed to cover `seconds`.
///
/// `dt` must be a valid, non-zero time step and `seconds` finite and
/// non-negative.
fn frames_for(seconds: f32, dt: f32) -> Result<u64, SimError> {
    let dt = check_delta(dt)?;
    if dt == 0.0 {
        return Err(SimError::InvalidDelta(dt));
    }
    if !(seconds.is_finite() && seconds >= 0.0) {
        return Err(SimError::InvalidInput {
            field: "seconds",
            reason: format!("{seconds} must be finite and non-negative"),
        });
    }
    let frames = (seconds / dt).ceil();
    if !frames.is_finite() {
        return Err(SimError::InvalidInput {
            field: "dt",
            reason: format!("{dt} is too small to cover {seconds}s"),
        });
    }
    Ok(frames as u64)
}

fn run(cli: &Cli) -> Result<(), SimError> {
    let frames = frames_for(cli.seconds, cli.dt)?;

    let mut config = KitchenConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        log::warn!("Using default config: {e}");
    }

    let mut kitchen = Kitchen::new(config)?;
    let grill = matches!(cli.scenario, Scenario::Grill | Scenario::All);
    let pour = matches!(cli.scenario, Scenario::Pour | Scenario::All);

    let skewer = if grill {
        let skewer = kitchen.spawn_skewer()?;
        let meatball = kitchen.spawn_meatball();
        kitchen.slot_enter(skewer, meatball)?;
        kitchen.contact_begin(skewer, Side::One)?;
        Some(skewer)
    } else {
        None
    };

    let pour_setup = if pour {
        let dispenser = kitchen.spawn_dispenser()?;
        let cup = kitchen.spawn_receptacle(10.0, Rgb::WHITE)?;
        kitchen.proximity_enter(dispenser, cup)?;
        Some((dispenser, cup))
    } else {
        None
    };

    let to_target = kitchen.config().cooking.time_to_target();
    let mut flipped = false;

    for _ in 0..frames {
        let now = kitchen.time().elapsed;

        if let Some(skewer) = skewer {
            // turn the skewer once the first side is done
            if !flipped && now >= to_target {
                kitchen.contact_end(skewer, Side::One)?;
                kitchen.contact_begin(skewer, Side::Two)?;
                flipped = true;
            }
        }

        if let Some((dispenser, cup)) = pour_setup {
            // pull the lever for the first half, then release
            let angle = if now < cli.seconds * 0.5 { 60.0 } else { 0.0 };
            kitchen.set_lever_angle(dispenser, angle)?;
            if kitchen.fill_amount(cup)? >= 8.0 {
                kitchen.proximity_exit(dispenser, cup)?;
            }
        }

        kitchen.advance(cli.dt)?;

        if let Some(skewer) = skewer
            && kitchen.skewer_state(skewer)?.is_terminal()
            && pour_setup.is_none()
        {
            break;
        }
    }

    if cli.json {
        let snapshot = kitchen.snapshot();
        match serde_json::to_string_pretty(&snapshot) {
            Ok(text) => println!("{text}"),
            Err(e) => return Err(SimError::Config(format!("failed to encode snapshot: {e}"))),
        }
        return Ok(());
    }

    if let Some(skewer) = skewer {
        let state = kitchen.skewer_state(skewer)?;
        println!(
            "Skewer: {:?} (side 1 {:.1}%, side 2 {:.1}%, meatball {})",
            state,
            kitchen.progress(skewer, Side::One)? * 100.0,
            kitchen.progress(skewer, Side::Two)? * 100.0,
            if kitchen.attached_meatball(skewer)?.is_some() {
                "attached"
            } else {
                "missing"
            }
        );
        if state == SkewerState::Burned {
            println!("Too late, it's charcoal.");
        }
    }
    if let Some((dispenser, cup)) = pour_setup {
        let c = kitchen.color(cup)?;
        println!(
            "Cup: {:.2} units, colour ({:.2}, {:.2}, {:.2}); dispenser left {:.2}",
            kitchen.fill_amount(cup)?,
            c.r,
            c.g,
            c.b,
            kitchen.dispenser_amount(dispenser)?
        );
    }
    Ok(())
}
