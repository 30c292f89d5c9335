//! End-to-end scenarios through the `Kitchen` facade.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;

use kitchensim::color::Rgb;
use kitchensim::components::dispenser::DispenserProfile;
use kitchensim::components::skewer::{CookingProfile, Side, SkewerState};
use kitchensim::error::SimError;
use kitchensim::events::slot::MeatballAttached;
use kitchensim::kitchen::Kitchen;
use kitchensim::resources::kitchenconfig::KitchenConfig;

const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn kitchen() -> Kitchen {
    Kitchen::new(KitchenConfig::new()).unwrap()
}

fn run(kitchen: &mut Kitchen, seconds: f32, dt: f32) {
    let frames = (seconds / dt).round() as usize;
    for _ in 0..frames {
        kitchen.advance(dt).unwrap();
    }
}

#[test]
fn grill_a_skewer_turning_it_once() {
    let mut k = kitchen();
    let s = k.spawn_skewer().unwrap();
    assert_eq!(k.skewer_state(s).unwrap(), SkewerState::Raw);

    assert!(k.contact_begin(s, Side::One).unwrap());
    // a little past the target, the first side starts to overcook
    run(&mut k, 7.5, 0.1);
    let p1 = k.progress(s, Side::One).unwrap();
    assert!(p1 > 0.9 && p1 < 0.91, "{p1}");
    assert_eq!(k.skewer_state(s).unwrap(), SkewerState::Cooking);

    k.contact_end(s, Side::One).unwrap();
    k.contact_begin(s, Side::Two).unwrap();
    run(&mut k, 7.5, 0.1);
    assert_eq!(k.skewer_state(s).unwrap(), SkewerState::Cooked);

    // already done, the grill no longer matters
    assert!(!k.contact_begin(s, Side::One).unwrap());
    let p2 = k.progress(s, Side::Two).unwrap();
    run(&mut k, 30.0, 0.5);
    assert_eq!(k.skewer_state(s).unwrap(), SkewerState::Cooked);
    assert_eq!(k.progress(s, Side::Two).unwrap(), p2);
}

#[test]
fn forgotten_skewer_burns() {
    let mut k = kitchen();
    let s = k.spawn_skewer().unwrap();
    k.contact_begin(s, Side::Two).unwrap();
    run(&mut k, 24.0, 0.25);
    assert_eq!(k.skewer_state(s).unwrap(), SkewerState::Burned);
    assert_eq!(k.progress(s, Side::Two).unwrap(), 1.0);
    assert!(k.side_color(s, Side::Two).unwrap().max_channel_delta(Rgb::BLACK) < EPSILON);
    assert_eq!(k.side_color(s, Side::One).unwrap(), Rgb::RAW_MEAT);
}

#[test]
fn custom_profile_per_skewer() {
    let mut k = kitchen();
    let quick = k
        .spawn_skewer_with(CookingProfile {
            time_to_cook_side: 2.0,
            time_until_burned: 1.0,
            target_cook_progress: 0.5,
        })
        .unwrap();
    k.contact_begin(quick, Side::One).unwrap();
    run(&mut k, 2.5, 0.25);
    assert_eq!(k.skewer_state(quick).unwrap(), SkewerState::Burned);
}

#[test]
fn pour_a_cup_from_a_limited_dispenser() {
    let mut config = KitchenConfig::new();
    config.dispenser.unlimited_liquid = false;
    let mut k = Kitchen::new(config).unwrap();

    let d = k.spawn_dispenser().unwrap();
    let cup = k.spawn_receptacle(12.0, Rgb::WHITE).unwrap();
    assert!(k.proximity_enter(d, cup).unwrap());
    assert!(!k.proximity_enter(d, cup).unwrap());

    k.set_lever_angle(d, 90.0).unwrap();
    run(&mut k, 10.0, 0.25);
    assert!(approx_eq(k.fill_amount(cup).unwrap(), 10.0));
    assert_eq!(k.dispenser_amount(d).unwrap(), 0.0);

    // one more frame notices the empty tank
    k.advance(0.25).unwrap();
    assert!(!k.is_dispensing(d).unwrap());
    assert!(k.color(cup).unwrap().max_channel_delta(Rgb::CYAN) < 1e-2);

    k.refill(d).unwrap();
    assert_eq!(k.dispenser_amount(d).unwrap(), 10.0);
}

#[test]
fn pour_with_no_cup_wastes_liquid() {
    let mut k = kitchen();
    let d = k
        .spawn_dispenser_with(DispenserProfile {
            unlimited_liquid: false,
            max_liquid_amount: 5.0,
            ..Default::default()
        })
        .unwrap();
    k.set_lever_angle(d, 90.0).unwrap();
    run(&mut k, 2.0, 0.5);
    assert!(approx_eq(k.dispenser_amount(d).unwrap(), 3.0));
    assert!(k.is_dispensing(d).unwrap());
}

#[derive(Resource, Default)]
struct Attached(Vec<MeatballAttached>);

#[test]
fn meatball_sticks_after_resting_in_the_slot() {
    let mut k = kitchen();
    k.world_mut().init_resource::<Attached>();
    k.world_mut()
        .add_observer(|trigger: On<MeatballAttached>, mut seen: ResMut<Attached>| {
            seen.0.push(*trigger.event());
        });

    let s = k.spawn_skewer().unwrap();
    let m = k.spawn_meatball();
    assert!(k.slot_enter(s, m).unwrap());
    k.advance(0.05).unwrap();
    assert_eq!(k.attached_meatball(s).unwrap(), None);
    k.advance(0.06).unwrap();
    assert_eq!(k.attached_meatball(s).unwrap(), Some(m));

    let seen = &k.world().resource::<Attached>().0;
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].skewer, s);
    assert_eq!(seen[0].meatball, m);

    // an attached meatball can't be offered again
    assert!(!k.slot_enter(s, m).unwrap());
}

#[test]
fn second_meatball_is_rejected() {
    let mut k = kitchen();
    let s = k.spawn_skewer().unwrap();
    let first = k.spawn_meatball();
    let second = k.spawn_meatball();

    k.slot_enter(s, first).unwrap();
    run(&mut k, 0.2, 0.05);
    k.slot_enter(s, second).unwrap();
    run(&mut k, 0.2, 0.05);

    assert_eq!(k.attached_meatball(s).unwrap(), Some(first));
}

#[test]
fn pulling_the_meatball_out_early_cancels() {
    let mut k = kitchen();
    let s = k.spawn_skewer().unwrap();
    let m = k.spawn_meatball();
    k.slot_enter(s, m).unwrap();
    k.advance(0.05).unwrap();
    k.slot_exit(s).unwrap();
    run(&mut k, 1.0, 0.05);
    assert_eq!(k.attached_meatball(s).unwrap(), None);
}

#[test]
fn contract_violations_are_errors() {
    let mut k = kitchen();
    let s = k.spawn_skewer().unwrap();
    let d = k.spawn_dispenser().unwrap();
    let cup = k.spawn_receptacle(1.0, Rgb::WHITE).unwrap();

    assert_eq!(k.advance(-0.1), Err(SimError::InvalidDelta(-0.1)));
    assert_eq!(k.time().frame_count, 0);
    assert!(matches!(k.advance(f32::NAN), Err(SimError::InvalidDelta(_))));

    assert_eq!(k.contact_begin(d, Side::One), Err(SimError::UnknownSkewer(d)));
    assert_eq!(k.progress(cup, Side::One), Err(SimError::UnknownSkewer(cup)));
    assert_eq!(k.proximity_enter(d, s), Err(SimError::UnknownReceptacle(s)));
    assert_eq!(k.proximity_enter(s, cup), Err(SimError::UnknownDispenser(s)));
    assert_eq!(k.fill_amount(d), Err(SimError::UnknownReceptacle(d)));
    assert_eq!(k.slot_enter(s, cup), Err(SimError::UnknownMeatball(cup)));
    assert!(matches!(
        k.set_lever_angle(d, f32::INFINITY),
        Err(SimError::InvalidInput {
            field: "lever_angle",
            ..
        })
    ));
    assert!(matches!(
        k.set_time_scale(-1.0),
        Err(SimError::InvalidInput {
            field: "time_scale",
            ..
        })
    ));

    k.world_mut().despawn(s);
    assert_eq!(k.skewer_state(s), Err(SimError::UnknownSkewer(s)));
}

#[test]
fn exit_of_despawned_receptacle_still_cleans_up() {
    let mut k = kitchen();
    let d = k.spawn_dispenser().unwrap();
    let cup = k.spawn_receptacle(1.0, Rgb::WHITE).unwrap();
    k.proximity_enter(d, cup).unwrap();
    k.world_mut().despawn(cup);

    assert_eq!(k.proximity_exit(d, cup), Ok(true));
    assert_eq!(k.proximity_exit(d, cup), Err(SimError::UnknownReceptacle(cup)));
}

#[test]
fn invalid_config_is_rejected() {
    let mut config = KitchenConfig::new();
    config.cooking.time_until_burned = 0.0;
    assert!(matches!(
        Kitchen::new(config),
        Err(SimError::InvalidProfile {
            field: "time_until_burned",
            ..
        })
    ));
}

#[test]
fn snapshot_lists_everything() {
    let mut k = kitchen();
    let s = k.spawn_skewer().unwrap();
    let d = k.spawn_dispenser().unwrap();
    let cup = k.spawn_receptacle(5.0, Rgb::WHITE).unwrap();
    k.proximity_enter(d, cup).unwrap();
    k.contact_begin(s, Side::One).unwrap();
    k.set_lever_angle(d, 90.0).unwrap();
    k.advance(1.0).unwrap();

    let snap = k.snapshot();
    assert!(approx_eq(snap.elapsed, 1.0));
    assert_eq!(snap.skewers.len(), 1);
    assert_eq!(snap.skewers[0].state, SkewerState::Cooking);
    assert!(approx_eq(snap.skewers[0].side1, 0.125));
    assert_eq!(snap.dispensers[0].targets, vec![cup.to_bits()]);
    assert!(snap.dispensers[0].dispensing);
    assert!(approx_eq(snap.receptacles[0].fill_amount, 1.0));

    let json = serde_json::to_value(&snap).unwrap();
    assert_eq!(json["skewers"][0]["state"], "Cooking");
    assert_eq!(json["receptacles"][0]["capacity"], 5.0);
}
