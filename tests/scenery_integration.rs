//! Scenery aging integration tests
//!
//! Exercises the full tick path rather than the tile sweep in isolation:
//! plants placed through commands, weather changed on the live park, and
//! aging observed across many ticks.

use brightgate::command::{execute, Command};
use brightgate::core::config::{ParkConfig, SCENERY_MAX_AGE};
use brightgate::core::types::TileCoords;
use brightgate::hooks::NullHooks;
use brightgate::park::ParkState;
use brightgate::registry::{SmallSceneryEntry, SMALL_SCENERY_CAN_BE_WATERED};
use brightgate::simulation::tick::run_simulation_tick;
use brightgate::world::{ElementKind, GhostVisibility, TileElementData, Weather};

fn park_with_plant(config: ParkConfig) -> (ParkState, TileCoords) {
    let mut park = ParkState::new(config, 6, 6);
    let entry = park
        .registry
        .register_small_scenery(SmallSceneryEntry {
            name: "Fern".into(),
            flags: SMALL_SCENERY_CAN_BE_WATERED,
            price: 5,
        })
        .unwrap();
    let position = TileCoords::new(2, 2);
    let mut hooks = NullHooks;
    execute(
        &mut park,
        Command::PlaceSmallScenery {
            position,
            base_height: 4,
            entry,
            ghost: false,
        },
        &mut hooks,
    )
    .unwrap();
    (park, position)
}

fn plant_age(park: &ParkState, position: TileCoords) -> u8 {
    park.map
        .elements_of_kind(position, ElementKind::SmallScenery, GhostVisibility::Include)
        .find_map(|e| match &e.data {
            TileElementData::SmallScenery { age, .. } => Some(*age),
            _ => None,
        })
        .expect("plant missing")
}

#[test]
fn test_plant_ages_one_step_per_tick() {
    let (mut park, position) = park_with_plant(ParkConfig::default());
    let mut hooks = NullHooks;
    for _ in 0..10 {
        run_simulation_tick(&mut park, &mut hooks);
    }
    // The placement tick itself is guarded against aging, so ten ticks
    // advance the counter nine times.
    assert_eq!(plant_age(&park, position), 9);
}

#[test]
fn test_rain_waters_mature_plant_back_to_zero() {
    let (mut park, position) = park_with_plant(ParkConfig::default());
    let mut hooks = NullHooks;
    for _ in 0..10 {
        run_simulation_tick(&mut park, &mut hooks);
    }
    assert_eq!(plant_age(&park, position), 9);

    park.climate.current_weather = Weather::Rain;
    run_simulation_tick(&mut park, &mut hooks);
    assert_eq!(plant_age(&park, position), 0);
}

#[test]
fn test_young_plant_keeps_aging_in_rain() {
    // Below the watering age the rain does not reset the counter.
    let (mut park, position) = park_with_plant(ParkConfig::default());
    park.climate.current_weather = Weather::Rain;
    let mut hooks = NullHooks;
    for _ in 0..4 {
        run_simulation_tick(&mut park, &mut hooks);
    }
    assert_eq!(plant_age(&park, position), 3);
}

#[test]
fn test_age_saturates_at_max() {
    let (mut park, position) = park_with_plant(ParkConfig::default());
    let mut hooks = NullHooks;
    for _ in 0..SCENERY_MAX_AGE as usize + 50 {
        run_simulation_tick(&mut park, &mut hooks);
    }
    assert_eq!(plant_age(&park, position), SCENERY_MAX_AGE);
}

#[test]
fn test_disable_plant_aging_cheat_freezes_age() {
    let config = ParkConfig {
        disable_plant_aging: true,
        ..ParkConfig::default()
    };
    let (mut park, position) = park_with_plant(config);
    let mut hooks = NullHooks;
    for _ in 0..20 {
        run_simulation_tick(&mut park, &mut hooks);
    }
    assert_eq!(plant_age(&park, position), 0);
}
