//! Whole-simulation integration tests
//!
//! Smoke tests across subsystems: a populated park ticked for a long
//! stretch, determinism across identical seeds, and the paint pass run
//! against live world state.

use brightgate::agent::StaffKind;
use brightgate::core::config::ParkConfig;
use brightgate::core::types::{Direction, TileCoords};
use brightgate::hooks::NullHooks;
use brightgate::paint::{paint_all, PaintSession};
use brightgate::park::ParkState;
use brightgate::registry::{RideCategory, RideEntry};
use brightgate::ride::track::TrackKind;
use brightgate::simulation::tick::run_simulation_tick;
use brightgate::world::{TileElement, TileElementData};

fn populated_park(seed: u64) -> ParkState {
    let config = ParkConfig {
        seed,
        ..ParkConfig::default()
    };
    let mut park = ParkState::new(config, 10, 10);
    let entry = park
        .registry
        .register_ride(RideEntry {
            name: "Chairlift".into(),
            category: RideCategory::Transport,
            flags: brightgate::registry::RIDE_ENTRY_HAS_TRACK,
            shop_item: None,
        })
        .unwrap();
    let lift = park.rides.create("Lift", entry).unwrap();
    for (i, kind) in [
        TrackKind::BeginStation,
        TrackKind::EndStation,
        TrackKind::Flat,
    ]
    .into_iter()
    .enumerate()
    {
        let element = TileElement::new(
            TileElementData::Track {
                ride: lift,
                kind,
                sequence: 0,
            },
            4,
            8,
        )
        .with_direction(Direction::East);
        park.map
            .insert_element(TileCoords::new(3 + i as i32, 3), element)
            .unwrap();
    }
    park.rides.get_mut(lift).unwrap().start_testing().unwrap();
    park.rides.get_mut(lift).unwrap().open().unwrap();

    for i in 0..12 {
        park.agents
            .spawn_guest(format!("Guest {i}"), TileCoords::new(5, 5));
    }
    park.agents
        .spawn_staff("Handyman", StaffKind::Handyman, TileCoords::new(4, 4));
    park
}

#[test]
fn test_long_run_stays_consistent() {
    let mut park = populated_park(42);
    let mut hooks = NullHooks;
    for _ in 0..1024 {
        run_simulation_tick(&mut park, &mut hooks);
    }
    assert_eq!(park.current_tick, 1024);
    assert_eq!(park.agents.count(), 13);
    // Needs saturate instead of wrapping around to zero.
    for guest in park.agents.guests() {
        assert!(guest.hunger > 0);
    }
}

#[test]
fn test_same_seed_same_world() {
    let mut a = populated_park(7);
    let mut b = populated_park(7);
    let mut hooks = NullHooks;
    let mut events_a = Vec::new();
    let mut events_b = Vec::new();
    for _ in 0..512 {
        events_a.extend(run_simulation_tick(&mut a, &mut hooks));
        events_b.extend(run_simulation_tick(&mut b, &mut hooks));
    }
    assert_eq!(events_a, events_b);
    for (ga, gb) in a.agents.iter().zip(b.agents.iter()) {
        assert_eq!(ga.position, gb.position);
        assert_eq!(ga.happiness, gb.happiness);
    }
}

#[test]
fn test_paint_pass_covers_live_park() {
    let mut park = populated_park(3);
    let mut hooks = NullHooks;
    for _ in 0..32 {
        run_simulation_tick(&mut park, &mut hooks);
    }
    let mut session = PaintSession::new(0);
    paint_all(&mut session, &park);
    // Every tile has at least its surface plus the track and its supports.
    assert!(session.draw_calls.len() > 100);
}

#[test]
fn test_paint_pass_is_read_only() {
    let park = populated_park(9);
    let before = serde_json::to_string(&park.map).unwrap();
    let mut session = PaintSession::new(1);
    paint_all(&mut session, &park);
    let after = serde_json::to_string(&park.map).unwrap();
    assert_eq!(before, after);
}
