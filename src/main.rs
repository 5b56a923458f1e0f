//! Brightgate - Entry Point
//!
//! This is the main entry point for the Brightgate park simulation.
//! It builds a small demo park, runs simulation ticks, and provides a
//! basic command loop for poking at the simulation.

use brightgate::agent::StaffKind;
use brightgate::command::{execute, Command};
use brightgate::core::config::ParkConfig;
use brightgate::core::error::Result;
use brightgate::core::types::{Direction, TileCoords};
use brightgate::hooks::NullHooks;
use brightgate::park::ParkState;
use brightgate::registry::{
    PathEntry, RideCategory, RideEntry, SmallSceneryEntry, SMALL_SCENERY_CAN_BE_WATERED,
};
use brightgate::ride::track::TrackKind;
use brightgate::simulation::tick::run_simulation_tick;
use brightgate::world::{TileElement, TileElementData};

use std::io::{self, Write};

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("brightgate=debug")
        .init();

    tracing::info!("Brightgate starting...");

    let mut park = ParkState::new(ParkConfig::default(), 16, 16);
    let mut hooks = NullHooks;

    build_demo_park(&mut park, &mut hooks)?;

    // Display welcome message
    println!("\n=== BRIGHTGATE ===");
    println!("A theme park simulation core");
    println!();
    println!("Commands:");
    println!("  tick / t        - Advance simulation by one tick");
    println!("  spawn <name>    - Spawn a new guest");
    println!("  status / s      - Show detailed status");
    println!("  run <n>         - Run n simulation ticks");
    println!("  quit / q        - Exit");
    println!();

    // Main game loop
    loop {
        display_status(&park);

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input == "quit" || input == "q" {
            break;
        }

        if input == "tick" || input == "t" {
            let events = run_simulation_tick(&mut park, &mut hooks);
            println!("Tick {} complete ({} events).", park.current_tick, events.len());
            continue;
        }

        if input == "status" || input == "s" {
            display_detailed_status(&park);
            continue;
        }

        if input.starts_with("run ") {
            if let Ok(n) = input.strip_prefix("run ").unwrap().parse::<u32>() {
                println!("Running {} ticks...", n);
                let mut event_count = 0usize;
                for _ in 0..n {
                    event_count += run_simulation_tick(&mut park, &mut hooks).len();
                }
                println!(
                    "Completed {} ticks ({} events). Now at tick {}.",
                    n, event_count, park.current_tick
                );
            } else {
                println!("Usage: run <number>");
            }
            continue;
        }

        if input.starts_with("spawn ") {
            let name = input.strip_prefix("spawn ").unwrap();
            if name.is_empty() {
                println!("Usage: spawn <name>");
            } else {
                let id = park.agents.spawn_guest(name, TileCoords::new(8, 8));
                println!("Spawned {} (ID: {:?})", name, id);
            }
            continue;
        }

        println!("Unknown command: {}", input);
    }

    tracing::info!("Brightgate shutting down");
    Ok(())
}

/// Register a few entries, lay a short chairlift with a path beside it,
/// and staff the park so every subsystem has something to chew on.
fn build_demo_park(park: &mut ParkState, hooks: &mut NullHooks) -> Result<()> {
    let lift_entry = park.registry.register_ride(RideEntry {
        name: "Chairlift".into(),
        category: RideCategory::Transport,
        flags: brightgate::registry::RIDE_ENTRY_HAS_TRACK,
        shop_item: None,
    })?;
    let shrub = park.registry.register_small_scenery(SmallSceneryEntry {
        name: "Shrub".into(),
        flags: SMALL_SCENERY_CAN_BE_WATERED,
        price: 10,
    })?;
    let path = park.registry.register_path(PathEntry {
        name: "Tarmac Path".into(),
        price: 12,
    })?;

    let lift = park.rides.create("Demo Chairlift", lift_entry)?;
    let kinds = [
        TrackKind::BeginStation,
        TrackKind::MiddleStation,
        TrackKind::EndStation,
        TrackKind::Flat,
        TrackKind::FlatTo25DegUp,
        TrackKind::Up25Deg,
        TrackKind::Up25DegToFlat,
    ];
    for (i, kind) in kinds.into_iter().enumerate() {
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
        park.map.insert_element(TileCoords::new(4 + i as i32, 4), element)?;
    }
    park.rides.get_mut(lift).unwrap().start_testing()?;
    park.rides.get_mut(lift).unwrap().open()?;

    for x in 4..11 {
        execute(
            park,
            Command::PlacePath {
                position: TileCoords::new(x, 5),
                base_height: 4,
                entry: path,
                ghost: false,
            },
            hooks,
        )?;
    }
    execute(
        park,
        Command::PlaceSmallScenery {
            position: TileCoords::new(5, 6),
            base_height: 4,
            entry: shrub,
            ghost: false,
        },
        hooks,
    )?;

    for i in 0..8 {
        park.agents
            .spawn_guest(format!("Guest {}", i + 1), TileCoords::new(8, 5));
    }
    for kind in StaffKind::ALL {
        park.agents
            .spawn_staff(format!("{:?} 1", kind), kind, TileCoords::new(7, 5));
    }
    Ok(())
}

fn display_status(park: &ParkState) {
    println!(
        "\n[Tick {}] guests: {} | staff: {} | rides: {} | awards: {} | rating: {}",
        park.current_tick,
        park.guests_in_park(),
        park.agents.staff().count(),
        park.rides.count(),
        park.awards.count(),
        park.park_rating,
    );
}

fn display_detailed_status(park: &ParkState) {
    println!("\n--- Park Status ---");
    println!("Weather: {:?}", park.climate.current_weather);
    for ride in park.rides.iter() {
        println!(
            "  Ride {:?}: {} ({:?})",
            ride.id, ride.name, ride.status
        );
    }
    for agent in park.agents.iter() {
        let thought = agent
            .thoughts
            .latest()
            .map(|t| format!("{:?}", t.kind))
            .unwrap_or_else(|| "-".into());
        println!(
            "  {:?} {} at ({}, {}) thinking {}",
            agent.id, agent.name, agent.position.x, agent.position.y, thought
        );
    }
    for award in park.awards.iter() {
        println!("  Award: {:?} ({} left)", award.kind, award.remaining);
    }
}
