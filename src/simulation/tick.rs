//! Per-tick update ordering and the event stream

use crate::agent::thoughts::ThoughtType;
use crate::agent::update::update_agent;
use crate::award::{update_awards, AwardKind};
use crate::core::config::AWARD_UPDATE_INTERVAL;
use crate::core::types::{AgentId, RideId, TileCoords};
use crate::hooks::SimHooks;
use crate::park::ParkState;
use crate::ride::RideStatus;
use crate::world::scenery::{update_scenery_tile, FountainKind, SceneryUpdateContext};

/// Bullwheel angle advanced per tick for a running lift. The paint pass
/// divides the angle by 16384 to select one of four sprite frames.
const BULLWHEEL_STEP: u16 = 4096;

/// Something observable happened during a tick. Consumers decide how to
/// present these; the simulation only records them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationEvent {
    ThoughtGenerated { agent: AgentId, kind: ThoughtType },
    FountainStarted { coords: TileCoords, kind: FountainKind },
    RideBullwheelTurned { ride: RideId },
    AwardGranted { kind: AwardKind },
    AwardExpired { kind: AwardKind },
}

/// Advance the park by one tick.
///
/// Subsystems run in a fixed order: agents, then rides, then the scenery
/// sweep, then awards on their own cadence. The order is part of the
/// deterministic contract and must not be reshuffled.
pub fn run_simulation_tick(state: &mut ParkState, hooks: &mut dyn SimHooks) -> Vec<SimulationEvent> {
    let mut events = Vec::new();
    let tick = state.current_tick;

    update_agents(state, &mut events);
    update_rides(state, &mut events);
    update_scenery(state, hooks, &mut events);

    if tick % AWARD_UPDATE_INTERVAL == 0 {
        update_awards(state, hooks, &mut events);
    }

    state.current_tick += 1;
    events
}

fn update_agents(state: &mut ParkState, events: &mut Vec<SimulationEvent>) {
    let tick = state.current_tick;
    let width = state.map.width();
    let height = state.map.height();
    let rng = &mut state.rng;
    for agent in state.agents.iter_mut() {
        update_agent(agent, rng, tick, width, height, events);
    }
}

fn update_rides(state: &mut ParkState, events: &mut Vec<SimulationEvent>) {
    for ride in state.rides.iter_mut() {
        if matches!(ride.status, RideStatus::Open | RideStatus::Testing) {
            let before = ride.bullwheel_rotation;
            ride.bullwheel_rotation = ride.bullwheel_rotation.wrapping_add(BULLWHEEL_STEP);
            // Emit once per sprite-frame boundary, not every tick.
            if before / 16384 != ride.bullwheel_rotation / 16384 {
                events.push(SimulationEvent::RideBullwheelTurned { ride: ride.id });
            }
        }
    }
}

fn update_scenery(state: &mut ParkState, hooks: &mut dyn SimHooks, events: &mut Vec<SimulationEvent>) {
    let ParkState {
        map,
        registry,
        climate,
        config,
        network_mode,
        current_tick,
        ..
    } = state;
    let ctx = SceneryUpdateContext {
        registry,
        climate,
        config,
        network_active: network_mode.is_active(),
        tick: *current_tick,
    };
    let coords: Vec<TileCoords> = map.all_coords().collect();
    for tile in coords {
        update_scenery_tile(map, &ctx, tile, hooks, events);
    }
}
