//! Per-tick agent advancement
//!
//! Each tick: age the thought ring, accumulate needs, emit need-driven
//! thoughts and take one movement step toward the current goal. Counters
//! saturate rather than wrap; a corrupt-looking value clamps instead of
//! aborting the tick.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::agent::thoughts::{Thought, ThoughtType, Valence};
use crate::agent::{Agent, AgentKind};
use crate::core::config::{BATHROOM_THOUGHT_THRESHOLD, HUNGER_THOUGHT_THRESHOLD};
use crate::core::types::{TileCoords, Tick};
use crate::simulation::tick::SimulationEvent;

/// Needs climb on this cadence, not every tick, so a guest takes a few
/// thousand ticks to go from sated to starving.
const NEED_ACCUMULATION_MASK: u64 = 0xF;

pub fn update_agent(
    agent: &mut Agent,
    rng: &mut ChaCha8Rng,
    tick: Tick,
    map_width: i32,
    map_height: i32,
    events: &mut Vec<SimulationEvent>,
) {
    agent.thoughts.age_all();
    agent.animation_frame = agent.animation_frame.wrapping_add(1);

    if agent.outside_of_park {
        return;
    }

    if agent.is_guest() && tick & NEED_ACCUMULATION_MASK == 0 {
        accumulate_needs(agent, events);
    }

    drift_happiness(agent);
    step_toward_destination(agent, rng, map_width, map_height);
}

fn accumulate_needs(agent: &mut Agent, events: &mut Vec<SimulationEvent>) {
    agent.hunger = agent.hunger.saturating_add(1);
    agent.thirst = agent.thirst.saturating_add(1);
    agent.bathroom = agent.bathroom.saturating_add(1);
    agent.energy = agent.energy.saturating_sub(1);

    if agent.hunger >= HUNGER_THOUGHT_THRESHOLD {
        push_thought(agent, ThoughtType::Hungry, events);
    }
    if agent.bathroom >= BATHROOM_THOUGHT_THRESHOLD {
        push_thought(agent, ThoughtType::Bathroom, events);
    }
    if agent.energy == 0 {
        push_thought(agent, ThoughtType::Tired, events);
    }
}

fn push_thought(agent: &mut Agent, kind: ThoughtType, events: &mut Vec<SimulationEvent>) {
    agent.thoughts.push(Thought::new(kind));
    events.push(SimulationEvent::ThoughtGenerated {
        agent: agent.id,
        kind,
    });
}

/// Happiness drifts toward the mood of the freshest thought.
fn drift_happiness(agent: &mut Agent) {
    if let Some(thought) = agent.thoughts.latest_fresh() {
        match thought.kind.valence() {
            Valence::Positive => agent.happiness = agent.happiness.saturating_add(1),
            Valence::Negative => agent.happiness = agent.happiness.saturating_sub(1),
        }
    }
}

fn step_toward_destination(
    agent: &mut Agent,
    rng: &mut ChaCha8Rng,
    map_width: i32,
    map_height: i32,
) {
    match agent.destination {
        Some(goal) if goal == agent.position => {
            agent.destination = None;
        }
        Some(goal) => {
            // One axis-aligned step per tick, x first.
            let position = &mut agent.position;
            if position.x != goal.x {
                position.x += (goal.x - position.x).signum();
            } else {
                position.y += (goal.y - position.y).signum();
            }
        }
        None => {
            // Staff patrol continuously; guests pick a new stroll target
            // only occasionally.
            let wander_chance = match agent.kind {
                AgentKind::Staff(_) => 8,
                AgentKind::Guest => 64,
            };
            if rng.gen_range(0..wander_chance) == 0 {
                agent.destination = Some(TileCoords::new(
                    rng.gen_range(0..map_width),
                    rng.gen_range(0..map_height),
                ));
            }
        }
    }
}
