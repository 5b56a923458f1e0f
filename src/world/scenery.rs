//! Scenery aging
//!
//! Small scenery carries an age counter in [0, 255]. It climbs every tick
//! unless the entry is animated, and a waterable plant standing in the rain
//! with nothing stacked above it is watered back to age 0. The shelter scan
//! walks the elements above the plant in its own tile sequence; finding any
//! blocker wins over watering regardless of order.

use crate::core::config::{ParkConfig, SCENERY_MAX_AGE, SCENERY_WATERING_AGE};
use crate::core::types::{TileCoords, Tick};
use crate::hooks::{invalidate_tile_region, SimHooks};
use crate::registry::{
    EntryRegistry, PATH_ADDITION_FOUNTAIN_SNOW, PATH_ADDITION_FOUNTAIN_WATER,
    SMALL_SCENERY_ANIMATED, SMALL_SCENERY_CAN_BE_WATERED, SMALL_SCENERY_VOFFSET_CENTRE,
};
use crate::simulation::tick::SimulationEvent;
use crate::world::climate::Climate;
use crate::world::element::{ElementKind, TileElement, TileElementData};
use crate::world::map::TileMap;

/// Fountain animation started by a path addition during the tile sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FountainKind {
    Water,
    Snow,
}

/// Read-only context for one scenery sweep.
pub struct SceneryUpdateContext<'a> {
    pub registry: &'a EntryRegistry,
    pub climate: &'a Climate,
    pub config: &'a ParkConfig,
    pub network_active: bool,
    pub tick: Tick,
}

enum AgeOutcome {
    /// Sheltered or simply not waterable; the counter advances. Carries the
    /// blocker's vertical extent when a blocker above caused it.
    Increase(Option<(u8, u8)>),
    /// Rain reached the plant; age resets to 0.
    Watered,
}

/// Advance scenery state for one tile: age small scenery and trigger
/// fountains on path additions. Ghost elements never cause any interaction
/// while a network session is active, as that may lead to a desync.
pub fn update_scenery_tile(
    map: &mut TileMap,
    ctx: &SceneryUpdateContext,
    coords: TileCoords,
    hooks: &mut dyn SimHooks,
    events: &mut Vec<SimulationEvent>,
) {
    enum Action {
        Age { index: usize, outcome: AgeOutcome },
        Fountain(FountainKind),
    }

    let mut actions = Vec::new();
    for (index, element) in map
        .elements(coords, crate::world::GhostVisibility::Include)
        .enumerate()
    {
        if ctx.network_active && element.is_ghost() {
            continue;
        }

        match &element.data {
            TileElementData::SmallScenery { entry, age, .. } => {
                if let Some(outcome) = age_outcome(map, ctx, coords, index, *entry, *age) {
                    actions.push(Action::Age { index, outcome });
                }
            }
            TileElementData::Path {
                addition: Some(addition),
                ..
            } => {
                if addition.is_ghost {
                    continue;
                }
                let Some(entry) = ctx.registry.path_addition_entry(addition.entry) else {
                    continue;
                };
                if entry.has_flag(PATH_ADDITION_FOUNTAIN_WATER) {
                    actions.push(Action::Fountain(FountainKind::Water));
                } else if entry.has_flag(PATH_ADDITION_FOUNTAIN_SNOW) {
                    actions.push(Action::Fountain(FountainKind::Snow));
                }
            }
            _ => {}
        }
    }

    for action in actions {
        match action {
            Action::Age { index, outcome } => {
                apply_age_outcome(map, ctx, coords, index, outcome, hooks)
            }
            Action::Fountain(kind) => {
                events.push(SimulationEvent::FountainStarted { coords, kind });
            }
        }
    }
}

/// Decide what happens to the small scenery element at `index` this tick.
/// Returns `None` when nothing changes (unknown entry, cheat, animated).
fn age_outcome(
    map: &TileMap,
    ctx: &SceneryUpdateContext,
    coords: TileCoords,
    index: usize,
    entry_index: u8,
    age: u8,
) -> Option<AgeOutcome> {
    let entry = ctx.registry.small_scenery_entry(entry_index)?;
    let waterable = entry.has_flag(SMALL_SCENERY_CAN_BE_WATERED);

    if ctx.config.disable_plant_aging && waterable {
        return None;
    }
    if entry.has_flag(SMALL_SCENERY_ANIMATED) {
        return None;
    }

    if !waterable || !ctx.climate.is_raining() || age < SCENERY_WATERING_AGE {
        return Some(AgeOutcome::Increase(None));
    }

    // Check the elements stacked above, presumably blocking the rain. The
    // scan covers the rest of this tile's sequence only; the last-for-tile
    // terminator is the tile boundary.
    for above in map
        .elements(coords, crate::world::GhostVisibility::Include)
        .skip(index + 1)
    {
        if ctx.network_active && above.is_ghost() {
            continue;
        }
        match &above.data {
            TileElementData::LargeScenery { .. }
            | TileElementData::Entrance { .. }
            | TileElementData::Path { .. } => {
                return Some(AgeOutcome::Increase(Some((
                    above.base_height,
                    above.clearance_height,
                ))));
            }
            TileElementData::SmallScenery { entry, .. } => {
                if let Some(above_entry) = ctx.registry.small_scenery_entry(*entry) {
                    if above_entry.has_flag(SMALL_SCENERY_VOFFSET_CENTRE) {
                        return Some(AgeOutcome::Increase(None));
                    }
                }
            }
            _ => {}
        }
    }

    Some(AgeOutcome::Watered)
}

fn apply_age_outcome(
    map: &mut TileMap,
    ctx: &SceneryUpdateContext,
    coords: TileCoords,
    index: usize,
    outcome: AgeOutcome,
    hooks: &mut dyn SimHooks,
) {
    if let AgeOutcome::Increase(Some((base, clearance))) = outcome {
        invalidate_tile_region(hooks, coords, base, clearance);
    }

    let elements = map.elements_mut(coords);
    let Some(element) = elements.get_mut(index) else {
        return;
    };
    let (base, clearance) = (element.base_height, element.clearance_height);
    let TileElementData::SmallScenery {
        age, last_aged_tick, ..
    } = &mut element.data
    else {
        return;
    };

    match outcome {
        AgeOutcome::Increase(_) => {
            // Tick-scoped: a second sweep in the same tick must not
            // double-increment.
            if *last_aged_tick == ctx.tick {
                return;
            }
            *last_aged_tick = ctx.tick;
            if *age < SCENERY_MAX_AGE {
                *age += 1;
                invalidate_tile_region(hooks, coords, base, clearance);
            }
        }
        AgeOutcome::Watered => {
            *age = 0;
            *last_aged_tick = ctx.tick;
            invalidate_tile_region(hooks, coords, base, clearance);
        }
    }
}

/// Direct aging entry point for a single element, used by tests and by the
/// sweep above. Saturates at [`SCENERY_MAX_AGE`].
pub fn increase_scenery_age(element: &mut TileElement, tick: Tick) -> bool {
    let TileElementData::SmallScenery {
        age, last_aged_tick, ..
    } = &mut element.data
    else {
        return false;
    };
    if *last_aged_tick == tick {
        return false;
    }
    *last_aged_tick = tick;
    if *age < SCENERY_MAX_AGE {
        *age += 1;
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::NullHooks;
    use crate::registry::SmallSceneryEntry;
    use crate::world::climate::Weather;
    use crate::world::element::PathAddition;
    use crate::world::GhostVisibility;

    fn plant_registry() -> EntryRegistry {
        let mut registry = EntryRegistry::new();
        registry
            .register_small_scenery(SmallSceneryEntry {
                name: "Fern".into(),
                flags: SMALL_SCENERY_CAN_BE_WATERED,
                price: 10,
            })
            .unwrap();
        registry
            .register_small_scenery(SmallSceneryEntry {
                name: "Tall Statue".into(),
                flags: SMALL_SCENERY_VOFFSET_CENTRE,
                price: 10,
            })
            .unwrap();
        registry
    }

    fn plant(age: u8) -> TileElement {
        TileElement::new(
            TileElementData::SmallScenery {
                entry: 0,
                age,
                last_aged_tick: 0,
            },
            2,
            4,
        )
    }

    fn element_age(map: &TileMap, coords: TileCoords) -> u8 {
        map.elements(coords, GhostVisibility::Include)
            .find_map(|e| match e.data {
                TileElementData::SmallScenery { age, .. } => Some(age),
                _ => None,
            })
            .unwrap()
    }

    fn ctx<'a>(
        registry: &'a EntryRegistry,
        climate: &'a Climate,
        config: &'a ParkConfig,
        tick: Tick,
    ) -> SceneryUpdateContext<'a> {
        SceneryUpdateContext {
            registry,
            climate,
            config,
            network_active: false,
            tick,
        }
    }

    #[test]
    fn test_dry_weather_ages_plant() {
        let registry = plant_registry();
        let climate = Climate::default();
        let config = ParkConfig::default();
        let mut map = TileMap::new(2, 2);
        let coords = TileCoords::new(0, 0);
        map.insert_element(coords, plant(10)).unwrap();

        let mut events = Vec::new();
        update_scenery_tile(
            &mut map,
            &ctx(&registry, &climate, &config, 1),
            coords,
            &mut NullHooks,
            &mut events,
        );
        assert_eq!(element_age(&map, coords), 11);
    }

    #[test]
    fn test_rain_waters_unsheltered_plant() {
        let registry = plant_registry();
        let climate = Climate {
            current_weather: Weather::Rain,
        };
        let config = ParkConfig::default();
        let mut map = TileMap::new(2, 2);
        let coords = TileCoords::new(0, 0);
        map.insert_element(coords, plant(40)).unwrap();

        let mut events = Vec::new();
        update_scenery_tile(
            &mut map,
            &ctx(&registry, &climate, &config, 1),
            coords,
            &mut NullHooks,
            &mut events,
        );
        assert_eq!(element_age(&map, coords), 0);
    }

    #[test]
    fn test_path_above_shelters_plant() {
        let registry = plant_registry();
        let climate = Climate {
            current_weather: Weather::Rain,
        };
        let config = ParkConfig::default();
        let mut map = TileMap::new(2, 2);
        let coords = TileCoords::new(0, 0);
        map.insert_element(coords, plant(40)).unwrap();
        map.insert_element(
            coords,
            TileElement::new(
                TileElementData::Path {
                    entry: 0,
                    addition: None,
                },
                8,
                10,
            ),
        )
        .unwrap();

        let mut events = Vec::new();
        update_scenery_tile(
            &mut map,
            &ctx(&registry, &climate, &config, 1),
            coords,
            &mut NullHooks,
            &mut events,
        );
        assert_eq!(element_age(&map, coords), 41);
    }

    #[test]
    fn test_voffset_centre_scenery_shelters() {
        let registry = plant_registry();
        let climate = Climate {
            current_weather: Weather::HeavyRain,
        };
        let config = ParkConfig::default();
        let mut map = TileMap::new(2, 2);
        let coords = TileCoords::new(0, 0);
        map.insert_element(coords, plant(40)).unwrap();
        map.insert_element(
            coords,
            TileElement::new(
                TileElementData::SmallScenery {
                    entry: 1,
                    age: 0,
                    last_aged_tick: 0,
                },
                8,
                16,
            ),
        )
        .unwrap();

        let mut events = Vec::new();
        update_scenery_tile(
            &mut map,
            &ctx(&registry, &climate, &config, 1),
            coords,
            &mut NullHooks,
            &mut events,
        );
        assert_eq!(element_age(&map, coords), 41);
    }

    #[test]
    fn test_ghost_blocker_skipped_when_networked() {
        let registry = plant_registry();
        let climate = Climate {
            current_weather: Weather::Rain,
        };
        let config = ParkConfig::default();
        let mut map = TileMap::new(2, 2);
        let coords = TileCoords::new(0, 0);
        map.insert_element(coords, plant(40)).unwrap();
        map.insert_element(
            coords,
            TileElement::new(
                TileElementData::Path {
                    entry: 0,
                    addition: None,
                },
                8,
                10,
            )
            .as_ghost(),
        )
        .unwrap();

        let context = SceneryUpdateContext {
            registry: &registry,
            climate: &climate,
            config: &config,
            network_active: true,
            tick: 1,
        };
        let mut events = Vec::new();
        update_scenery_tile(&mut map, &context, coords, &mut NullHooks, &mut events);
        // The ghost path must not shelter the plant in a networked session.
        assert_eq!(element_age(&map, coords), 0);
    }

    #[test]
    fn test_aging_is_idempotent_within_a_tick() {
        let registry = plant_registry();
        let climate = Climate::default();
        let config = ParkConfig::default();
        let mut map = TileMap::new(2, 2);
        let coords = TileCoords::new(0, 0);
        map.insert_element(coords, plant(10)).unwrap();

        let context = ctx(&registry, &climate, &config, 7);
        let mut events = Vec::new();
        update_scenery_tile(&mut map, &context, coords, &mut NullHooks, &mut events);
        update_scenery_tile(&mut map, &context, coords, &mut NullHooks, &mut events);
        assert_eq!(element_age(&map, coords), 11);
    }

    #[test]
    fn test_age_saturates() {
        let mut element = plant(SCENERY_MAX_AGE);
        assert!(!increase_scenery_age(&mut element, 1));
        match element.data {
            TileElementData::SmallScenery { age, .. } => assert_eq!(age, SCENERY_MAX_AGE),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_fountain_addition_fires_event() {
        let mut registry = plant_registry();
        registry
            .register_path_addition(crate::registry::PathAdditionEntry {
                name: "Fountain".into(),
                flags: PATH_ADDITION_FOUNTAIN_WATER,
                draw_type: 0,
                price: 15,
            })
            .unwrap();
        let climate = Climate::default();
        let config = ParkConfig::default();
        let mut map = TileMap::new(2, 2);
        let coords = TileCoords::new(1, 1);
        map.insert_element(
            coords,
            TileElement::new(
                TileElementData::Path {
                    entry: 0,
                    addition: Some(PathAddition {
                        entry: 0,
                        is_ghost: false,
                    }),
                },
                2,
                4,
            ),
        )
        .unwrap();

        let mut events = Vec::new();
        update_scenery_tile(
            &mut map,
            &ctx(&registry, &climate, &config, 1),
            coords,
            &mut NullHooks,
            &mut events,
        );
        assert!(matches!(
            events.as_slice(),
            [SimulationEvent::FountainStarted {
                kind: FountainKind::Water,
                ..
            }]
        ));
    }
}
