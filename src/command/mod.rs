//! Map-mutation commands
//!
//! All structural map changes go through [`Command`] so a networked session
//! can serialize, order, and replay them identically on every peer. Ghost
//! placements are the exception: they are client-local previews recorded in
//! [`GhostPlacement`], and tearing one down replays the matching removal
//! commands rather than mutating the map directly.

use serde::{Deserialize, Serialize};

use crate::core::error::{ParkError, Result};
use crate::core::types::{Direction, TileCoords};
use crate::hooks::{invalidate_tile_region, SimHooks};
use crate::park::ParkState;
use crate::world::{ElementKind, PathAddition, TileElement, TileElementData};

/// A small scenery ghost is outstanding.
pub const GHOST_FLAG_SMALL_SCENERY: u8 = 1 << 0;
/// A path ghost is outstanding.
pub const GHOST_FLAG_PATH: u8 = 1 << 1;
/// A wall ghost is outstanding.
pub const GHOST_FLAG_WALL: u8 = 1 << 2;
/// A large scenery ghost is outstanding.
pub const GHOST_FLAG_LARGE_SCENERY: u8 = 1 << 3;
/// A banner ghost is outstanding.
pub const GHOST_FLAG_BANNER: u8 = 1 << 4;

/// Outstanding preview placement for the active placement tool. At most one
/// ghost per kind exists at a time; the bits say which kinds are pending and
/// the stored parameters are what the removal replay needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GhostPlacement {
    pub kind_bits: u8,
    pub position: TileCoords,
    pub base_height: u8,
    /// Edge the wall ghost occupies; meaningless for the other kinds
    pub wall_direction: Direction,
}

impl GhostPlacement {
    pub fn new(position: TileCoords, base_height: u8) -> Self {
        Self {
            kind_bits: 0,
            position,
            base_height,
            wall_direction: Direction::North,
        }
    }
}

/// One serializable map mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    PlaceSmallScenery {
        position: TileCoords,
        base_height: u8,
        entry: u8,
        ghost: bool,
    },
    RemoveSmallScenery {
        position: TileCoords,
        base_height: u8,
    },
    PlacePath {
        position: TileCoords,
        base_height: u8,
        entry: u8,
        ghost: bool,
    },
    RemovePath {
        position: TileCoords,
        base_height: u8,
    },
    PlacePathAddition {
        position: TileCoords,
        base_height: u8,
        entry: u8,
        ghost: bool,
    },
    PlaceWall {
        position: TileCoords,
        base_height: u8,
        entry: u8,
        direction: Direction,
        ghost: bool,
    },
    RemoveWall {
        position: TileCoords,
        base_height: u8,
        direction: Direction,
    },
    PlaceLargeScenery {
        position: TileCoords,
        base_height: u8,
        entry: u8,
        ghost: bool,
    },
    RemoveLargeScenery {
        position: TileCoords,
        base_height: u8,
    },
    PlaceBanner {
        position: TileCoords,
        base_height: u8,
        entry: u8,
        direction: Direction,
        ghost: bool,
    },
    RemoveBanner {
        position: TileCoords,
        base_height: u8,
    },
}

/// Execute one command against the park. Placement validates the entry
/// against the registry; removal matches by kind, height, and direction.
pub fn execute(state: &mut ParkState, command: Command, hooks: &mut dyn SimHooks) -> Result<()> {
    tracing::debug!(?command, "executing map command");
    match command {
        Command::PlaceSmallScenery {
            position,
            base_height,
            entry,
            ghost,
        } => {
            if state.registry.small_scenery_entry(entry).is_none() {
                return Err(ParkError::InvalidEntry(format!(
                    "small scenery entry {entry} not registered"
                )));
            }
            let element = TileElement::new(
                TileElementData::SmallScenery {
                    entry,
                    age: 0,
                    last_aged_tick: state.current_tick,
                },
                base_height,
                base_height + 1,
            );
            place(state, position, element, ghost, GHOST_FLAG_SMALL_SCENERY, hooks)
        }
        Command::RemoveSmallScenery {
            position,
            base_height,
        } => remove(state, position, hooks, |e| {
            e.kind() == ElementKind::SmallScenery && e.base_height == base_height
        }),
        Command::PlacePath {
            position,
            base_height,
            entry,
            ghost,
        } => {
            if state.registry.path_entry(entry).is_none() {
                return Err(ParkError::InvalidEntry(format!(
                    "path entry {entry} not registered"
                )));
            }
            let element = TileElement::new(
                TileElementData::Path {
                    entry,
                    addition: None,
                },
                base_height,
                base_height + 1,
            );
            place(state, position, element, ghost, GHOST_FLAG_PATH, hooks)
        }
        Command::RemovePath {
            position,
            base_height,
        } => remove(state, position, hooks, |e| {
            e.kind() == ElementKind::Path && e.base_height == base_height
        }),
        Command::PlacePathAddition {
            position,
            base_height,
            entry,
            ghost,
        } => {
            if state.registry.path_addition_entry(entry).is_none() {
                return Err(ParkError::InvalidEntry(format!(
                    "path addition entry {entry} not registered"
                )));
            }
            let element = state
                .map
                .element_mut_of_kind(position, ElementKind::Path)
                .filter(|e| e.base_height == base_height)
                .ok_or_else(|| {
                    ParkError::CommandFailed("no path element at that height".into())
                })?;
            if let TileElementData::Path { addition, .. } = &mut element.data {
                *addition = Some(PathAddition {
                    entry,
                    is_ghost: ghost,
                });
            }
            let (base, clearance) = (element.base_height, element.clearance_height);
            invalidate_tile_region(hooks, position, base, clearance);
            Ok(())
        }
        Command::PlaceWall {
            position,
            base_height,
            entry,
            direction,
            ghost,
        } => {
            if state.registry.wall_entry(entry).is_none() {
                return Err(ParkError::InvalidEntry(format!(
                    "wall entry {entry} not registered"
                )));
            }
            let element = TileElement::new(
                TileElementData::Wall { entry },
                base_height,
                base_height + 1,
            )
            .with_direction(direction);
            place(state, position, element, ghost, GHOST_FLAG_WALL, hooks)?;
            if ghost {
                if let Some(placement) = &mut state.ghost_placement {
                    placement.wall_direction = direction;
                }
            }
            Ok(())
        }
        Command::RemoveWall {
            position,
            base_height,
            direction,
        } => remove(state, position, hooks, |e| {
            e.kind() == ElementKind::Wall
                && e.base_height == base_height
                && e.direction == direction
        }),
        Command::PlaceLargeScenery {
            position,
            base_height,
            entry,
            ghost,
        } => {
            if state.registry.large_scenery_entry(entry).is_none() {
                return Err(ParkError::InvalidEntry(format!(
                    "large scenery entry {entry} not registered"
                )));
            }
            let element = TileElement::new(
                TileElementData::LargeScenery { entry, sequence: 0 },
                base_height,
                base_height + 2,
            );
            place(state, position, element, ghost, GHOST_FLAG_LARGE_SCENERY, hooks)
        }
        Command::RemoveLargeScenery {
            position,
            base_height,
        } => remove(state, position, hooks, |e| {
            e.kind() == ElementKind::LargeScenery && e.base_height == base_height
        }),
        Command::PlaceBanner {
            position,
            base_height,
            entry,
            direction,
            ghost,
        } => {
            if state.registry.banner_entry(entry).is_none() {
                return Err(ParkError::InvalidEntry(format!(
                    "banner entry {entry} not registered"
                )));
            }
            let element = TileElement::new(
                TileElementData::Banner { entry },
                base_height,
                base_height + 2,
            )
            .with_direction(direction);
            place(state, position, element, ghost, GHOST_FLAG_BANNER, hooks)
        }
        Command::RemoveBanner {
            position,
            base_height,
        } => remove(state, position, hooks, |e| {
            e.kind() == ElementKind::Banner && e.base_height == base_height
        }),
    }
}

fn place(
    state: &mut ParkState,
    position: TileCoords,
    element: TileElement,
    ghost: bool,
    ghost_flag: u8,
    hooks: &mut dyn SimHooks,
) -> Result<()> {
    let (base, clearance) = (element.base_height, element.clearance_height);
    let element = if ghost { element.as_ghost() } else { element };
    state.map.insert_element(position, element)?;
    if ghost {
        let placement = state
            .ghost_placement
            .get_or_insert_with(|| GhostPlacement::new(position, base));
        placement.kind_bits |= ghost_flag;
        placement.position = position;
        placement.base_height = base;
    }
    invalidate_tile_region(hooks, position, base, clearance);
    Ok(())
}

fn remove(
    state: &mut ParkState,
    position: TileCoords,
    hooks: &mut dyn SimHooks,
    predicate: impl Fn(&TileElement) -> bool,
) -> Result<()> {
    let removed = state.map.remove_element(position, predicate)?;
    invalidate_tile_region(hooks, position, removed.base_height, removed.clearance_height);
    Ok(())
}

/// Tear down every outstanding ghost by replaying the matching removal
/// commands. Called when the placement tool moves or is cancelled.
pub fn remove_ghost_placement(state: &mut ParkState, hooks: &mut dyn SimHooks) -> Result<()> {
    let Some(placement) = state.ghost_placement.take() else {
        return Ok(());
    };
    let position = placement.position;
    let base_height = placement.base_height;

    if placement.kind_bits & GHOST_FLAG_SMALL_SCENERY != 0 {
        execute(
            state,
            Command::RemoveSmallScenery {
                position,
                base_height,
            },
            hooks,
        )?;
    }
    if placement.kind_bits & GHOST_FLAG_PATH != 0 {
        execute(
            state,
            Command::RemovePath {
                position,
                base_height,
            },
            hooks,
        )?;
    }
    if placement.kind_bits & GHOST_FLAG_WALL != 0 {
        execute(
            state,
            Command::RemoveWall {
                position,
                base_height,
                direction: placement.wall_direction,
            },
            hooks,
        )?;
    }
    if placement.kind_bits & GHOST_FLAG_LARGE_SCENERY != 0 {
        execute(
            state,
            Command::RemoveLargeScenery {
                position,
                base_height,
            },
            hooks,
        )?;
    }
    if placement.kind_bits & GHOST_FLAG_BANNER != 0 {
        execute(
            state,
            Command::RemoveBanner {
                position,
                base_height,
            },
            hooks,
        )?;
    }
    Ok(())
}
