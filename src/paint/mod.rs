//! Render pass
//!
//! Walks each tile's element sequence and dispatches to per-kind painters,
//! accumulating draw calls in a [`PaintSession`]. The pass is read-only
//! over world state; all mutation stays inside the session.

pub mod chairlift;
pub mod session;
pub mod supports;

pub use session::{DrawCall, PaintSession, Segment, SEGMENTS_ALL, SUPPORT_HEIGHT_UNSET};

use crate::core::config::COORDS_Z_STEP;
use crate::core::types::TileCoords;
use crate::paint::chairlift::{track_paint_function, PaintContext};
use crate::park::ParkState;
use crate::world::{ElementKind, TileElement, TileElementData};

pub const SPR_TERRAIN_BASE: u32 = 2000;
pub const SPR_PATH_BASE: u32 = 2200;
pub const SPR_PATH_ADDITION_BASE: u32 = 2300;
pub const SPR_SMALL_SCENERY_BASE: u32 = 2400;
pub const SPR_SMALL_SCENERY_WITHERED: u32 = 2401;
pub const SPR_LARGE_SCENERY_BASE: u32 = 2700;
pub const SPR_WALL_BASE: u32 = 2800;
pub const SPR_ENTRANCE_BASE: u32 = 2900;
pub const SPR_BANNER_BASE: u32 = 2950;

/// Age at which a waterable plant switches to its withered sprite.
const SCENERY_WITHERED_AGE: u8 = 40;

fn element_z(element: &TileElement) -> u16 {
    element.base_height as u16 * COORDS_Z_STEP as u16
}

/// Paint every element on one tile. Ghost filtering is the caller's
/// choice; a client previewing a placement paints its own ghosts, a
/// server-authoritative repaint excludes them.
pub fn paint_tile(
    session: &mut PaintSession,
    state: &ParkState,
    coords: TileCoords,
) {
    session.next_tile();
    let ghosts = state.gameplay_ghosts();
    for element in state.map.elements(coords, crate::world::GhostVisibility::Include) {
        let z = element_z(element) as i32;
        match &element.data {
            TileElementData::Surface { terrain, .. } => {
                session.push_sprite(
                    SPR_TERRAIN_BASE + *terrain as u32,
                    (0, 0, z),
                    (32, 32, 1),
                    (0, 0, z),
                );
            }
            TileElementData::Path { entry, addition } => {
                session.push_sprite(
                    SPR_PATH_BASE + *entry as u32,
                    (0, 0, z),
                    (32, 32, 1),
                    (0, 0, z),
                );
                if let Some(addition) = addition {
                    session.push_child_sprite(
                        SPR_PATH_ADDITION_BASE + addition.entry as u32,
                        (16, 16, z + 2),
                        (2, 2, 8),
                        (16, 16, z + 2),
                    );
                }
            }
            TileElementData::Track { ride, kind, sequence } => {
                let Some(ride) = state.rides.get(*ride) else {
                    tracing::warn!(ride = ?ride, "track element references missing ride");
                    continue;
                };
                let Some(paint) = track_paint_function(*kind) else {
                    continue;
                };
                let ctx = PaintContext {
                    map: &state.map,
                    ride,
                    position: coords,
                    ghosts,
                };
                paint(
                    session,
                    &ctx,
                    *sequence,
                    element.direction,
                    element_z(element),
                    element,
                );
            }
            TileElementData::SmallScenery { entry, age, .. } => {
                let withered = state
                    .registry
                    .small_scenery_entry(*entry)
                    .map(|e| {
                        e.has_flag(crate::registry::SMALL_SCENERY_CAN_BE_WATERED)
                            && *age >= SCENERY_WITHERED_AGE
                    })
                    .unwrap_or(false);
                let sprite = if withered {
                    SPR_SMALL_SCENERY_WITHERED
                } else {
                    SPR_SMALL_SCENERY_BASE
                };
                session.push_sprite(
                    sprite + 2 * *entry as u32,
                    (8, 8, z),
                    (16, 16, 16),
                    (8, 8, z),
                );
            }
            TileElementData::LargeScenery { entry, sequence } => {
                session.push_sprite(
                    SPR_LARGE_SCENERY_BASE + *entry as u32 + *sequence as u32,
                    (0, 0, z),
                    (32, 32, 24),
                    (0, 0, z),
                );
            }
            TileElementData::Wall { entry } => {
                session.push_sprite(
                    SPR_WALL_BASE + *entry as u32,
                    (0, 0, z),
                    (32, 1, 16),
                    (0, 0, z),
                );
            }
            TileElementData::Entrance { .. } => {
                session.push_sprite(
                    SPR_ENTRANCE_BASE + element.direction as u32,
                    (0, 0, z),
                    (32, 32, 24),
                    (0, 0, z),
                );
            }
            TileElementData::Banner { entry } => {
                session.push_sprite(
                    SPR_BANNER_BASE + *entry as u32,
                    (16, 16, z),
                    (1, 1, 24),
                    (16, 16, z),
                );
            }
        }

        if element.kind() != ElementKind::Track {
            session.set_general_support_height(
                element.clearance_height as u16 * COORDS_Z_STEP as u16,
            );
        }
    }
}

/// Paint the whole map in row-major order. Mostly useful for tests and
/// headless clients; an interactive client paints only the visible tiles.
pub fn paint_all(session: &mut PaintSession, state: &ParkState) {
    for coords in state.map.all_coords() {
        paint_tile(session, state, coords);
    }
}
