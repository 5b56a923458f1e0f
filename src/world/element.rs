//! Tile element variants
//!
//! One tile owns an ordered sequence of elements; each element is one layer
//! of content (surface, path, track, scenery, wall, entrance, banner) with a
//! base height and clearance height in vertical height units. The final
//! element of each tile carries the last-for-tile flag; traversal stops
//! there, never at the storage boundary.

use serde::{Deserialize, Serialize};

use crate::core::types::{Direction, RideId, Tick};
use crate::ride::track::TrackKind;

/// Element is a client-local preview, excluded from authoritative queries
/// while a network session is active.
pub const ELEMENT_FLAG_GHOST: u8 = 1 << 0;
/// Terminates the per-tile element sequence.
pub const ELEMENT_FLAG_LAST_FOR_TILE: u8 = 1 << 1;

/// Discriminant of a tile element, usable without matching its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Surface,
    Path,
    Track,
    SmallScenery,
    LargeScenery,
    Wall,
    Entrance,
    Banner,
}

/// Addition (bench, bin, fountain) sitting on top of a path element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathAddition {
    pub entry: u8,
    /// Ghost additions are preview-only and never trigger gameplay effects
    pub is_ghost: bool,
}

/// Per-kind payload of a tile element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileElementData {
    Surface {
        terrain: u8,
        water_height: u8,
    },
    Path {
        entry: u8,
        addition: Option<PathAddition>,
    },
    Track {
        ride: RideId,
        kind: TrackKind,
        sequence: u8,
    },
    SmallScenery {
        entry: u8,
        age: u8,
        /// Tick at which the age counter last advanced; makes aging
        /// idempotent within a single tick
        last_aged_tick: Tick,
    },
    LargeScenery {
        entry: u8,
        sequence: u8,
    },
    Wall {
        entry: u8,
    },
    Entrance {
        ride: Option<RideId>,
    },
    Banner {
        entry: u8,
    },
}

impl TileElementData {
    pub fn kind(&self) -> ElementKind {
        match self {
            TileElementData::Surface { .. } => ElementKind::Surface,
            TileElementData::Path { .. } => ElementKind::Path,
            TileElementData::Track { .. } => ElementKind::Track,
            TileElementData::SmallScenery { .. } => ElementKind::SmallScenery,
            TileElementData::LargeScenery { .. } => ElementKind::LargeScenery,
            TileElementData::Wall { .. } => ElementKind::Wall,
            TileElementData::Entrance { .. } => ElementKind::Entrance,
            TileElementData::Banner { .. } => ElementKind::Banner,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileElement {
    pub data: TileElementData,
    /// Bottom of the element's vertical extent, in height units
    pub base_height: u8,
    /// Top of the element's vertical extent, in height units
    pub clearance_height: u8,
    pub direction: Direction,
    pub flags: u8,
}

impl TileElement {
    pub fn new(data: TileElementData, base_height: u8, clearance_height: u8) -> Self {
        Self {
            data,
            base_height,
            clearance_height,
            direction: Direction::North,
            flags: 0,
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn as_ghost(mut self) -> Self {
        self.flags |= ELEMENT_FLAG_GHOST;
        self
    }

    pub fn kind(&self) -> ElementKind {
        self.data.kind()
    }

    pub fn is_ghost(&self) -> bool {
        self.flags & ELEMENT_FLAG_GHOST != 0
    }

    pub fn is_last_for_tile(&self) -> bool {
        self.flags & ELEMENT_FLAG_LAST_FOR_TILE != 0
    }

    pub(crate) fn set_last_for_tile(&mut self, last: bool) {
        if last {
            self.flags |= ELEMENT_FLAG_LAST_FOR_TILE;
        } else {
            self.flags &= !ELEMENT_FLAG_LAST_FOR_TILE;
        }
    }

    /// Ride index for track elements, `None` for everything else
    pub fn track_ride(&self) -> Option<RideId> {
        match self.data {
            TileElementData::Track { ride, .. } => Some(ride),
            _ => None,
        }
    }

    pub fn track_kind(&self) -> Option<TrackKind> {
        match self.data {
            TileElementData::Track { kind, .. } => Some(kind),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ghost_flag() {
        let element = TileElement::new(
            TileElementData::Wall { entry: 0 },
            4,
            8,
        )
        .as_ghost();
        assert!(element.is_ghost());
        assert_eq!(element.kind(), ElementKind::Wall);
    }

    #[test]
    fn test_track_accessors() {
        let element = TileElement::new(
            TileElementData::Track {
                ride: RideId(3),
                kind: TrackKind::Flat,
                sequence: 0,
            },
            10,
            14,
        );
        assert_eq!(element.track_ride(), Some(RideId(3)));
        assert_eq!(element.track_kind(), Some(TrackKind::Flat));

        let wall = TileElement::new(TileElementData::Wall { entry: 1 }, 4, 8);
        assert_eq!(wall.track_ride(), None);
    }
}
