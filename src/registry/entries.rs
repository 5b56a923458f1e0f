//! Object entry definitions
//!
//! Immutable templates referenced by index from tile elements and rides.
//! Flag sets are plain bit constants over `u32`; the loader composes them
//! when it parses object files.

use serde::{Deserialize, Serialize};

/// Gameplay category of a ride type, used by the award evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RideCategory {
    Rollercoaster,
    Gentle,
    Thrill,
    Water,
    Transport,
    Shop,
    Toilets,
}

/// Ride whose track is built piece by piece (eligible for custom designs)
pub const RIDE_ENTRY_HAS_TRACK: u32 = 1 << 0;
/// Stall or ride that sells food items
pub const RIDE_ENTRY_SELLS_FOOD: u32 = 1 << 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RideEntry {
    pub name: String,
    pub category: RideCategory,
    pub flags: u32,
    /// Item sold by shop-type rides; feeds the unique-shop award counts
    pub shop_item: Option<u8>,
}

impl RideEntry {
    pub fn has_flag(&self, flag: u32) -> bool {
        self.flags & flag != 0
    }

    pub fn has_category(&self, category: RideCategory) -> bool {
        self.category == category
    }
}

/// Plant that rain can water back to age 0
pub const SMALL_SCENERY_CAN_BE_WATERED: u32 = 1 << 0;
/// Animated scenery never ages
pub const SMALL_SCENERY_ANIMATED: u32 = 1 << 1;
/// Centred tall item; shelters anything stacked beneath it from rain
pub const SMALL_SCENERY_VOFFSET_CENTRE: u32 = 1 << 2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmallSceneryEntry {
    pub name: String,
    pub flags: u32,
    pub price: i32,
}

impl SmallSceneryEntry {
    pub fn has_flag(&self, flag: u32) -> bool {
        self.flags & flag != 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LargeSceneryEntry {
    pub name: String,
    pub price: i32,
    /// Number of tiles the piece spans
    pub tile_count: u8,
}

pub const WALL_DOOR_SOUND_MASK: u32 = 0b11 << 1;
pub const WALL_DOOR_SOUND_SHIFT: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallEntry {
    pub name: String,
    pub price: i32,
    pub flags2: u32,
}

impl WallEntry {
    /// Sound played when a vehicle passes through a door in this wall
    pub fn door_sound(&self) -> u32 {
        (self.flags2 & WALL_DOOR_SOUND_MASK) >> WALL_DOOR_SOUND_SHIFT
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerEntry {
    pub name: String,
    pub price: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathEntry {
    pub name: String,
    pub price: i32,
}

/// Path addition squirts water droplets while guests walk past
pub const PATH_ADDITION_FOUNTAIN_WATER: u32 = 1 << 0;
/// Path addition blows snowflakes
pub const PATH_ADDITION_FOUNTAIN_SNOW: u32 = 1 << 1;

/// Benches, lamps, bins and fountains placed on top of path elements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathAdditionEntry {
    pub name: String,
    pub flags: u32,
    pub draw_type: u8,
    pub price: i32,
}

impl PathAdditionEntry {
    pub fn has_flag(&self, flag: u32) -> bool {
        self.flags & flag != 0
    }
}
