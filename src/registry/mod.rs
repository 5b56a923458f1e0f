//! Object entry registry
//!
//! Flat fixed-capacity arrays mapping small integer indices to loaded object
//! definitions. The object loader populates these before the first tick;
//! every lookup is bounds-checked against the live count and returns `None`
//! for out-of-range indices rather than trapping.

pub mod entries;

pub use entries::{
    BannerEntry, LargeSceneryEntry, PathAdditionEntry, PathEntry, RideCategory, RideEntry,
    SmallSceneryEntry, WallEntry, PATH_ADDITION_FOUNTAIN_SNOW, PATH_ADDITION_FOUNTAIN_WATER,
    RIDE_ENTRY_HAS_TRACK, RIDE_ENTRY_SELLS_FOOD, SMALL_SCENERY_ANIMATED,
    SMALL_SCENERY_CAN_BE_WATERED, SMALL_SCENERY_VOFFSET_CENTRE, WALL_DOOR_SOUND_MASK,
    WALL_DOOR_SOUND_SHIFT,
};

use ahash::AHashMap;

use crate::core::error::{ParkError, Result};

/// Object definition categories, each with its own fixed-capacity table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Ride,
    SmallScenery,
    LargeScenery,
    Wall,
    Banner,
    Path,
    PathAddition,
}

impl ObjectType {
    /// Hard capacity of the backing array for this object type.
    pub fn capacity(&self) -> usize {
        match self {
            ObjectType::Ride => 128,
            ObjectType::SmallScenery => 252,
            ObjectType::LargeScenery => 128,
            ObjectType::Wall => 128,
            ObjectType::Banner => 32,
            ObjectType::Path => 16,
            ObjectType::PathAddition => 15,
        }
    }
}

/// All loaded object definitions for a session.
///
/// Indices handed out by `register_*` stay stable for the session lifetime;
/// tile elements and rides store them as raw `u8`.
#[derive(Debug, Default)]
pub struct EntryRegistry {
    rides: Vec<RideEntry>,
    small_scenery: Vec<SmallSceneryEntry>,
    large_scenery: Vec<LargeSceneryEntry>,
    walls: Vec<WallEntry>,
    banners: Vec<BannerEntry>,
    paths: Vec<PathEntry>,
    path_additions: Vec<PathAdditionEntry>,
    /// Object name to (type, index); names are unique across all tables
    name_index: AHashMap<String, (ObjectType, u8)>,
}

impl EntryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries for an object type.
    pub fn entry_count(&self, object_type: ObjectType) -> usize {
        match object_type {
            ObjectType::Ride => self.rides.len(),
            ObjectType::SmallScenery => self.small_scenery.len(),
            ObjectType::LargeScenery => self.large_scenery.len(),
            ObjectType::Wall => self.walls.len(),
            ObjectType::Banner => self.banners.len(),
            ObjectType::Path => self.paths.len(),
            ObjectType::PathAddition => self.path_additions.len(),
        }
    }

    fn check_capacity(&self, object_type: ObjectType, name: &'static str) -> Result<u8> {
        let count = self.entry_count(object_type);
        if count >= object_type.capacity() {
            return Err(ParkError::RegistryFull(name));
        }
        Ok(count as u8)
    }

    pub fn register_ride(&mut self, entry: RideEntry) -> Result<u8> {
        let index = self.check_capacity(ObjectType::Ride, "ride")?;
        self.name_index
            .insert(entry.name.clone(), (ObjectType::Ride, index));
        self.rides.push(entry);
        Ok(index)
    }

    pub fn register_small_scenery(&mut self, entry: SmallSceneryEntry) -> Result<u8> {
        let index = self.check_capacity(ObjectType::SmallScenery, "small scenery")?;
        self.name_index
            .insert(entry.name.clone(), (ObjectType::SmallScenery, index));
        self.small_scenery.push(entry);
        Ok(index)
    }

    pub fn register_large_scenery(&mut self, entry: LargeSceneryEntry) -> Result<u8> {
        let index = self.check_capacity(ObjectType::LargeScenery, "large scenery")?;
        self.name_index
            .insert(entry.name.clone(), (ObjectType::LargeScenery, index));
        self.large_scenery.push(entry);
        Ok(index)
    }

    pub fn register_wall(&mut self, entry: WallEntry) -> Result<u8> {
        let index = self.check_capacity(ObjectType::Wall, "wall")?;
        self.name_index
            .insert(entry.name.clone(), (ObjectType::Wall, index));
        self.walls.push(entry);
        Ok(index)
    }

    pub fn register_banner(&mut self, entry: BannerEntry) -> Result<u8> {
        let index = self.check_capacity(ObjectType::Banner, "banner")?;
        self.name_index
            .insert(entry.name.clone(), (ObjectType::Banner, index));
        self.banners.push(entry);
        Ok(index)
    }

    pub fn register_path(&mut self, entry: PathEntry) -> Result<u8> {
        let index = self.check_capacity(ObjectType::Path, "path")?;
        self.name_index
            .insert(entry.name.clone(), (ObjectType::Path, index));
        self.paths.push(entry);
        Ok(index)
    }

    /// Path additions validate their price on load; a free or negative price
    /// is accepted but flagged, matching the original loader's behavior.
    pub fn register_path_addition(&mut self, entry: PathAdditionEntry) -> Result<u8> {
        let index = self.check_capacity(ObjectType::PathAddition, "path addition")?;
        if entry.price <= 0 {
            tracing::warn!(
                "Path addition '{}' has non-positive price {}",
                entry.name,
                entry.price
            );
        }
        self.name_index
            .insert(entry.name.clone(), (ObjectType::PathAddition, index));
        self.path_additions.push(entry);
        Ok(index)
    }

    pub fn ride_entry(&self, index: u8) -> Option<&RideEntry> {
        self.rides.get(index as usize)
    }

    pub fn small_scenery_entry(&self, index: u8) -> Option<&SmallSceneryEntry> {
        self.small_scenery.get(index as usize)
    }

    pub fn large_scenery_entry(&self, index: u8) -> Option<&LargeSceneryEntry> {
        self.large_scenery.get(index as usize)
    }

    pub fn wall_entry(&self, index: u8) -> Option<&WallEntry> {
        self.walls.get(index as usize)
    }

    pub fn banner_entry(&self, index: u8) -> Option<&BannerEntry> {
        self.banners.get(index as usize)
    }

    pub fn path_entry(&self, index: u8) -> Option<&PathEntry> {
        self.paths.get(index as usize)
    }

    pub fn path_addition_entry(&self, index: u8) -> Option<&PathAdditionEntry> {
        self.path_additions.get(index as usize)
    }

    /// Look an object up by its load name.
    pub fn find_by_name(&self, name: &str) -> Option<(ObjectType, u8)> {
        self.name_index.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_out_of_range_is_absent() {
        let registry = EntryRegistry::new();
        assert!(registry.ride_entry(0).is_none());
        assert!(registry.small_scenery_entry(200).is_none());
        assert!(registry.wall_entry(255).is_none());
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = EntryRegistry::new();
        let index = registry
            .register_small_scenery(SmallSceneryEntry {
                name: "Shrub".into(),
                flags: SMALL_SCENERY_CAN_BE_WATERED,
                price: 10,
            })
            .unwrap();
        assert_eq!(index, 0);
        assert_eq!(registry.entry_count(ObjectType::SmallScenery), 1);
        assert_eq!(registry.small_scenery_entry(0).unwrap().name, "Shrub");
        assert!(registry.small_scenery_entry(1).is_none());
    }

    #[test]
    fn test_registry_full() {
        let mut registry = EntryRegistry::new();
        for i in 0..ObjectType::Banner.capacity() {
            registry
                .register_banner(BannerEntry {
                    name: format!("Banner {i}"),
                    price: 10,
                })
                .unwrap();
        }
        let result = registry.register_banner(BannerEntry {
            name: "One too many".into(),
            price: 10,
        });
        assert!(matches!(result, Err(ParkError::RegistryFull(_))));
    }

    #[test]
    fn test_find_by_name() {
        let mut registry = EntryRegistry::new();
        let index = registry
            .register_wall(WallEntry {
                name: "Brick Wall".into(),
                price: 15,
                flags2: 0,
            })
            .unwrap();
        assert_eq!(
            registry.find_by_name("Brick Wall"),
            Some((ObjectType::Wall, index))
        );
        assert!(registry.find_by_name("Hedge").is_none());
    }
}
