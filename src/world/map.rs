//! Tile grid storage and queries
//!
//! Each tile owns a contiguous element sequence terminated by the
//! last-for-tile flag. Sequences always hold at least the surface element.
//! Ghost handling is a query parameter here instead of per-call-site checks
//! so that no gameplay path can forget to skip them in a networked session.

use serde::{Deserialize, Serialize};

use crate::core::error::{ParkError, Result};
use crate::core::types::{RideId, TileCoords};
use crate::world::element::{ElementKind, TileElement, TileElementData};

/// Whether a query sees ghost elements.
///
/// Gameplay systems must use [`GhostVisibility::Exclude`] whenever a network
/// session is active; rendering may include ghosts for local preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GhostVisibility {
    Include,
    Exclude,
}

impl GhostVisibility {
    /// Policy for authoritative gameplay queries given the session's
    /// network state. Offline sessions may interact with their own ghosts;
    /// networked ones never can, or the participants desync.
    pub fn for_gameplay(network_active: bool) -> Self {
        if network_active {
            GhostVisibility::Exclude
        } else {
            GhostVisibility::Include
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileMap {
    width: i32,
    height: i32,
    tiles: Vec<Vec<TileElement>>,
}

impl TileMap {
    /// Create a map where every tile starts with a flat surface element.
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "map dimensions must be positive");
        let mut surface = TileElement::new(
            TileElementData::Surface {
                terrain: 0,
                water_height: 0,
            },
            1,
            1,
        );
        surface.set_last_for_tile(true);
        Self {
            width,
            height,
            tiles: vec![vec![surface]; (width * height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn contains(&self, coords: TileCoords) -> bool {
        coords.x >= 0 && coords.x < self.width && coords.y >= 0 && coords.y < self.height
    }

    fn tile_index(&self, coords: TileCoords) -> Option<usize> {
        if self.contains(coords) {
            Some((coords.y * self.width + coords.x) as usize)
        } else {
            None
        }
    }

    /// First element of the tile's sequence, or `None` off-map.
    pub fn first_element(&self, coords: TileCoords) -> Option<&TileElement> {
        let index = self.tile_index(coords)?;
        self.tiles[index].first()
    }

    /// Iterate a tile's element sequence up to and including the element
    /// marked last-for-tile. A sequence missing its terminator is a
    /// corrupted map and panics rather than reading on.
    pub fn elements(
        &self,
        coords: TileCoords,
        ghosts: GhostVisibility,
    ) -> impl Iterator<Item = &TileElement> {
        let slice: &[TileElement] = match self.tile_index(coords) {
            Some(index) => &self.tiles[index],
            None => &[],
        };
        ElementIter { slice, pos: 0, done: slice.is_empty() }
            .filter(move |e| ghosts == GhostVisibility::Include || !e.is_ghost())
    }

    /// Elements of one kind on a tile.
    pub fn elements_of_kind(
        &self,
        coords: TileCoords,
        kind: ElementKind,
        ghosts: GhostVisibility,
    ) -> impl Iterator<Item = &TileElement> {
        self.elements(coords, ghosts)
            .filter(move |e| e.kind() == kind)
    }

    /// Mutable sequence access for systems that update elements in place
    /// (scenery aging). The LAST flag layout must not be altered through
    /// this; use `insert_element`/`remove_element` for structural changes.
    pub(crate) fn elements_mut(&mut self, coords: TileCoords) -> &mut [TileElement] {
        match self.tile_index(coords) {
            Some(index) => &mut self.tiles[index],
            None => &mut [],
        }
    }

    /// Append an element to a tile's sequence, taking over the
    /// last-for-tile flag from the previous terminator.
    pub fn insert_element(&mut self, coords: TileCoords, mut element: TileElement) -> Result<()> {
        let index = self
            .tile_index(coords)
            .ok_or(ParkError::TileOutOfBounds(coords))?;
        let tile = &mut self.tiles[index];
        if let Some(last) = tile.last_mut() {
            last.set_last_for_tile(false);
        }
        element.set_last_for_tile(true);
        tile.push(element);
        Ok(())
    }

    /// Remove the first element matching `predicate`. The surface element
    /// is never removed; a tile always keeps at least one element.
    pub fn remove_element(
        &mut self,
        coords: TileCoords,
        predicate: impl Fn(&TileElement) -> bool,
    ) -> Result<TileElement> {
        let index = self
            .tile_index(coords)
            .ok_or(ParkError::TileOutOfBounds(coords))?;
        let tile = &mut self.tiles[index];
        let position = tile
            .iter()
            .position(|e| e.kind() != ElementKind::Surface && predicate(e))
            .ok_or_else(|| ParkError::CommandFailed("no matching element on tile".into()))?;
        let removed = tile.remove(position);
        if let Some(last) = tile.last_mut() {
            last.set_last_for_tile(true);
        }
        Ok(removed)
    }

    pub fn element_mut_of_kind(
        &mut self,
        coords: TileCoords,
        kind: ElementKind,
    ) -> Option<&mut TileElement> {
        let index = self.tile_index(coords)?;
        self.tiles[index].iter_mut().find(|e| e.kind() == kind)
    }

    /// Find a track element of `ride` at `z` or one height unit below,
    /// used by station painters to probe the neighbouring tile.
    pub fn track_element_at_from_ride_fuzzy(
        &self,
        coords: TileCoords,
        z: u8,
        ride: RideId,
        ghosts: GhostVisibility,
    ) -> Option<&TileElement> {
        self.elements(coords, ghosts).find(|e| {
            e.track_ride() == Some(ride)
                && (e.base_height == z || e.base_height == z.wrapping_sub(1))
        })
    }

    /// Every tile coordinate, row-major. The scenery sweep and the paint
    /// pass both walk tiles in this order.
    pub fn all_coords(&self) -> impl Iterator<Item = TileCoords> + '_ {
        let width = self.width;
        (0..self.width * self.height).map(move |i| TileCoords::new(i % width, i / width))
    }
}

struct ElementIter<'a> {
    slice: &'a [TileElement],
    pos: usize,
    done: bool,
}

impl<'a> Iterator for ElementIter<'a> {
    type Item = &'a TileElement;

    fn next(&mut self) -> Option<&'a TileElement> {
        if self.done {
            return None;
        }
        // Running past the storage without seeing the terminator means the
        // map is corrupted; that is a programming error, not a game state.
        let element = self
            .slice
            .get(self.pos)
            .expect("tile element sequence missing last-for-tile terminator");
        self.pos += 1;
        if element.is_last_for_tile() {
            self.done = true;
        }
        Some(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::element::TileElementData;

    fn wall(base: u8) -> TileElement {
        TileElement::new(TileElementData::Wall { entry: 0 }, base, base + 4)
    }

    #[test]
    fn test_new_tile_has_surface_terminator() {
        let map = TileMap::new(4, 4);
        let coords = TileCoords::new(2, 1);
        let elements: Vec<_> = map.elements(coords, GhostVisibility::Include).collect();
        assert_eq!(elements.len(), 1);
        assert!(elements[0].is_last_for_tile());
        assert_eq!(elements[0].kind(), ElementKind::Surface);
    }

    #[test]
    fn test_insert_moves_last_flag() {
        let mut map = TileMap::new(4, 4);
        let coords = TileCoords::new(0, 0);
        map.insert_element(coords, wall(4)).unwrap();
        map.insert_element(coords, wall(8)).unwrap();

        let elements: Vec<_> = map.elements(coords, GhostVisibility::Include).collect();
        assert_eq!(elements.len(), 3);
        assert!(!elements[0].is_last_for_tile());
        assert!(!elements[1].is_last_for_tile());
        assert!(elements[2].is_last_for_tile());
    }

    #[test]
    fn test_remove_restores_terminator() {
        let mut map = TileMap::new(4, 4);
        let coords = TileCoords::new(0, 0);
        map.insert_element(coords, wall(4)).unwrap();
        map.insert_element(coords, wall(8)).unwrap();

        map.remove_element(coords, |e| e.base_height == 8).unwrap();
        let elements: Vec<_> = map.elements(coords, GhostVisibility::Include).collect();
        assert_eq!(elements.len(), 2);
        assert!(elements.last().unwrap().is_last_for_tile());
    }

    #[test]
    fn test_ghosts_excluded_from_gameplay_queries() {
        let mut map = TileMap::new(4, 4);
        let coords = TileCoords::new(1, 1);
        map.insert_element(coords, wall(4).as_ghost()).unwrap();

        let visible = map
            .elements_of_kind(coords, ElementKind::Wall, GhostVisibility::Exclude)
            .count();
        assert_eq!(visible, 0);

        let with_ghosts = map
            .elements_of_kind(coords, ElementKind::Wall, GhostVisibility::Include)
            .count();
        assert_eq!(with_ghosts, 1);
    }

    #[test]
    fn test_off_map_queries_are_empty() {
        let map = TileMap::new(4, 4);
        let coords = TileCoords::new(9, 9);
        assert!(map.first_element(coords).is_none());
        assert_eq!(map.elements(coords, GhostVisibility::Include).count(), 0);
    }

    #[test]
    fn test_gameplay_ghost_policy() {
        assert_eq!(
            GhostVisibility::for_gameplay(true),
            GhostVisibility::Exclude
        );
        assert_eq!(
            GhostVisibility::for_gameplay(false),
            GhostVisibility::Include
        );
    }
}
