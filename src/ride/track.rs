//! Track segment kinds and station boundary queries
//!
//! The segment vocabulary covers the chairlift-style transport track this
//! core simulates: stations, flat runs, 25-degree slopes with their
//! transitions, and single-tile quarter turns. Downhill kinds are painted
//! by delegating to their uphill twin rotated by two directions; keeping a
//! single canonical implementation is what keeps rendering and behavior in
//! step.

use serde::{Deserialize, Serialize};

use crate::core::types::{RideId, TileCoords};
use crate::world::element::TileElement;
use crate::world::map::{GhostVisibility, TileMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackKind {
    BeginStation,
    MiddleStation,
    EndStation,
    Flat,
    FlatTo25DegUp,
    Up25Deg,
    Up25DegToFlat,
    FlatTo25DegDown,
    Down25Deg,
    Down25DegToFlat,
    LeftQuarterTurn1Tile,
    RightQuarterTurn1Tile,
}

impl TrackKind {
    pub fn is_station(&self) -> bool {
        matches!(
            self,
            TrackKind::BeginStation | TrackKind::MiddleStation | TrackKind::EndStation
        )
    }
}

/// Is this the first station segment of the ride's track run? True when the
/// segment is a begin-station and no track of the same ride continues on
/// the tile behind it. Other systems use this for boundary behavior such
/// as bullwheel placement.
pub fn is_first_station_segment(
    map: &TileMap,
    ride: RideId,
    element: &TileElement,
    position: TileCoords,
    ghosts: GhostVisibility,
) -> bool {
    if element.track_kind() != Some(TrackKind::BeginStation) {
        return false;
    }
    let behind = position.step(element.direction.opposite());
    map.track_element_at_from_ride_fuzzy(behind, element.base_height, ride, ghosts)
        .is_none()
}

/// Mirror of [`is_first_station_segment`] for the end of the run: an
/// end-station with no track of the same ride continuing ahead of it.
pub fn is_last_station_segment(
    map: &TileMap,
    ride: RideId,
    element: &TileElement,
    position: TileCoords,
    ghosts: GhostVisibility,
) -> bool {
    if element.track_kind() != Some(TrackKind::EndStation) {
        return false;
    }
    let ahead = position.step(element.direction);
    map.track_element_at_from_ride_fuzzy(ahead, element.base_height, ride, ghosts)
        .is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Direction;
    use crate::world::element::TileElementData;

    fn track(ride: RideId, kind: TrackKind, direction: Direction, base: u8) -> TileElement {
        TileElement::new(
            TileElementData::Track {
                ride,
                kind,
                sequence: 0,
            },
            base,
            base + 4,
        )
        .with_direction(direction)
    }

    #[test]
    fn test_lone_begin_station_is_first() {
        let mut map = TileMap::new(8, 8);
        let ride = RideId(0);
        let pos = TileCoords::new(4, 4);
        let element = track(ride, TrackKind::BeginStation, Direction::East, 10);
        map.insert_element(pos, element.clone()).unwrap();

        assert!(is_first_station_segment(
            &map,
            ride,
            &element,
            pos,
            GhostVisibility::Include
        ));
    }

    #[test]
    fn test_begin_station_with_track_behind_is_not_first() {
        let mut map = TileMap::new(8, 8);
        let ride = RideId(0);
        let pos = TileCoords::new(4, 4);
        let element = track(ride, TrackKind::BeginStation, Direction::East, 10);
        map.insert_element(pos, element.clone()).unwrap();
        // Track continues behind (west of) the begin station.
        map.insert_element(
            TileCoords::new(3, 4),
            track(ride, TrackKind::MiddleStation, Direction::East, 10),
        )
        .unwrap();

        assert!(!is_first_station_segment(
            &map,
            ride,
            &element,
            pos,
            GhostVisibility::Include
        ));
    }

    #[test]
    fn test_fuzzy_height_match_one_unit_below() {
        let mut map = TileMap::new(8, 8);
        let ride = RideId(0);
        let pos = TileCoords::new(4, 4);
        let element = track(ride, TrackKind::EndStation, Direction::East, 10);
        map.insert_element(pos, element.clone()).unwrap();
        // Continuation sits one height unit below; still counts.
        map.insert_element(
            TileCoords::new(5, 4),
            track(ride, TrackKind::Flat, Direction::East, 9),
        )
        .unwrap();

        assert!(!is_last_station_segment(
            &map,
            ride,
            &element,
            pos,
            GhostVisibility::Include
        ));
    }

    #[test]
    fn test_other_rides_track_does_not_count() {
        let mut map = TileMap::new(8, 8);
        let ride = RideId(0);
        let pos = TileCoords::new(4, 4);
        let element = track(ride, TrackKind::EndStation, Direction::East, 10);
        map.insert_element(pos, element.clone()).unwrap();
        map.insert_element(
            TileCoords::new(5, 4),
            track(RideId(1), TrackKind::Flat, Direction::East, 10),
        )
        .unwrap();

        assert!(is_last_station_segment(
            &map,
            ride,
            &element,
            pos,
            GhostVisibility::Include
        ));
    }
}
