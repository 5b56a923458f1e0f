//! Property-based tests
//!
//! Invariants that should hold for arbitrary inputs: tile traversal always
//! terminates at the last-for-tile flag, scenery age saturates, and the
//! support fallback restores every watermark for any subset of segments.

use proptest::prelude::*;

use brightgate::core::types::TileCoords;
use brightgate::paint::session::{
    rotate_segments, PaintSession, Segment, SEGMENTS_ALL, SUPPORT_HEIGHT_UNSET,
};
use brightgate::paint::supports::{draw_supports, MetalSupportKind};
use brightgate::world::scenery::increase_scenery_age;
use brightgate::world::{GhostVisibility, TileElement, TileElementData, TileMap};

fn wall(height: u8) -> TileElement {
    TileElement::new(TileElementData::Wall { entry: 0 }, height, height + 1)
}

proptest! {
    #[test]
    fn prop_traversal_terminates_and_covers_all(extra in 0usize..12) {
        let mut map = TileMap::new(4, 4);
        let coords = TileCoords::new(1, 2);
        for i in 0..extra {
            map.insert_element(coords, wall(i as u8)).unwrap();
        }
        // Surface plus the inserted walls, and the final element carries
        // the terminator flag.
        let elements: Vec<_> = map.elements(coords, GhostVisibility::Include).collect();
        prop_assert_eq!(elements.len(), extra + 1);
        prop_assert!(elements.last().unwrap().is_last_for_tile());
        prop_assert!(elements[..extra].iter().all(|e| !e.is_last_for_tile()));
    }

    #[test]
    fn prop_scenery_age_saturates(start in 0u8..=255, ticks in 1u64..600) {
        let mut element = TileElement::new(
            TileElementData::SmallScenery { entry: 0, age: start, last_aged_tick: 0 },
            4,
            5,
        );
        for tick in 1..=ticks {
            increase_scenery_age(&mut element, tick);
        }
        let TileElementData::SmallScenery { age, .. } = element.data else {
            unreachable!();
        };
        prop_assert!(age <= 255);
        prop_assert!(age >= start);
    }

    #[test]
    fn prop_scenery_age_is_tick_idempotent(start in 0u8..200) {
        let mut element = TileElement::new(
            TileElementData::SmallScenery { entry: 0, age: start, last_aged_tick: 0 },
            4,
            5,
        );
        increase_scenery_age(&mut element, 5);
        increase_scenery_age(&mut element, 5);
        increase_scenery_age(&mut element, 5);
        let TileElementData::SmallScenery { age, .. } = element.data else {
            unreachable!();
        };
        prop_assert_eq!(age, start + 1);
    }

    #[test]
    fn prop_support_fallback_restores_any_subset(
        mask in 1u16..=SEGMENTS_ALL,
        general in 0u16..512,
        height in 1u16..512,
        rotation in 0u8..4,
    ) {
        let mut session = PaintSession::new(rotation);
        // Force the fallback path by blanking every watermark.
        session.set_segment_support_height(SEGMENTS_ALL, SUPPORT_HEIGHT_UNSET, 0);
        session.set_general_support_height(general);
        let before = session.support_segments;

        draw_supports(&mut session, MetalSupportKind::Truss, mask, height, 0);

        prop_assert_eq!(session.support_segments, before);
    }

    #[test]
    fn prop_rotate_segments_preserves_population(mask in 0u16..=SEGMENTS_ALL, by in 0u8..8) {
        let rotated = rotate_segments(mask, by);
        prop_assert_eq!(rotated.count_ones(), mask.count_ones());
        prop_assert_eq!(rotate_segments(rotated, 4 - (by & 3)), mask);
    }

    #[test]
    fn prop_detailed_supports_never_run_on_unset_segment(height in 1u16..256) {
        let mut session = PaintSession::new(0);
        session.set_segment_support_height(
            Segment::Centre.mask(),
            SUPPORT_HEIGHT_UNSET,
            0,
        );
        // With only the centre addressed and the centre blanked, the draw
        // must come from the truss fallback, leaving the watermark unset.
        draw_supports(
            &mut session,
            MetalSupportKind::Tube,
            Segment::Centre.mask(),
            height,
            0,
        );
        prop_assert_eq!(
            session.segment_support_height(Segment::Centre),
            SUPPORT_HEIGHT_UNSET
        );
    }
}
