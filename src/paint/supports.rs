//! Support structure painting
//!
//! Supports come in a detailed metal style drawn per segment and a plain
//! truss style used as a fallback. Detailed painting reads the segment's
//! height watermark and refuses to run when the watermark is unset; the
//! fallback temporarily overrides the watermark with the session's general
//! support height and restores it on every exit path.

use crate::paint::session::{PaintSession, Segment, SUPPORT_HEIGHT_UNSET};

pub const SPR_SUPPORT_METAL_BASE: u32 = 20900;
pub const SPR_SUPPORT_TRUSS_BASE: u32 = 20920;

/// Vertical world units covered by one support sprite.
const SUPPORT_SPRITE_HEIGHT: u16 = 16;

/// Metal support flavours; each selects a sprite family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetalSupportKind {
    Truss,
    Tube,
    Boxed,
}

impl MetalSupportKind {
    fn sprite_base(self) -> u32 {
        match self {
            MetalSupportKind::Truss => SPR_SUPPORT_METAL_BASE,
            MetalSupportKind::Tube => SPR_SUPPORT_METAL_BASE + 4,
            MetalSupportKind::Boxed => SPR_SUPPORT_METAL_BASE + 8,
        }
    }
}

/// Screen-space offset of each segment within the tile diamond.
fn segment_offset(segment: Segment) -> (i32, i32) {
    match segment {
        Segment::Centre => (16, 16),
        Segment::TopCorner => (16, 0),
        Segment::RightCorner => (32, 16),
        Segment::BottomCorner => (16, 32),
        Segment::LeftCorner => (0, 16),
        Segment::TopLeftEdge => (8, 8),
        Segment::TopRightEdge => (24, 8),
        Segment::BottomRightEdge => (24, 24),
        Segment::BottomLeftEdge => (8, 24),
    }
}

/// Paint one detailed support column on `segment`, from the segment's
/// recorded watermark up to `height`. Returns false without drawing when
/// the watermark is unset or already at `height`.
pub fn metal_support_paint(
    session: &mut PaintSession,
    kind: MetalSupportKind,
    segment: Segment,
    height: u16,
    colour: u32,
) -> bool {
    let segment = segment.rotated(session.rotation);
    let base = session.segment_support_height(segment);
    if base == SUPPORT_HEIGHT_UNSET || base >= height {
        return false;
    }
    let (x, y) = segment_offset(segment);
    let mut z = base;
    while z < height {
        let piece = (height - z).min(SUPPORT_SPRITE_HEIGHT);
        session.push_sprite(
            kind.sprite_base() | colour,
            (x, y, z as i32),
            (1, 1, piece as i32),
            (x, y, z as i32),
        );
        z += piece;
    }
    session.set_segment_support_height(segment.mask(), height, 0);
    true
}

/// Paint a plain truss column on `segment` from its watermark to `height`.
/// Unlike the detailed style this always draws.
fn truss_support_paint(session: &mut PaintSession, segment: Segment, height: u16, colour: u32) {
    let segment = segment.rotated(session.rotation);
    let (x, y) = segment_offset(segment);
    let base = match session.segment_support_height(segment) {
        SUPPORT_HEIGHT_UNSET => 0,
        h => h,
    };
    session.push_sprite(
        SPR_SUPPORT_TRUSS_BASE | colour,
        (x, y, base as i32),
        (1, 1, height.saturating_sub(base) as i32),
        (x, y, base as i32),
    );
    session.set_segment_support_height(segment.mask(), height, 0);
}

/// Run `f` with `segment`'s watermark overridden to `height`. The previous
/// watermark is restored afterwards no matter what `f` does to it.
pub fn with_segment_height<R>(
    session: &mut PaintSession,
    segment: Segment,
    height: u16,
    f: impl FnOnce(&mut PaintSession) -> R,
) -> R {
    let saved = session.support_segments[segment as usize];
    session.support_segments[segment as usize].height = height;
    let result = f(session);
    session.support_segments[segment as usize] = saved;
    result
}

/// Paint supports on every segment in `mask`: detailed style first, and if
/// no addressed segment accepted detailed painting, repaint all of them in
/// truss style with the watermark taken from the session's general support
/// height. Returns whether anything was drawn.
pub fn draw_supports(
    session: &mut PaintSession,
    kind: MetalSupportKind,
    mask: u16,
    height: u16,
    colour: u32,
) -> bool {
    let mut any_detailed = false;
    for segment in Segment::ALL {
        if mask & segment.mask() != 0 && metal_support_paint(session, kind, segment, height, colour)
        {
            any_detailed = true;
        }
    }
    if any_detailed {
        return true;
    }

    let general = session.general_support_height;
    let mut drew = false;
    for segment in Segment::ALL {
        if mask & segment.mask() == 0 {
            continue;
        }
        let addressed = segment.rotated(session.rotation);
        with_segment_height(session, addressed, general, |session| {
            truss_support_paint(session, segment, height, colour);
        });
        drew = true;
    }
    drew
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::session::SEGMENTS_ALL;

    #[test]
    fn test_metal_support_refuses_unset_watermark() {
        let mut session = PaintSession::new(0);
        session.set_segment_support_height(Segment::Centre.mask(), SUPPORT_HEIGHT_UNSET, 0);
        assert!(!metal_support_paint(
            &mut session,
            MetalSupportKind::Truss,
            Segment::Centre,
            48,
            0
        ));
        assert!(session.draw_calls.is_empty());
    }

    #[test]
    fn test_metal_support_raises_watermark() {
        let mut session = PaintSession::new(0);
        assert!(metal_support_paint(
            &mut session,
            MetalSupportKind::Tube,
            Segment::Centre,
            48,
            0
        ));
        assert_eq!(session.segment_support_height(Segment::Centre), 48);
        assert!(!session.draw_calls.is_empty());
    }

    #[test]
    fn test_with_segment_height_restores_exactly() {
        let mut session = PaintSession::new(0);
        session.set_segment_support_height(Segment::LeftCorner.mask(), 24, 0x10);
        let before = session.support_segments;
        with_segment_height(&mut session, Segment::LeftCorner, 96, |session| {
            assert_eq!(session.segment_support_height(Segment::LeftCorner), 96);
            // Scribble over it inside the scope; restore must still win.
            session.set_segment_support_height(Segment::LeftCorner.mask(), 7, 3);
        });
        assert_eq!(
            session.support_segments[Segment::LeftCorner as usize],
            before[Segment::LeftCorner as usize]
        );
    }

    #[test]
    fn test_fallback_restores_all_addressed_segments() {
        let mut session = PaintSession::new(0);
        session.set_segment_support_height(SEGMENTS_ALL, SUPPORT_HEIGHT_UNSET, 0);
        session.set_general_support_height(32);
        let before = session.support_segments;

        let mask = Segment::Centre.mask() | Segment::TopCorner.mask() | Segment::BottomCorner.mask();
        assert!(draw_supports(
            &mut session,
            MetalSupportKind::Truss,
            mask,
            64,
            0
        ));
        // Every addressed segment went through the truss fallback; the
        // override must have been unwound for each of them.
        assert_eq!(session.support_segments, before);
        assert_eq!(session.draw_calls.len(), 3);
    }

    #[test]
    fn test_detailed_success_skips_fallback() {
        let mut session = PaintSession::new(0);
        let mask = Segment::Centre.mask();
        assert!(draw_supports(
            &mut session,
            MetalSupportKind::Truss,
            mask,
            48,
            0
        ));
        // Detailed path ran and left the watermark raised.
        assert_eq!(session.segment_support_height(Segment::Centre), 48);
    }
}
