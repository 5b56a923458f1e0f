//! Paint session state
//!
//! One session covers one render pass over the visible tiles. Painters emit
//! backend-agnostic draw calls into it and maintain two pieces of bookkeeping
//! the support renderer needs: a per-segment support height watermark (nine
//! sub-tile regions tracked independently) and tunnel markers on the two
//! visible tile edges. The session never touches world state; the render
//! pass is read-only over the map.

/// Watermark value meaning "no usable support height is recorded here".
/// Detailed support painting refuses to run on such a segment.
pub const SUPPORT_HEIGHT_UNSET: u16 = 0xFFFF;

/// Sub-tile support regions, in screen orientation: the tile centre, the
/// four corners of the diamond, and the four edge midpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Centre,
    TopCorner,
    RightCorner,
    BottomCorner,
    LeftCorner,
    TopLeftEdge,
    TopRightEdge,
    BottomRightEdge,
    BottomLeftEdge,
}

pub const SEGMENT_COUNT: usize = 9;

impl Segment {
    pub const ALL: [Segment; SEGMENT_COUNT] = [
        Segment::Centre,
        Segment::TopCorner,
        Segment::RightCorner,
        Segment::BottomCorner,
        Segment::LeftCorner,
        Segment::TopLeftEdge,
        Segment::TopRightEdge,
        Segment::BottomRightEdge,
        Segment::BottomLeftEdge,
    ];

    pub fn mask(self) -> u16 {
        1 << self as u16
    }

    /// The segment this one lands on after rotating the view a quarter turn
    /// clockwise `by` times. The centre is fixed; corners cycle among
    /// corners and edges among edges.
    pub fn rotated(self, by: u8) -> Segment {
        let mut segment = self;
        for _ in 0..(by & 3) {
            segment = match segment {
                Segment::Centre => Segment::Centre,
                Segment::TopCorner => Segment::RightCorner,
                Segment::RightCorner => Segment::BottomCorner,
                Segment::BottomCorner => Segment::LeftCorner,
                Segment::LeftCorner => Segment::TopCorner,
                Segment::TopLeftEdge => Segment::TopRightEdge,
                Segment::TopRightEdge => Segment::BottomRightEdge,
                Segment::BottomRightEdge => Segment::BottomLeftEdge,
                Segment::BottomLeftEdge => Segment::TopLeftEdge,
            };
        }
        segment
    }
}

pub const SEGMENTS_ALL: u16 = 0x1FF;

/// Rotate a segment bitmask by `by` quarter turns clockwise.
pub fn rotate_segments(mask: u16, by: u8) -> u16 {
    let mut rotated = 0u16;
    for segment in Segment::ALL {
        if mask & segment.mask() != 0 {
            rotated |= segment.rotated(by).mask();
        }
    }
    rotated
}

/// Tunnel portal shape on a tile edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TunnelKind {
    Flat,
    SlopeStart,
    SlopeEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tunnel {
    pub height: u16,
    pub kind: TunnelKind,
}

/// Support height watermark for one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportSegment {
    pub height: u16,
    pub slope: u8,
}

impl Default for SupportSegment {
    fn default() -> Self {
        Self { height: 0, slope: 0 }
    }
}

/// One emitted drawing primitive. Offsets are in world units relative to
/// the tile origin; the bound box orders overlapping sprites within a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCall {
    pub image: u32,
    pub offset: (i32, i32, i32),
    pub bound_box_size: (i32, i32, i32),
    pub bound_box_offset: (i32, i32, i32),
    /// Child sprites attach to the previous parent's bound box
    pub child: bool,
}

#[derive(Debug, Clone)]
pub struct PaintSession {
    /// View rotation in quarter turns
    pub rotation: u8,
    pub draw_calls: Vec<DrawCall>,
    pub support_segments: [SupportSegment; SEGMENT_COUNT],
    pub general_support_height: u16,
    pub tunnels_left: Vec<Tunnel>,
    pub tunnels_right: Vec<Tunnel>,
    /// Image colour applied to support sprites
    pub support_colour: u32,
}

impl PaintSession {
    pub fn new(rotation: u8) -> Self {
        Self {
            rotation: rotation & 3,
            draw_calls: Vec::new(),
            support_segments: [SupportSegment::default(); SEGMENT_COUNT],
            general_support_height: 0,
            tunnels_left: Vec::new(),
            tunnels_right: Vec::new(),
            support_colour: 0,
        }
    }

    pub fn push_sprite(
        &mut self,
        image: u32,
        offset: (i32, i32, i32),
        bound_box_size: (i32, i32, i32),
        bound_box_offset: (i32, i32, i32),
    ) {
        self.draw_calls.push(DrawCall {
            image,
            offset,
            bound_box_size,
            bound_box_offset,
            child: false,
        });
    }

    /// Attach a sprite to the previous parent's bound box, so the two are
    /// always drawn as one unit regardless of sort order.
    pub fn push_child_sprite(
        &mut self,
        image: u32,
        offset: (i32, i32, i32),
        bound_box_size: (i32, i32, i32),
        bound_box_offset: (i32, i32, i32),
    ) {
        self.draw_calls.push(DrawCall {
            image,
            offset,
            bound_box_size,
            bound_box_offset,
            child: true,
        });
    }

    pub fn segment_support_height(&self, segment: Segment) -> u16 {
        self.support_segments[segment as usize].height
    }

    /// Record `height` as the new watermark for every segment in `mask`.
    /// `SUPPORT_HEIGHT_UNSET` marks the segments as blocked for detailed
    /// support painting.
    pub fn set_segment_support_height(&mut self, mask: u16, height: u16, slope: u8) {
        for segment in Segment::ALL {
            if mask & segment.mask() != 0 {
                let entry = &mut self.support_segments[segment as usize];
                entry.height = height;
                entry.slope = slope;
            }
        }
    }

    /// Raise the general support height; it never lowers within a tile.
    pub fn set_general_support_height(&mut self, height: u16) {
        if height > self.general_support_height {
            self.general_support_height = height;
        }
    }

    pub fn push_tunnel_left(&mut self, height: u16, kind: TunnelKind) {
        self.tunnels_left.push(Tunnel { height, kind });
    }

    pub fn push_tunnel_right(&mut self, height: u16, kind: TunnelKind) {
        self.tunnels_right.push(Tunnel { height, kind });
    }

    /// Reset per-tile bookkeeping before painting the next tile. Draw calls
    /// and tunnels accumulate across the pass; segment watermarks do not.
    pub fn next_tile(&mut self) {
        self.support_segments = [SupportSegment::default(); SEGMENT_COUNT];
        self.general_support_height = 0;
    }
}
