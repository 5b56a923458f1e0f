//! Chairlift track painting
//!
//! Track geometry is direction-dependent but never duplicated: every
//! symmetric piece delegates to its canonical painter with a direction
//! offset. Down slopes call the up painter rotated by two quarter turns and
//! the right quarter turn calls the left one rotated by three. Any drift
//! between the mirrored pieces would desync rendering from behaviour, so
//! the delegation is part of the contract, not a style choice.

use crate::core::types::{Direction, TileCoords};
use crate::paint::session::{rotate_segments, PaintSession, Segment, TunnelKind, SUPPORT_HEIGHT_UNSET};
use crate::paint::supports::{draw_supports, MetalSupportKind};
use crate::ride::track::{is_first_station_segment, is_last_station_segment, TrackKind};
use crate::ride::Ride;
use crate::world::{GhostVisibility, TileElement, TileMap};

pub const SPR_CHAIRLIFT_CABLE_FLAT_SW_NE: u32 = 20500;
pub const SPR_CHAIRLIFT_CABLE_FLAT_SE_NW: u32 = 20501;
pub const SPR_CHAIRLIFT_CABLE_UP_SW_NE: u32 = 20502;
pub const SPR_CHAIRLIFT_CABLE_UP_NW_SE: u32 = 20503;
pub const SPR_CHAIRLIFT_CABLE_UP_NE_SW: u32 = 20504;
pub const SPR_CHAIRLIFT_CABLE_UP_SE_NW: u32 = 20505;
pub const SPR_CHAIRLIFT_CABLE_FLAT_TO_UP_SW_NE: u32 = 20506;
pub const SPR_CHAIRLIFT_CABLE_FLAT_TO_UP_NW_SE: u32 = 20507;
pub const SPR_CHAIRLIFT_CABLE_FLAT_TO_UP_NE_SW: u32 = 20508;
pub const SPR_CHAIRLIFT_CABLE_FLAT_TO_UP_SE_NW: u32 = 20509;
pub const SPR_CHAIRLIFT_CABLE_UP_TO_FLAT_SW_NE: u32 = 20510;
pub const SPR_CHAIRLIFT_CABLE_UP_TO_FLAT_NW_SE: u32 = 20511;
pub const SPR_CHAIRLIFT_CABLE_UP_TO_FLAT_NE_SW: u32 = 20512;
pub const SPR_CHAIRLIFT_CABLE_UP_TO_FLAT_SE_NW: u32 = 20513;
pub const SPR_CHAIRLIFT_CORNER_NW_SW: u32 = 20514;
pub const SPR_CHAIRLIFT_CORNER_NW_NE: u32 = 20515;
pub const SPR_CHAIRLIFT_CORNER_SE_SW: u32 = 20516;
pub const SPR_CHAIRLIFT_CORNER_SE_NE: u32 = 20517;
pub const SPR_CHAIRLIFT_STATION_COLUMN_NE_SW: u32 = 20520;
pub const SPR_CHAIRLIFT_STATION_COLUMN_SE_NW: u32 = 20521;
pub const SPR_CHAIRLIFT_STATION_END_CAP_NE: u32 = 20522;
pub const SPR_CHAIRLIFT_STATION_END_CAP_SE: u32 = 20523;
pub const SPR_CHAIRLIFT_STATION_END_CAP_SW: u32 = 20524;
pub const SPR_CHAIRLIFT_STATION_END_CAP_NW: u32 = 20525;
pub const SPR_CHAIRLIFT_BULLWHEEL_FRAME_0: u32 = 20529;
pub const SPR_FLOOR_METAL: u32 = 14567;
pub const SPR_FENCE_METAL_NE: u32 = 14568;
pub const SPR_FENCE_METAL_SE: u32 = 14569;
pub const SPR_FENCE_METAL_SW: u32 = 14570;
pub const SPR_FENCE_METAL_NW: u32 = 14571;
pub const SPR_STATION_COVER_BASE: u32 = 14580;

/// World data the track painters read. The render pass owns no world
/// state; everything comes in borrowed and immutable.
pub struct PaintContext<'a> {
    pub map: &'a TileMap,
    pub ride: &'a Ride,
    pub position: TileCoords,
    pub ghosts: GhostVisibility,
}

pub type TrackPaintFn =
    fn(&mut PaintSession, &PaintContext, u8, Direction, u16, &TileElement);

/// Resolve the painter for a chairlift track piece. Unknown pieces return
/// `None` and paint nothing rather than guessing.
pub fn track_paint_function(kind: TrackKind) -> Option<TrackPaintFn> {
    match kind {
        TrackKind::BeginStation | TrackKind::MiddleStation | TrackKind::EndStation => {
            Some(paint_station)
        }
        TrackKind::Flat => Some(paint_flat),
        TrackKind::FlatTo25DegUp => Some(paint_flat_to_25_deg_up),
        TrackKind::Up25Deg => Some(paint_25_deg_up),
        TrackKind::Up25DegToFlat => Some(paint_25_deg_up_to_flat),
        TrackKind::FlatTo25DegDown => Some(paint_flat_to_25_deg_down),
        TrackKind::Down25Deg => Some(paint_25_deg_down),
        TrackKind::Down25DegToFlat => Some(paint_25_deg_down_to_flat),
        TrackKind::LeftQuarterTurn1Tile => Some(paint_left_quarter_turn_1_tile),
        TrackKind::RightQuarterTurn1Tile => Some(paint_right_quarter_turn_1_tile),
    }
}

/// Segments a straight piece occupies, before view rotation: the centre
/// plus the two edge midpoints along the travel axis.
fn straight_segments(direction: Direction) -> u16 {
    let axis = if direction.is_right_axis() {
        Segment::TopRightEdge.mask() | Segment::BottomLeftEdge.mask()
    } else {
        Segment::TopLeftEdge.mask() | Segment::BottomRightEdge.mask()
    };
    Segment::Centre.mask() | axis
}

/// Bullwheel animation frame from the ride's rotation counter; one of four.
fn bullwheel_frame(ride: &Ride) -> u32 {
    (ride.bullwheel_rotation / 16384) as u32
}

fn close_straight_piece(
    session: &mut PaintSession,
    direction: Direction,
    height: u16,
    clearance: u16,
) {
    let occupied = rotate_segments(straight_segments(direction), session.rotation);
    session.set_segment_support_height(occupied, SUPPORT_HEIGHT_UNSET, 0);
    session.set_general_support_height(height + clearance);
}

fn paint_station(
    session: &mut PaintSession,
    ctx: &PaintContext,
    _sequence: u8,
    direction: Direction,
    height: u16,
    element: &TileElement,
) {
    let is_start = is_first_station_segment(ctx.map, ctx.ride.id, element, ctx.position, ctx.ghosts);
    let is_end = is_last_station_segment(ctx.map, ctx.ride.id, element, ctx.position, ctx.ghosts);
    let right_axis = direction.is_right_axis();
    let z = height as i32;

    session.push_sprite(SPR_FLOOR_METAL, (0, 0, z), (32, 32, 1), (0, 0, z));

    // Cable runs over the floor; the start and end pieces drop it where
    // the bullwheel takes over.
    let cable = if right_axis {
        SPR_CHAIRLIFT_CABLE_FLAT_SW_NE
    } else {
        SPR_CHAIRLIFT_CABLE_FLAT_SE_NW
    };
    if !is_start && !is_end {
        if right_axis {
            session.push_child_sprite(cable, (0, 13, z + 28), (32, 6, 2), (0, 13, z + 28));
        } else {
            session.push_child_sprite(cable, (13, 0, z + 28), (6, 32, 2), (13, 0, z + 28));
        }
    }

    // Back fence is a child of the floor; the front fence sorts on its own.
    if right_axis {
        session.push_child_sprite(SPR_FENCE_METAL_NW, (0, 2, z), (32, 1, 7), (0, 2, z + 2));
        session.push_sprite(SPR_FENCE_METAL_SE, (0, 30, z), (32, 1, 7), (0, 30, z + 2));
    } else {
        session.push_child_sprite(SPR_FENCE_METAL_NE, (2, 0, z), (1, 32, 7), (2, 0, z + 2));
        session.push_sprite(SPR_FENCE_METAL_SW, (30, 0, z), (1, 32, 7), (30, 0, z + 2));
    }

    // Columns carry the cable through the station; the boundary pieces
    // swap one column for the bullwheel.
    let column = if right_axis {
        SPR_CHAIRLIFT_STATION_COLUMN_NE_SW
    } else {
        SPR_CHAIRLIFT_STATION_COLUMN_SE_NW
    };
    let bullwheel = SPR_CHAIRLIFT_BULLWHEEL_FRAME_0 + bullwheel_frame(ctx.ride);
    let (near, far) = if right_axis {
        ((1, 16, z), (31, 16, z))
    } else {
        ((16, 1, z), (16, 31, z))
    };
    if is_start {
        session.push_sprite(bullwheel, near, (2, 2, 27), near);
    } else {
        session.push_sprite(column, near, (2, 2, 27), near);
    }
    if is_end {
        session.push_sprite(bullwheel, far, (2, 2, 27), far);
    } else {
        session.push_sprite(column, far, (2, 2, 27), far);
    }

    // End caps close the open side of a boundary station piece.
    if is_start || is_end {
        let cap = SPR_CHAIRLIFT_STATION_END_CAP_NE + direction as u32;
        session.push_sprite(cap, (16, 16, z + 2), (2, 2, 27), (16, 16, z + 2));
    }

    session.push_sprite(
        SPR_STATION_COVER_BASE + direction as u32,
        (0, 0, z + 30),
        (32, 32, 1),
        (0, 0, z + 30),
    );

    let colour = session.support_colour;
    draw_supports(
        session,
        MetalSupportKind::Boxed,
        Segment::Centre.mask(),
        height,
        colour,
    );

    if right_axis {
        session.push_tunnel_left(height, TunnelKind::Flat);
    } else {
        session.push_tunnel_right(height, TunnelKind::Flat);
    }
    close_straight_piece(session, direction, height, 32);
}

fn paint_flat(
    session: &mut PaintSession,
    _ctx: &PaintContext,
    _sequence: u8,
    direction: Direction,
    height: u16,
    _element: &TileElement,
) {
    let z = height as i32;
    if direction.is_right_axis() {
        session.push_sprite(
            SPR_CHAIRLIFT_CABLE_FLAT_SW_NE,
            (0, 13, z + 28),
            (32, 6, 2),
            (0, 13, z + 28),
        );
        session.push_tunnel_left(height, TunnelKind::Flat);
    } else {
        session.push_sprite(
            SPR_CHAIRLIFT_CABLE_FLAT_SE_NW,
            (13, 0, z + 28),
            (6, 32, 2),
            (13, 0, z + 28),
        );
        session.push_tunnel_right(height, TunnelKind::Flat);
    }
    let colour = session.support_colour;
    draw_supports(
        session,
        MetalSupportKind::Truss,
        Segment::Centre.mask(),
        height + 32,
        colour,
    );
    close_straight_piece(session, direction, height, 32);
}

fn paint_25_deg_up(
    session: &mut PaintSession,
    _ctx: &PaintContext,
    _sequence: u8,
    direction: Direction,
    height: u16,
    _element: &TileElement,
) {
    let z = height as i32;
    let sprite = match direction {
        Direction::North => SPR_CHAIRLIFT_CABLE_UP_SW_NE,
        Direction::East => SPR_CHAIRLIFT_CABLE_UP_NW_SE,
        Direction::South => SPR_CHAIRLIFT_CABLE_UP_NE_SW,
        Direction::West => SPR_CHAIRLIFT_CABLE_UP_SE_NW,
    };
    if direction.is_right_axis() {
        session.push_sprite(sprite, (0, 13, z + 28), (32, 6, 2), (0, 13, z + 28));
        session.push_tunnel_left(height.wrapping_sub(8), TunnelKind::SlopeStart);
    } else {
        session.push_sprite(sprite, (13, 0, z + 28), (6, 32, 2), (13, 0, z + 28));
        session.push_tunnel_right(height.wrapping_sub(8), TunnelKind::SlopeStart);
    }
    let colour = session.support_colour;
    draw_supports(
        session,
        MetalSupportKind::Truss,
        Segment::Centre.mask(),
        height + 48,
        colour,
    );
    close_straight_piece(session, direction, height, 56);
}

fn paint_flat_to_25_deg_up(
    session: &mut PaintSession,
    _ctx: &PaintContext,
    _sequence: u8,
    direction: Direction,
    height: u16,
    _element: &TileElement,
) {
    let z = height as i32;
    let sprite = match direction {
        Direction::North => SPR_CHAIRLIFT_CABLE_FLAT_TO_UP_SW_NE,
        Direction::East => SPR_CHAIRLIFT_CABLE_FLAT_TO_UP_NW_SE,
        Direction::South => SPR_CHAIRLIFT_CABLE_FLAT_TO_UP_NE_SW,
        Direction::West => SPR_CHAIRLIFT_CABLE_FLAT_TO_UP_SE_NW,
    };
    if direction.is_right_axis() {
        session.push_sprite(sprite, (0, 13, z + 28), (32, 6, 2), (0, 13, z + 28));
        session.push_tunnel_left(height, TunnelKind::Flat);
    } else {
        session.push_sprite(sprite, (13, 0, z + 28), (6, 32, 2), (13, 0, z + 28));
        session.push_tunnel_right(height, TunnelKind::Flat);
    }
    let colour = session.support_colour;
    draw_supports(
        session,
        MetalSupportKind::Truss,
        Segment::Centre.mask(),
        height + 40,
        colour,
    );
    close_straight_piece(session, direction, height, 48);
}

fn paint_25_deg_up_to_flat(
    session: &mut PaintSession,
    _ctx: &PaintContext,
    _sequence: u8,
    direction: Direction,
    height: u16,
    _element: &TileElement,
) {
    let z = height as i32;
    let sprite = match direction {
        Direction::North => SPR_CHAIRLIFT_CABLE_UP_TO_FLAT_SW_NE,
        Direction::East => SPR_CHAIRLIFT_CABLE_UP_TO_FLAT_NW_SE,
        Direction::South => SPR_CHAIRLIFT_CABLE_UP_TO_FLAT_NE_SW,
        Direction::West => SPR_CHAIRLIFT_CABLE_UP_TO_FLAT_SE_NW,
    };
    if direction.is_right_axis() {
        session.push_sprite(sprite, (0, 13, z + 28), (32, 6, 2), (0, 13, z + 28));
        session.push_tunnel_left(height.wrapping_sub(8), TunnelKind::SlopeEnd);
    } else {
        session.push_sprite(sprite, (13, 0, z + 28), (6, 32, 2), (13, 0, z + 28));
        session.push_tunnel_right(height.wrapping_sub(8), TunnelKind::SlopeEnd);
    }
    let colour = session.support_colour;
    draw_supports(
        session,
        MetalSupportKind::Truss,
        Segment::Centre.mask(),
        height + 40,
        colour,
    );
    close_straight_piece(session, direction, height, 40);
}

fn paint_25_deg_down(
    session: &mut PaintSession,
    ctx: &PaintContext,
    sequence: u8,
    direction: Direction,
    height: u16,
    element: &TileElement,
) {
    paint_25_deg_up(session, ctx, sequence, direction.rotated(2), height, element);
}

fn paint_flat_to_25_deg_down(
    session: &mut PaintSession,
    ctx: &PaintContext,
    sequence: u8,
    direction: Direction,
    height: u16,
    element: &TileElement,
) {
    paint_25_deg_up_to_flat(session, ctx, sequence, direction.rotated(2), height, element);
}

fn paint_25_deg_down_to_flat(
    session: &mut PaintSession,
    ctx: &PaintContext,
    sequence: u8,
    direction: Direction,
    height: u16,
    element: &TileElement,
) {
    paint_flat_to_25_deg_up(session, ctx, sequence, direction.rotated(2), height, element);
}

fn paint_left_quarter_turn_1_tile(
    session: &mut PaintSession,
    _ctx: &PaintContext,
    _sequence: u8,
    direction: Direction,
    height: u16,
    _element: &TileElement,
) {
    let z = height as i32;
    let (sprite, offset, size) = match direction {
        Direction::North => (SPR_CHAIRLIFT_CORNER_NW_SW, (0, 0, z + 28), (16, 16, 2)),
        Direction::East => (SPR_CHAIRLIFT_CORNER_NW_NE, (16, 0, z + 28), (16, 16, 2)),
        Direction::South => (SPR_CHAIRLIFT_CORNER_SE_NE, (16, 16, z + 28), (16, 16, 2)),
        Direction::West => (SPR_CHAIRLIFT_CORNER_SE_SW, (0, 16, z + 28), (16, 16, 2)),
    };
    session.push_sprite(sprite, offset, size, offset);

    // Corner pieces carry two supports, one on each outgoing edge.
    let edges = match direction {
        Direction::North => Segment::TopLeftEdge.mask() | Segment::BottomLeftEdge.mask(),
        Direction::East => Segment::TopLeftEdge.mask() | Segment::TopRightEdge.mask(),
        Direction::South => Segment::TopRightEdge.mask() | Segment::BottomRightEdge.mask(),
        Direction::West => Segment::BottomRightEdge.mask() | Segment::BottomLeftEdge.mask(),
    };
    let colour = session.support_colour;
    draw_supports(
        session,
        MetalSupportKind::Truss,
        edges,
        height + 32,
        colour,
    );

    match direction {
        Direction::North => session.push_tunnel_left(height, TunnelKind::Flat),
        Direction::East => {}
        Direction::South => session.push_tunnel_right(height, TunnelKind::Flat),
        Direction::West => {
            session.push_tunnel_left(height, TunnelKind::Flat);
            session.push_tunnel_right(height, TunnelKind::Flat);
        }
    }

    let occupied = rotate_segments(
        Segment::Centre.mask() | edges,
        session.rotation,
    );
    session.set_segment_support_height(occupied, SUPPORT_HEIGHT_UNSET, 0);
    session.set_general_support_height(height + 32);
}

fn paint_right_quarter_turn_1_tile(
    session: &mut PaintSession,
    ctx: &PaintContext,
    sequence: u8,
    direction: Direction,
    height: u16,
    element: &TileElement,
) {
    paint_left_quarter_turn_1_tile(session, ctx, sequence, direction.rotated(3), height, element);
}
