//! Callbacks the core exposes to its collaborators
//!
//! The notification sink and UI invalidate hooks are fire-and-forget and
//! advisory: the core never blocks on them or depends on a response. All
//! methods default to no-ops so headless runs can pass [`NullHooks`].

use crate::core::config::COORDS_Z_STEP;
use crate::core::types::TileCoords;

/// Styling category for notification events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsKind {
    Award,
    Ride,
    Guest,
}

/// UI window classes the core may ask to be redrawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowClass {
    ParkInformation,
    RideList,
    GuestList,
}

pub trait SimHooks {
    /// Fire-and-forget gameplay notification. Never used for errors.
    fn notify(&mut self, _kind: NewsKind, _message: &str, _extra: u32) {}

    /// Ask the display layer to redraw a world-space region.
    fn invalidate_region(&mut self, _x0: i32, _y0: i32, _x1: i32, _y1: i32) {}

    /// Ask the display layer to redraw every window of a class.
    fn invalidate_window_class(&mut self, _class: WindowClass) {}
}

/// Hooks implementation that drops everything, for headless simulation.
#[derive(Debug, Default)]
pub struct NullHooks;

impl SimHooks for NullHooks {}

/// Invalidate the screen region covered by one tile between two element
/// heights (in height units).
pub fn invalidate_tile_region(
    hooks: &mut dyn SimHooks,
    coords: TileCoords,
    base_height: u8,
    clearance_height: u8,
) {
    let x0 = coords.x * 32;
    let y0 = coords.y * 32;
    hooks.invalidate_region(
        x0,
        y0 - clearance_height as i32 * COORDS_Z_STEP,
        x0 + 32,
        y0 + 32 - base_height as i32 * COORDS_Z_STEP,
    );
}

/// Recording hooks for tests: remembers every call in order.
#[derive(Debug, Default)]
pub struct RecordingHooks {
    pub notifications: Vec<(NewsKind, String, u32)>,
    pub invalidated_regions: Vec<(i32, i32, i32, i32)>,
    pub invalidated_windows: Vec<WindowClass>,
}

impl SimHooks for RecordingHooks {
    fn notify(&mut self, kind: NewsKind, message: &str, extra: u32) {
        self.notifications.push((kind, message.to_string(), extra));
    }

    fn invalidate_region(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        self.invalidated_regions.push((x0, y0, x1, y1));
    }

    fn invalidate_window_class(&mut self, class: WindowClass) {
        self.invalidated_windows.push(class);
    }
}
