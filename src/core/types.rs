//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Game tick counter (simulation time unit)
pub type Tick = u64;

/// Money value in ten-cent units, matching the classic park accounting grain.
pub type Money = i32;

/// Build a [`Money`] value from whole currency units and cents.
pub const fn money(whole: i32, cents: i32) -> Money {
    whole * 10 + cents / 10
}

/// Ride rating in hundredths (excitement 5.50 == 550)
pub type RideRating = i32;

/// Build a [`RideRating`] from whole and fractional parts.
pub const fn ride_rating(whole: i32, fraction: i32) -> RideRating {
    whole * 100 + fraction
}

/// Index into the global ride table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RideId(pub u8);

impl RideId {
    pub fn new(id: u8) -> Self {
        Self(id)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Index into the global agent table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentId(pub u32);

impl AgentId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Grid tile coordinates (one unit = one tile)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoords {
    pub x: i32,
    pub y: i32,
}

impl TileCoords {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbouring tile one step along `direction`
    pub fn step(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl std::ops::Add for TileCoords {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

/// One of the four cardinal view/track directions.
///
/// Rotation math is modular: `rotated(2)` is the opposite direction,
/// which is how downhill track pieces delegate to their uphill twins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn from_u8(value: u8) -> Self {
        match value & 3 {
            0 => Direction::North,
            1 => Direction::East,
            2 => Direction::South,
            _ => Direction::West,
        }
    }

    pub fn as_u8(&self) -> u8 {
        *self as u8
    }

    pub fn rotated(&self, by: u8) -> Self {
        Self::from_u8(self.as_u8().wrapping_add(by))
    }

    pub fn opposite(&self) -> Self {
        self.rotated(2)
    }

    /// Tile delta for one step in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    /// True for the two directions that run along the screen's right axis
    pub fn is_right_axis(&self) -> bool {
        self.as_u8() & 1 == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_rotation_wraps() {
        assert_eq!(Direction::West.rotated(1), Direction::North);
        assert_eq!(Direction::North.rotated(2), Direction::South);
        assert_eq!(Direction::East.opposite(), Direction::West);
    }

    #[test]
    fn test_direction_deltas_are_unit_steps() {
        for dir in Direction::ALL {
            let (dx, dy) = dir.delta();
            assert_eq!(dx.abs() + dy.abs(), 1);
        }
    }

    #[test]
    fn test_step_and_back_is_identity() {
        let start = TileCoords::new(10, 7);
        for dir in Direction::ALL {
            assert_eq!(start.step(dir).step(dir.opposite()), start);
        }
    }

    #[test]
    fn test_money_and_rating_constructors() {
        assert_eq!(money(10, 0), 100);
        assert_eq!(money(0, 10), 1);
        assert_eq!(ride_rating(5, 50), 550);
    }
}
