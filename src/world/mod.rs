//! Tile world: grid storage, element variants, climate and scenery aging

pub mod climate;
pub mod element;
pub mod map;
pub mod scenery;

pub use climate::{Climate, Weather};
pub use element::{ElementKind, PathAddition, TileElement, TileElementData};
pub use map::{GhostVisibility, TileMap};
