use thiserror::Error;

use crate::core::types::{AgentId, RideId, TileCoords};

#[derive(Error, Debug)]
pub enum ParkError {
    #[error("Tile out of map bounds: ({0:?})")]
    TileOutOfBounds(TileCoords),

    #[error("Ride not found: {0:?}")]
    RideNotFound(RideId),

    #[error("Agent not found: {0:?}")]
    AgentNotFound(AgentId),

    #[error("Object registry full for {0}")]
    RegistryFull(&'static str),

    #[error("Invalid object entry: {0}")]
    InvalidEntry(String),

    #[error("Invalid ride status transition: {0}")]
    InvalidStatusTransition(String),

    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ParkError>;
