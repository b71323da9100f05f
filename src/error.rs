//! Error taxonomy
//!
//! Gameplay outcomes (death, goal completion) are never errors. Everything in
//! here means the world cannot be evaluated and the loop must stop.

use thiserror::Error;

use crate::sim::{EntityId, Size};

/// Fatal problems detected while validating or advancing a world state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    #[error("no dimensions registered for entity {id}")]
    MissingDimensions { id: EntityId },

    #[error("entity {id} has a degenerate shape ({}x{})", .size.width, .size.height)]
    DegenerateShape { id: EntityId, size: Size },

    #[error("entity id {id} is used more than once")]
    DuplicateId { id: EntityId },

    #[error("floating entity {id} has a zero-length submerge cycle")]
    InvalidCycle { id: EntityId },

    #[error("predator {id} has kill zone {kill_zone} outside its width {width}")]
    InvalidKillZone {
        id: EntityId,
        kill_zone: i32,
        width: i32,
    },

    #[error("entity {id} ({}x{}) does not fit a {field_width}x{field_height} playfield", .size.width, .size.height)]
    PlayfieldTooSmall {
        id: EntityId,
        size: Size,
        field_width: i32,
        field_height: i32,
    },
}

/// Problems loading settings or a level description
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("level failed validation: {0}")]
    Level(#[from] SimError),
}
