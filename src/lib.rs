//! Frogger - A river-crossing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (overlaps, wrapping, tick resolution)
//! - `input`: Key presses and timer ticks turned into simulation events
//! - `game`: The single-threaded fold loop tying events, state and rendering together
//! - `render`: One-way projection of a world state onto a view
//! - `level`: The initial configuration and its shape table
//! - `settings`: Runtime configuration
//! - `platform`: Browser glue (SVG scaffolding, DOM attribute sink)

pub mod error;
pub mod game;
pub mod input;
pub mod level;
pub mod platform;
pub mod render;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, SimError};
pub use game::Game;
pub use level::Level;
pub use settings::{LogLevel, Settings};

/// Game configuration constants (classic layout)
pub mod consts {
    /// Timer period between ticks
    pub const TICK_PERIOD_MS: u32 = 10;

    /// Playfield dimensions
    pub const FIELD_WIDTH: i32 = 600;
    pub const FIELD_HEIGHT: i32 = 600;

    /// One grid row/column; also the distance covered by one key press
    pub const MOVE_STEP: i32 = 75;
    /// Velocity magnitude added to every mover on each goal wave
    pub const SPEED_STEP: i32 = 5;

    /// River rows: `[RIVER_TOP, RIVER_BOTTOM)`
    pub const RIVER_TOP: i32 = 75;
    pub const RIVER_BOTTOM: i32 = 300;

    /// Player spawn
    pub const SPAWN_X: i32 = 300;
    pub const SPAWN_Y: i32 = 525;

    /// Floater dive cycle (ticks)
    pub const SUBMERGE_PERIOD: u32 = 1500;
    pub const FLOAT_DURATION: i32 = 600;

    /// Points per scoring zone
    pub const ZONE_VALUE: u32 = 10;
}
