//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Every event yields a brand-new world state
//! - No clocks, no randomness
//! - Stable iteration order (configured collection order)
//! - No rendering or platform dependencies; shape sizes arrive through `Dimensions`

pub mod geometry;
pub mod state;
pub mod tick;
pub mod validate;
pub mod wrap;

pub use geometry::{
    Dimensions, RiverBand, Size, Span, extent, in_hazard_region, in_kill_zone, kill_zone, overlaps,
};
pub use state::{
    Body, Collectible, Embodied, EntityId, Floater, Mouth, Predator, SubmergeCycle, WorldState,
};
pub use tick::{Context, DeathCause, Event, Outcome, Rules, Step, reduce, step};
pub use validate::validate;
pub use wrap::{Playfield, wrap, wrap_pos};
