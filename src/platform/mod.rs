//! Platform abstraction layer
//!
//! Browser glue lives here, behind `cfg(target_arch = "wasm32")`:
//! - SVG scaffolding (one `rect` per configured shape)
//! - Render sink that only mutates attributes and HUD text
//!
//! Nothing in `sim` depends on this module.

#[cfg(target_arch = "wasm32")]
pub mod web;
