//! Fail-fast checks on a world state before it is allowed into the loop

use std::collections::HashSet;

use super::geometry::{Dimensions, extent};
use super::state::WorldState;
use super::wrap::Playfield;
use crate::error::SimError;

/// Reject states the resolver cannot evaluate safely
///
/// Checks id uniqueness, that every body has a usable shape that fits the
/// playfield, submerge cycles, and kill zones.
pub fn validate<D: Dimensions + ?Sized>(
    state: &WorldState,
    dims: &D,
    field: Playfield,
) -> Result<(), SimError> {
    let mut seen = HashSet::new();
    for body in state.bodies() {
        if !seen.insert(body.id) {
            return Err(SimError::DuplicateId { id: body.id });
        }
        let size = extent(dims, body.id)?;
        if size.height > field.height || size.width > field.width {
            return Err(SimError::PlayfieldTooSmall {
                id: body.id,
                size,
                field_width: field.width,
                field_height: field.height,
            });
        }
    }

    if let Some(floater) = state.floaters.iter().find(|f| f.cycle.period == 0) {
        return Err(SimError::InvalidCycle { id: floater.body.id });
    }

    for predator in &state.predators {
        let width = extent(dims, predator.body.id)?.width;
        if !(0..=width).contains(&predator.kill_zone_width) {
            return Err(SimError::InvalidKillZone {
                id: predator.body.id,
                kill_zone: predator.kill_zone_width,
                width,
            });
        }
    }

    Ok(())
}
