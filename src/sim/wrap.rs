//! Playfield bounds policy
//!
//! Horizontally the playfield is a loop: a body that has fully left one side
//! re-enters from the other. Vertically it is a wall.

use serde::{Deserialize, Serialize};

use super::geometry::{Dimensions, Size, extent};
use super::state::Embodied;
use crate::error::SimError;

/// Size of the playable area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: i32,
    pub height: i32,
}

impl Playfield {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Apply the bounds policy to a position for a shape of `size`
pub fn wrap_pos(pos: glam::IVec2, size: Size, field: Playfield) -> glam::IVec2 {
    let x = if pos.x > field.width {
        -size.width
    } else if pos.x < -size.width {
        field.width
    } else {
        pos.x
    };
    let y = pos.y.clamp(0, (field.height - size.height).max(0));
    glam::IVec2::new(x, y)
}

/// Apply the bounds policy to any entity, resolving its size through `dims`
pub fn wrap<T: Embodied, D: Dimensions + ?Sized>(
    mut entity: T,
    dims: &D,
    field: Playfield,
) -> Result<T, SimError> {
    let body = entity.body_mut();
    let size = extent(dims, body.id)?;
    body.pos = wrap_pos(body.pos, size, field);
    Ok(entity)
}

#[cfg(test)]
mod tests {
    use glam::IVec2;
    use proptest::prelude::*;

    use super::*;
    use crate::sim::state::{Body, EntityId};

    const FIELD: Playfield = Playfield::new(600, 600);
    const LOG: Size = Size::new(200, 75);

    #[test]
    fn test_exit_right_reenters_left() {
        assert_eq!(wrap_pos(IVec2::new(601, 225), LOG, FIELD), IVec2::new(-200, 225));
        assert_eq!(wrap_pos(IVec2::new(600, 225), LOG, FIELD), IVec2::new(600, 225));
    }

    #[test]
    fn test_exit_left_reenters_right() {
        assert_eq!(wrap_pos(IVec2::new(-201, 225), LOG, FIELD), IVec2::new(600, 225));
        assert_eq!(wrap_pos(IVec2::new(-200, 225), LOG, FIELD), IVec2::new(-200, 225));
    }

    #[test]
    fn test_vertical_clamp() {
        let frog = Size::new(75, 75);
        assert_eq!(wrap_pos(IVec2::new(300, 600), frog, FIELD), IVec2::new(300, 525));
        assert_eq!(wrap_pos(IVec2::new(300, -75), frog, FIELD), IVec2::new(300, 0));
        assert_eq!(wrap_pos(IVec2::new(300, 525), frog, FIELD), IVec2::new(300, 525));
    }

    #[test]
    fn test_wrap_entity_uses_dimensions() {
        let dims = |id: EntityId| (id == EntityId(1)).then_some(LOG);
        let log = Body::new(EntityId(1), IVec2::new(650, 225), IVec2::new(-2, 0));
        let wrapped = wrap(log, &dims, FIELD).unwrap();
        assert_eq!(wrapped.pos, IVec2::new(-200, 225));
        assert_eq!(wrapped.vel, log.vel);

        let stray = Body::stationary(EntityId(7), IVec2::ZERO);
        assert_eq!(
            wrap(stray, &dims, FIELD),
            Err(SimError::MissingDimensions { id: EntityId(7) })
        );
    }

    proptest! {
        #[test]
        fn prop_wrap_is_idempotent(
            x in -2000i32..2000,
            y in -2000i32..2000,
            w in 1i32..600,
            h in 1i32..600,
        ) {
            let size = Size::new(w, h);
            let once = wrap_pos(IVec2::new(x, y), size, FIELD);
            prop_assert_eq!(wrap_pos(once, size, FIELD), once);
        }

        #[test]
        fn prop_wrap_keeps_rows_inside_field(x in -2000i32..2000, y in -2000i32..2000) {
            let frog = Size::new(75, 75);
            let pos = wrap_pos(IVec2::new(x, y), frog, FIELD);
            prop_assert!(pos.y >= 0 && pos.y <= FIELD.height - frog.height);
        }
    }
}
