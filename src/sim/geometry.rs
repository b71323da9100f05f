//! Axis-aligned overlap tests
//!
//! Entities only interact when they sit on exactly the same row, so every
//! check reduces to intersecting half-open horizontal spans `[x, x + width)`.
//! Dimensions are not stored on entities; they come from a `Dimensions`
//! provider passed in by the caller.

use serde::{Deserialize, Serialize};

use super::state::{Body, EntityId, Mouth, Predator};
use super::wrap::Playfield;
use crate::error::SimError;

/// Width and height of a rendered shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Resolves an entity identifier to its shape dimensions
pub trait Dimensions {
    fn size_of(&self, id: EntityId) -> Option<Size>;
}

impl<F> Dimensions for F
where
    F: Fn(EntityId) -> Option<Size>,
{
    fn size_of(&self, id: EntityId) -> Option<Size> {
        self(id)
    }
}

/// Look up a usable size, failing on unknown ids and empty shapes
pub fn extent<D: Dimensions + ?Sized>(dims: &D, id: EntityId) -> Result<Size, SimError> {
    let size = dims.size_of(id).ok_or(SimError::MissingDimensions { id })?;
    if size.width <= 0 || size.height <= 0 {
        return Err(SimError::DegenerateShape { id, size });
    }
    Ok(size)
}

/// Half-open horizontal interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: i32,
    pub end: i32,
}

impl Span {
    pub const fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    pub fn intersects(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

fn span_of<D: Dimensions + ?Sized>(body: &Body, dims: &D) -> Result<Span, SimError> {
    let size = extent(dims, body.id)?;
    Ok(Span::new(body.pos.x, body.pos.x + size.width))
}

/// True iff both bodies share a row and their horizontal spans intersect
pub fn overlaps<D: Dimensions + ?Sized>(a: &Body, b: &Body, dims: &D) -> Result<bool, SimError> {
    let (span_a, span_b) = (span_of(a, dims)?, span_of(b, dims)?);
    Ok(a.pos.y == b.pos.y && span_a.intersects(&span_b))
}

/// The lethal part of a predator's span
pub fn kill_zone<D: Dimensions + ?Sized>(predator: &Predator, dims: &D) -> Result<Span, SimError> {
    let body = span_of(&predator.body, dims)?;
    Ok(match predator.mouth {
        Mouth::Left => Span::new(body.start, body.start + predator.kill_zone_width),
        Mouth::Right => Span::new(body.end - predator.kill_zone_width, body.end),
    })
}

/// True iff `player` shares the predator's row and touches its mouth
pub fn in_kill_zone<D: Dimensions + ?Sized>(
    player: &Body,
    predator: &Predator,
    dims: &D,
) -> Result<bool, SimError> {
    let zone = kill_zone(predator, dims)?;
    let span = span_of(player, dims)?;
    Ok(player.pos.y == predator.body.pos.y && span.intersects(&zone))
}

/// Vertical range of rows that drown anything not riding something
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiverBand {
    /// First river row (inclusive)
    pub top: i32,
    /// First row below the river (exclusive)
    pub bottom: i32,
}

impl RiverBand {
    pub fn contains_row(&self, y: i32) -> bool {
        (self.top..self.bottom).contains(&y)
    }
}

/// True iff the body's origin lies inside the river and inside the playfield
pub fn in_hazard_region(body: &Body, river: RiverBand, field: Playfield) -> bool {
    river.contains_row(body.pos.y) && (0..field.width).contains(&body.pos.x)
}

#[cfg(test)]
mod tests {
    use glam::IVec2;

    use super::*;

    const PLAYER: EntityId = EntityId(0);
    const LOG: EntityId = EntityId(1);
    const CROC: EntityId = EntityId(2);

    fn dims(id: EntityId) -> Option<Size> {
        match id {
            PLAYER => Some(Size::new(75, 75)),
            LOG => Some(Size::new(200, 75)),
            CROC => Some(Size::new(400, 75)),
            EntityId(9) => Some(Size::new(0, 75)),
            _ => None,
        }
    }

    fn body(id: EntityId, x: i32, y: i32) -> Body {
        Body::stationary(id, IVec2::new(x, y))
    }

    fn croc(mouth: Mouth) -> Predator {
        Predator {
            body: body(CROC, 300, 150),
            kill_zone_width: 30,
            mouth,
        }
    }

    #[test]
    fn test_overlap_requires_same_row() {
        let log = body(LOG, 300, 225);
        assert!(overlaps(&body(PLAYER, 300, 225), &log, &dims).unwrap());
        assert!(!overlaps(&body(PLAYER, 300, 300), &log, &dims).unwrap());
    }

    #[test]
    fn test_overlap_spans_are_half_open() {
        let log = body(LOG, 300, 225);
        // Touching edges do not overlap
        assert!(!overlaps(&body(PLAYER, 225, 225), &log, &dims).unwrap());
        assert!(!overlaps(&body(PLAYER, 500, 225), &log, &dims).unwrap());
        assert!(overlaps(&body(PLAYER, 226, 225), &log, &dims).unwrap());
        assert!(overlaps(&body(PLAYER, 499, 225), &log, &dims).unwrap());
    }

    #[test]
    fn test_left_mouth_kill_zone() {
        let croc = croc(Mouth::Left);
        assert_eq!(kill_zone(&croc, &dims).unwrap(), Span::new(300, 330));
        assert!(in_kill_zone(&body(PLAYER, 300, 150), &croc, &dims).unwrap());
        assert!(!in_kill_zone(&body(PLAYER, 330, 150), &croc, &dims).unwrap());
        assert!(!in_kill_zone(&body(PLAYER, 600, 150), &croc, &dims).unwrap());
        assert!(!in_kill_zone(&body(PLAYER, 300, 75), &croc, &dims).unwrap());
    }

    #[test]
    fn test_right_mouth_kill_zone() {
        let croc = croc(Mouth::Right);
        assert_eq!(kill_zone(&croc, &dims).unwrap(), Span::new(670, 700));
        assert!(in_kill_zone(&body(PLAYER, 600, 150), &croc, &dims).unwrap());
        assert!(!in_kill_zone(&body(PLAYER, 300, 150), &croc, &dims).unwrap());
    }

    #[test]
    fn test_hazard_region_bounds() {
        let river = RiverBand { top: 75, bottom: 300 };
        let field = Playfield::new(600, 600);
        assert!(in_hazard_region(&body(PLAYER, 300, 75), river, field));
        assert!(in_hazard_region(&body(PLAYER, 0, 225), river, field));
        assert!(!in_hazard_region(&body(PLAYER, 300, 300), river, field));
        assert!(!in_hazard_region(&body(PLAYER, 300, 0), river, field));
        assert!(!in_hazard_region(&body(PLAYER, 600, 150), river, field));
        assert!(!in_hazard_region(&body(PLAYER, -75, 150), river, field));
    }

    #[test]
    fn test_unknown_and_degenerate_shapes_are_fatal() {
        let ghost = body(EntityId(42), 0, 0);
        assert_eq!(
            overlaps(&body(PLAYER, 0, 0), &ghost, &dims),
            Err(SimError::MissingDimensions { id: EntityId(42) })
        );

        let flat = body(EntityId(9), 0, 0);
        assert_eq!(
            extent(&dims, flat.id),
            Err(SimError::DegenerateShape {
                id: EntityId(9),
                size: Size::new(0, 75)
            })
        );
    }
}
