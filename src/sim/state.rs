//! World state and entity records
//!
//! The resolver never mutates a state it was handed: every event produces a
//! brand-new `WorldState`. Kind-specific records embed a shared `Body` by value.

use std::fmt;

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Stable identifier correlating an entity with its rendered shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A positioned game object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body {
    pub id: EntityId,
    pub pos: IVec2,
    /// Displacement applied every tick (zero for stationary bodies)
    #[serde(default)]
    pub vel: IVec2,
}

impl Body {
    pub const fn new(id: EntityId, pos: IVec2, vel: IVec2) -> Self {
        Self { id, pos, vel }
    }

    pub const fn stationary(id: EntityId, pos: IVec2) -> Self {
        Self::new(id, pos, IVec2::ZERO)
    }

    /// Same body shifted by `delta`, unwrapped
    pub fn displaced(self, delta: IVec2) -> Self {
        Self {
            pos: self.pos + delta,
            ..self
        }
    }

    /// Grow every non-zero velocity component by `step` in magnitude
    pub fn sped_up(self, step: i32) -> Self {
        Self {
            vel: IVec2::new(ramp(self.vel.x, step), ramp(self.vel.y, step)),
            ..self
        }
    }
}

fn ramp(component: i32, step: i32) -> i32 {
    match component.cmp(&0) {
        std::cmp::Ordering::Greater => component + step,
        std::cmp::Ordering::Less => component - step,
        std::cmp::Ordering::Equal => 0,
    }
}

/// Anything that carries a `Body`
pub trait Embodied: Clone {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;
}

impl Embodied for Body {
    fn body(&self) -> &Body {
        self
    }

    fn body_mut(&mut self) -> &mut Body {
        self
    }
}

/// Submerge timing of a floating entity, in ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmergeCycle {
    /// The countdown is refilled whenever the tick counter is a multiple of this
    pub period: u32,
    /// Ticks spent afloat after each refill
    pub float_duration: i32,
}

/// Turtle-like river entity that periodically dives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Floater {
    pub body: Body,
    pub submerged: bool,
    pub emerge_countdown: i32,
    pub cycle: SubmergeCycle,
}

impl Floater {
    /// A floater that starts afloat with a full countdown
    pub fn new(body: Body, cycle: SubmergeCycle) -> Self {
        Self {
            body,
            submerged: false,
            emerge_countdown: cycle.float_duration,
            cycle,
        }
    }

    /// Advance the dive cycle for tick `elapsed`. Position is untouched.
    pub fn cycled(self, elapsed: u64) -> Self {
        let refill = elapsed % u64::from(self.cycle.period) == 0;
        Self {
            submerged: self.emerge_countdown <= 0,
            emerge_countdown: if refill {
                self.cycle.float_duration
            } else {
                self.emerge_countdown - 1
            },
            ..self
        }
    }
}

impl Embodied for Floater {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

/// Which end of a predator bites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mouth {
    Left,
    Right,
}

/// Crocodile-like river entity, rideable except for its mouth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predator {
    pub body: Body,
    pub kill_zone_width: i32,
    pub mouth: Mouth,
}

impl Embodied for Predator {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

/// Stationary scoring zone, claimable once per goal wave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collectible {
    pub body: Body,
    #[serde(default)]
    pub claimed: bool,
    pub value: u32,
}

impl Collectible {
    pub fn new(body: Body, value: u32) -> Self {
        Self {
            body,
            claimed: false,
            value,
        }
    }
}

impl Embodied for Collectible {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

/// Complete world state
///
/// Collections keep their configured order; the resolver's tie-break relies on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldState {
    pub player: Body,
    #[serde(default)]
    pub platforms: Vec<Body>,
    /// Lethal on contact (cars)
    #[serde(default)]
    pub hazards: Vec<Body>,
    #[serde(default)]
    pub floaters: Vec<Floater>,
    #[serde(default)]
    pub predators: Vec<Predator>,
    #[serde(default)]
    pub collectibles: Vec<Collectible>,
    /// Always `false` in a stored state: a death resets to the initial
    /// configuration within the same tick and is reported as `Outcome::Died`.
    #[serde(default)]
    pub player_died: bool,
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub high_score: u32,
}

impl WorldState {
    /// Every body in the world, player first
    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        std::iter::once(&self.player)
            .chain(&self.platforms)
            .chain(&self.hazards)
            .chain(self.floaters.iter().map(|f| &f.body))
            .chain(self.predators.iter().map(|p| &p.body))
            .chain(self.collectibles.iter().map(|c| &c.body))
    }

    /// True when there is at least one collectible and all are claimed
    pub fn all_claimed(&self) -> bool {
        !self.collectibles.is_empty() && self.collectibles.iter().all(|c| c.claimed)
    }
}
