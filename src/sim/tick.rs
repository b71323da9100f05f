//! Event resolution
//!
//! `step` folds one event into a world state and returns a brand-new state.
//! It is pure: the same state and event always produce the same successor.

use glam::IVec2;

use super::geometry::{Dimensions, RiverBand, in_hazard_region, in_kill_zone, overlaps};
use super::state::{Body, Collectible, Embodied, Floater, WorldState};
use super::wrap::{Playfield, wrap};
use crate::error::SimError;

/// One entry of the merged event stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Discrete player displacement from input
    Move(IVec2),
    /// Periodic simulation step carrying the elapsed tick counter
    Tick { elapsed: u64 },
}

/// Fixed rules of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    pub playfield: Playfield,
    /// Where the player reappears after scoring
    pub spawn: IVec2,
    pub river: RiverBand,
    /// Velocity magnitude added to every mover on each goal wave
    pub speed_step: i32,
}

/// Everything the resolver reads besides the state itself
pub struct Context<'a, D: ?Sized> {
    pub dims: &'a D,
    pub rules: &'a Rules,
    /// Configuration restored wholesale when the player dies
    pub initial: &'a WorldState,
}

/// How the player was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    /// In the river without anything to stand on
    Drowned,
    /// Riding a floater as it dived
    Submerged,
    /// Standing in a predator's mouth
    Eaten,
    /// Hit by a hazard
    RunOver,
}

/// What a single event did, for logging and presentation only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Moved,
    Advanced,
    Scored { value: u32 },
    /// Every collectible was claimed; movers sped up. `value` is what this
    /// tick's landing earned (zero for an already-claimed zone).
    GoalMet { value: u32 },
    Died { cause: DeathCause, score: u32 },
}

/// Successor state plus what happened on the way
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub state: WorldState,
    pub outcome: Outcome,
}

/// Fold one event into `state`
pub fn reduce<D: Dimensions + ?Sized>(
    state: &WorldState,
    event: Event,
    ctx: &Context<'_, D>,
) -> Result<WorldState, SimError> {
    step(state, event, ctx).map(|step| step.state)
}

/// Fold one event into `state`, reporting the outcome
pub fn step<D: Dimensions + ?Sized>(
    state: &WorldState,
    event: Event,
    ctx: &Context<'_, D>,
) -> Result<Step, SimError> {
    match event {
        Event::Move(delta) => {
            let player = wrap(state.player.displaced(delta), ctx.dims, ctx.rules.playfield)?;
            Ok(Step {
                state: WorldState {
                    player,
                    ..state.clone()
                },
                outcome: Outcome::Moved,
            })
        }
        Event::Tick { elapsed } => tick(state, elapsed, ctx),
    }
}

/// Result of resolving the player against whatever it stands on
enum Fate {
    Safe(Body),
    Scored(Body, u32),
    Dead(DeathCause),
}

/// The last entity in `items` the player overlaps
fn standing_on<'s, T: Embodied, D: Dimensions + ?Sized>(
    player: &Body,
    items: &'s [T],
    dims: &D,
) -> Result<Option<&'s T>, SimError> {
    let mut found = None;
    for item in items {
        if overlaps(player, item.body(), dims)? {
            found = Some(item);
        }
    }
    Ok(found)
}

fn resolve_player<D: Dimensions + ?Sized>(
    state: &WorldState,
    ctx: &Context<'_, D>,
) -> Result<Fate, SimError> {
    let (player, dims) = (&state.player, ctx.dims);
    let ride = |carrier: &Body| wrap(player.displaced(carrier.vel), dims, ctx.rules.playfield);

    if let Some(platform) = standing_on(player, &state.platforms, dims)? {
        return Ok(Fate::Safe(ride(platform)?));
    }
    if let Some(floater) = standing_on(player, &state.floaters, dims)? {
        return Ok(if floater.submerged {
            Fate::Dead(DeathCause::Submerged)
        } else {
            Fate::Safe(ride(&floater.body)?)
        });
    }
    if let Some(predator) = standing_on(player, &state.predators, dims)? {
        return Ok(if in_kill_zone(player, predator, dims)? {
            Fate::Dead(DeathCause::Eaten)
        } else {
            Fate::Safe(ride(&predator.body)?)
        });
    }
    if standing_on(player, &state.hazards, dims)?.is_some() {
        return Ok(Fate::Dead(DeathCause::RunOver));
    }
    if let Some(zone) = standing_on(player, &state.collectibles, dims)? {
        let home = Body {
            pos: ctx.rules.spawn,
            ..*player
        };
        let value = if zone.claimed { 0 } else { zone.value };
        return Ok(Fate::Scored(home, value));
    }
    if in_hazard_region(player, ctx.rules.river, ctx.rules.playfield) {
        return Ok(Fate::Dead(DeathCause::Drowned));
    }
    Ok(Fate::Safe(*player))
}

/// Add velocity to position, then apply the bounds policy
fn advance<T: Embodied, D: Dimensions + ?Sized>(
    items: &[T],
    dims: &D,
    field: Playfield,
) -> Result<Vec<T>, SimError> {
    items
        .iter()
        .map(|item| {
            let mut moved = item.clone();
            let body = moved.body_mut();
            *body = body.displaced(body.vel);
            wrap(moved, dims, field)
        })
        .collect()
}

fn speed_up<T: Embodied>(items: &mut [T], step: i32) {
    for item in items {
        let body = item.body_mut();
        *body = body.sped_up(step);
    }
}

fn tick<D: Dimensions + ?Sized>(
    state: &WorldState,
    elapsed: u64,
    ctx: &Context<'_, D>,
) -> Result<Step, SimError> {
    let dims = ctx.dims;
    let field = ctx.rules.playfield;

    let (player, scored) = match resolve_player(state, ctx)? {
        Fate::Dead(cause) => {
            let reset = WorldState {
                high_score: state.high_score.max(state.score),
                score: 0,
                ..ctx.initial.clone()
            };
            return Ok(Step {
                state: reset,
                outcome: Outcome::Died {
                    cause,
                    score: state.score,
                },
            });
        }
        Fate::Safe(player) => (player, None),
        Fate::Scored(player, value) => (player, Some(value)),
    };

    // Claims are judged against where the player stood before this tick
    let mut collectibles = state
        .collectibles
        .iter()
        .map(|c| -> Result<Collectible, SimError> {
            Ok(Collectible {
                claimed: c.claimed || overlaps(&state.player, &c.body, dims)?,
                ..*c
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let goal_met = !collectibles.is_empty() && collectibles.iter().all(|c| c.claimed);

    let floaters: Vec<Floater> = state.floaters.iter().map(|f| f.cycled(elapsed)).collect();
    let mut next = WorldState {
        player,
        platforms: advance(&state.platforms, dims, field)?,
        hazards: advance(&state.hazards, dims, field)?,
        floaters: advance(&floaters, dims, field)?,
        predators: advance(&state.predators, dims, field)?,
        collectibles: Vec::new(),
        player_died: false,
        score: state.score + scored.unwrap_or(0),
        high_score: state.high_score,
    };

    let outcome = if goal_met {
        let step = ctx.rules.speed_step;
        speed_up(&mut next.platforms, step);
        speed_up(&mut next.hazards, step);
        speed_up(&mut next.floaters, step);
        speed_up(&mut next.predators, step);
        for c in &mut collectibles {
            c.claimed = false;
        }
        Outcome::GoalMet {
            value: scored.unwrap_or(0),
        }
    } else {
        match scored {
            Some(value) => Outcome::Scored { value },
            None => Outcome::Advanced,
        }
    };
    next.collectibles = collectibles;

    Ok(Step {
        state: next,
        outcome,
    })
}
