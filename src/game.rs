//! The fold loop
//!
//! Ticks and moves land in one FIFO queue. `pump` drains it strictly in
//! arrival order, folding each event through the resolver and handing every
//! resulting state to the render sink.

use std::collections::VecDeque;

use crate::error::SimError;
use crate::input::{InputMapper, TickClock};
use crate::level::Level;
use crate::render::{Frame, RenderSink};
use crate::settings::Settings;
use crate::sim::{self, Context, Event, Outcome, Rules, WorldState};

/// Game instance holding all state
pub struct Game {
    level: Level,
    rules: Rules,
    state: WorldState,
    queue: VecDeque<Event>,
    input: InputMapper,
    clock: TickClock,
    /// First fatal error; once set nothing is folded again
    halted: Option<SimError>,
}

impl Game {
    /// Validate the level and start from its initial configuration
    pub fn new(level: Level, settings: &Settings) -> Result<Self, SimError> {
        sim::validate(&level.initial, &level.shapes, level.playfield)?;
        let rules = level.rules(settings.speed_step);
        log::info!(
            "Starting level '{}' ({}x{}, spawn {:?})",
            level.name,
            level.playfield.width,
            level.playfield.height,
            rules.spawn
        );
        Ok(Self {
            state: level.initial.clone(),
            input: InputMapper::new(level.move_step),
            level,
            rules,
            queue: VecDeque::new(),
            clock: TickClock::default(),
            halted: None,
        })
    }

    pub fn state(&self) -> &WorldState {
        &self.state
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Events waiting to be folded
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// The error that stopped the loop, if any
    pub fn halted(&self) -> Option<&SimError> {
        self.halted.as_ref()
    }

    pub fn push(&mut self, event: Event) {
        if self.halted.is_none() {
            self.queue.push_back(event);
        }
    }

    /// Raw key-down signal from the input source
    pub fn key_down(&mut self, code: &str, repeat: bool) {
        if let Some(event) = self.input.key_down(code, repeat) {
            log::debug!("{code} -> {event:?}");
            self.push(event);
        }
    }

    pub fn key_up(&mut self, code: &str) {
        self.input.key_up(code);
    }

    /// The page lost focus; releases may never arrive
    pub fn blur(&mut self) {
        self.input.release_all();
    }

    /// Timer fired
    pub fn tick(&mut self) {
        let event = self.clock.next_tick();
        self.push(event);
    }

    /// Fold every queued event, presenting each new state. Returns how many
    /// events were consumed. An error halts the game for good: the queue is
    /// discarded, the state stays as it was before the failing event and every
    /// later call returns the same error without folding anything.
    pub fn pump(&mut self, sink: &mut impl RenderSink) -> Result<usize, SimError> {
        if let Some(e) = &self.halted {
            return Err(e.clone());
        }
        let mut folded = 0;
        while let Some(event) = self.queue.pop_front() {
            let ctx = Context {
                dims: &self.level.shapes,
                rules: &self.rules,
                initial: &self.level.initial,
            };
            let step = match sim::step(&self.state, event, &ctx) {
                Ok(step) => step,
                Err(e) => {
                    self.queue.clear();
                    self.halted = Some(e.clone());
                    return Err(e);
                }
            };
            log_outcome(&step.outcome, &step.state);
            self.state = step.state;
            sink.present(&Frame::project(&self.state));
            folded += 1;
        }
        Ok(folded)
    }
}

fn log_outcome(outcome: &Outcome, state: &WorldState) {
    match *outcome {
        Outcome::Moved => log::debug!("Player at {:?}", state.player.pos),
        Outcome::Advanced => {}
        Outcome::Scored { value } => log::debug!("Scored {value}, total {}", state.score),
        Outcome::GoalMet { value } => {
            log::info!("All zones claimed (+{value}), total {}; speeding up", state.score)
        }
        Outcome::Died { cause, score } => {
            log::info!("Player lost ({cause:?}) with {score} points; high score {}", state.high_score)
        }
    }
}
