//! Render sync
//!
//! A `Frame` is a pure projection of a world state; a `RenderSink` puts it on
//! screen. Nothing here can reach back into the simulation.

use glam::IVec2;

use crate::sim::{EntityId, WorldState};

/// Fills used to show dynamic status
pub mod palette {
    pub const AFLOAT: &str = "fill: rgb(135,206,235);";
    pub const SUBMERGED: &str = "fill: rgb(139,0,0);";
    pub const UNCLAIMED: &str = "fill: rgb(241,196,15);";
    pub const CLAIMED: &str = "fill: rgb(241,148,138);";
}

/// How a shape should look beyond its position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Look {
    /// Keep the configured fill
    Plain,
    Afloat,
    Submerged,
    Unclaimed,
    Claimed,
}

impl Look {
    /// Style override, if any
    pub fn style(self) -> Option<&'static str> {
        match self {
            Look::Plain => None,
            Look::Afloat => Some(palette::AFLOAT),
            Look::Submerged => Some(palette::SUBMERGED),
            Look::Unclaimed => Some(palette::UNCLAIMED),
            Look::Claimed => Some(palette::CLAIMED),
        }
    }
}

/// Placement of one shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    pub id: EntityId,
    pub pos: IVec2,
    pub look: Look,
}

impl Sprite {
    /// SVG `transform` attribute value
    pub fn transform(&self) -> String {
        format!("translate({},{})", self.pos.x, self.pos.y)
    }
}

/// Everything a view needs to show one state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub sprites: Vec<Sprite>,
    pub score_text: String,
    pub high_score_text: String,
}

impl Frame {
    pub fn project(state: &WorldState) -> Self {
        let plain = |b: &crate::sim::Body| Sprite {
            id: b.id,
            pos: b.pos,
            look: Look::Plain,
        };

        let mut sprites = Vec::with_capacity(state.bodies().count());
        sprites.push(plain(&state.player));
        sprites.extend(state.platforms.iter().map(plain));
        sprites.extend(state.hazards.iter().map(plain));
        sprites.extend(state.predators.iter().map(|p| plain(&p.body)));
        sprites.extend(state.floaters.iter().map(|f| Sprite {
            look: if f.submerged {
                Look::Submerged
            } else {
                Look::Afloat
            },
            ..plain(&f.body)
        }));
        sprites.extend(state.collectibles.iter().map(|c| Sprite {
            look: if c.claimed {
                Look::Claimed
            } else {
                Look::Unclaimed
            },
            ..plain(&c.body)
        }));

        Self {
            sprites,
            score_text: format!("Points Obtained : {}", state.score),
            high_score_text: format!("High Score : {}", state.high_score),
        }
    }
}

/// Consumer of frames (SVG in the browser, logs natively, recorders in tests)
pub trait RenderSink {
    fn present(&mut self, frame: &Frame);
}

/// Logs the HUD line of every frame at trace level
#[derive(Debug, Default)]
pub struct LogSink {
    pub frames: u64,
}

impl RenderSink for LogSink {
    fn present(&mut self, frame: &Frame) {
        self.frames += 1;
        log::trace!(
            "frame {}: {} | {}",
            self.frames,
            frame.score_text,
            frame.high_score_text
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;

    #[test]
    fn test_projection_covers_every_body() {
        let state = Level::classic().initial;
        let frame = Frame::project(&state);
        assert_eq!(frame.sprites.len(), state.bodies().count());
        assert_eq!(frame.sprites[0].id, state.player.id);
        assert_eq!(frame.sprites[0].transform(), "translate(300,525)");
        assert_eq!(frame.score_text, "Points Obtained : 0");
        assert_eq!(frame.high_score_text, "High Score : 0");
    }

    #[test]
    fn test_status_looks() {
        let mut state = Level::classic().initial;
        state.floaters[0].submerged = true;
        state.collectibles[2].claimed = true;
        state.score = 30;
        state.high_score = 40;

        let frame = Frame::project(&state);
        let look_of = |id| frame.sprites.iter().find(|s| s.id == id).map(|s| s.look);
        assert_eq!(look_of(state.floaters[0].body.id), Some(Look::Submerged));
        assert_eq!(look_of(state.collectibles[2].body.id), Some(Look::Claimed));
        assert_eq!(look_of(state.collectibles[0].body.id), Some(Look::Unclaimed));
        assert_eq!(look_of(state.platforms[0].id), Some(Look::Plain));
        assert_eq!(Look::Submerged.style(), Some(palette::SUBMERGED));
        assert_eq!(Look::Plain.style(), None);
        assert_eq!(frame.score_text, "Points Obtained : 30");
        assert_eq!(frame.high_score_text, "High Score : 40");
    }
}
