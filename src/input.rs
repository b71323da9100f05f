//! Event producers
//!
//! Raw key signals become `Event::Move`s and timer firings become
//! `Event::Tick`s. Both feed the same queue in `Game`.

use glam::IVec2;

use crate::sim::Event;

/// The four accepted directional keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
}

impl Key {
    /// Map a DOM `KeyboardEvent.code`; anything else is ignored
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            _ => None,
        }
    }

    /// Unit direction in screen coordinates (y grows downward)
    pub fn direction(self) -> IVec2 {
        match self {
            Key::Left => IVec2::NEG_X,
            Key::Right => IVec2::X,
            Key::Up => IVec2::NEG_Y,
            Key::Down => IVec2::Y,
        }
    }

    fn bit(self) -> u8 {
        match self {
            Key::Left => 1,
            Key::Right => 2,
            Key::Up => 4,
            Key::Down => 8,
        }
    }
}

/// Turns key presses into moves, one per physical press
#[derive(Debug, Clone)]
pub struct InputMapper {
    step: i32,
    /// Keys currently held down (bitset of `Key::bit`)
    held: u8,
}

impl InputMapper {
    pub fn new(step: i32) -> Self {
        Self { step, held: 0 }
    }

    /// A key went down. Auto-repeat and presses of a held key yield nothing.
    pub fn key_down(&mut self, code: &str, repeat: bool) -> Option<Event> {
        let key = Key::from_code(code)?;
        if repeat || self.held & key.bit() != 0 {
            return None;
        }
        self.held |= key.bit();
        Some(Event::Move(key.direction() * self.step))
    }

    /// A key was released
    pub fn key_up(&mut self, code: &str) {
        if let Some(key) = Key::from_code(code) {
            self.held &= !key.bit();
        }
    }

    /// Forget held keys (e.g. focus was lost and releases were never seen)
    pub fn release_all(&mut self) {
        self.held = 0;
    }
}

/// Produces ticks carrying a monotonically increasing counter, starting at 0
#[derive(Debug, Clone, Default)]
pub struct TickClock {
    elapsed: u64,
}

impl TickClock {
    pub fn next_tick(&mut self) -> Event {
        let event = Event::Tick {
            elapsed: self.elapsed,
        };
        self.elapsed += 1;
        event
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_arrow_keys_map_to_moves() {
        let mut input = InputMapper::new(75);
        let cases = [
            ("ArrowLeft", IVec2::new(-75, 0)),
            ("ArrowRight", IVec2::new(75, 0)),
            ("ArrowUp", IVec2::new(0, -75)),
            ("ArrowDown", IVec2::new(0, 75)),
        ];
        for (code, delta) in cases {
            assert_eq!(input.key_down(code, false), Some(Event::Move(delta)));
            input.key_up(code);
        }
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let mut input = InputMapper::new(75);
        assert_eq!(input.key_down("KeyW", false), None);
        assert_eq!(input.key_down("Space", false), None);
        input.key_up("KeyW");
        assert_eq!(input.key_down("ArrowUp", false), Some(Event::Move(IVec2::new(0, -75))));
    }

    #[test]
    fn test_held_key_fires_once() {
        let mut input = InputMapper::new(75);
        assert!(input.key_down("ArrowUp", false).is_some());
        assert_eq!(input.key_down("ArrowUp", true), None);
        assert_eq!(input.key_down("ArrowUp", false), None);
        // Other keys are independent
        assert!(input.key_down("ArrowLeft", false).is_some());
        input.key_up("ArrowUp");
        assert!(input.key_down("ArrowUp", false).is_some());
    }

    #[test]
    fn test_release_all_clears_held_keys() {
        let mut input = InputMapper::new(75);
        assert!(input.key_down("ArrowDown", false).is_some());
        input.release_all();
        assert!(input.key_down("ArrowDown", false).is_some());
    }

    #[test]
    fn test_clock_counts_from_zero() {
        let mut clock = TickClock::default();
        assert_eq!(clock.next_tick(), Event::Tick { elapsed: 0 });
        assert_eq!(clock.next_tick(), Event::Tick { elapsed: 1 });
        assert_eq!(clock.next_tick(), Event::Tick { elapsed: 2 });
    }

    fn arb_signal() -> impl Strategy<Value = (usize, bool, bool)> {
        // (key index, is_press, repeat flag)
        (0usize..5, any::<bool>(), any::<bool>())
    }

    proptest! {
        #[test]
        fn prop_one_move_per_press_release_cycle(signals in prop::collection::vec(arb_signal(), 0..100)) {
            const CODES: [&str; 5] = ["ArrowLeft", "ArrowRight", "ArrowUp", "ArrowDown", "KeyQ"];
            let mut input = InputMapper::new(75);
            let mut down = [false; 5];
            for (i, press, repeat) in signals {
                let code = CODES[i];
                if press {
                    let event = input.key_down(code, repeat);
                    let expect = i < 4 && !repeat && !down[i];
                    prop_assert_eq!(event.is_some(), expect);
                    if expect {
                        down[i] = true;
                    }
                } else {
                    input.key_up(code);
                    down[i] = false;
                }
            }
        }
    }
}
