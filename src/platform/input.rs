//! Input sources
//!
//! Keyboard handling belongs to whatever front end embeds the game; the loop
//! only asks an `InputSource` for the next tick's `TickInput`.

use std::collections::VecDeque;

use crate::sim::{TickInput, World, autopilot_input};

/// Produces the input for the next tick
pub trait InputSource {
    fn poll(&mut self, world: &World) -> TickInput;
}

/// The demo AI
#[derive(Debug, Default, Clone, Copy)]
pub struct Autopilot;

impl InputSource for Autopilot {
    fn poll(&mut self, world: &World) -> TickInput {
        autopilot_input(world)
    }
}

/// Presses nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct Idle;

impl InputSource for Idle {
    fn poll(&mut self, _world: &World) -> TickInput {
        TickInput::default()
    }
}

/// Replays a fixed list of inputs, then a fallback forever
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    script: VecDeque<TickInput>,
    fallback: TickInput,
}

impl ScriptedInput {
    /// Idle once the script runs out
    pub fn new(script: impl IntoIterator<Item = TickInput>) -> Self {
        Self {
            script: script.into_iter().collect(),
            fallback: TickInput::default(),
        }
    }

    /// Quit once the script runs out
    pub fn then_quit(mut self) -> Self {
        self.fallback = TickInput {
            quit: true,
            ..Default::default()
        };
        self
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _world: &World) -> TickInput {
        self.script
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_then_fallback() {
        let world = World::new();
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        let mut input = ScriptedInput::new([fire.clone()]);
        assert_eq!(input.poll(&world), fire);
        assert_eq!(input.poll(&world), TickInput::default());

        let mut input = ScriptedInput::new(Vec::new()).then_quit();
        assert!(input.poll(&world).quit);
        assert!(input.poll(&world).quit);
    }

    #[test]
    fn test_autopilot_matches_driver() {
        let world = World::new();
        assert_eq!(Autopilot.poll(&world), autopilot_input(&world));
        assert_eq!(Idle.poll(&world), TickInput::default());
    }
}
