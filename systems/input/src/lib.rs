#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Keyboard state tracking shared by the tutorial simulations.
//!
//! The tracker answers two kinds of question. Continuous simulations read the
//! held state of each key once per tick through [`InputTracker::directional`].
//! Single-shot actions such as turning the snake or restarting a finished game
//! latch the press edge and drain it with [`InputTracker::consume_edge`], so a
//! held key fires its action exactly once.

use std::collections::HashMap;

use playstep_core::{Direction, DirectionalInput, KeyCode};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct KeyState {
    down: bool,
    edge_latched: bool,
}

/// Tracks which keys are held and which presses are still unconsumed.
#[derive(Clone, Debug, Default)]
pub struct InputTracker {
    keys: HashMap<KeyCode, KeyState>,
}

impl InputTracker {
    /// Creates a tracker with every key released.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a key transition reported by the input layer.
    ///
    /// A press latches an edge only when the key was previously released, so
    /// operating-system auto-repeat never produces additional edges. Releasing
    /// the key leaves an unconsumed edge in place so quick taps between ticks
    /// are not lost.
    pub fn set_pressed(&mut self, key: KeyCode, is_down: bool) {
        let state = self.keys.entry(key).or_default();
        if is_down && !state.down {
            state.edge_latched = true;
        }
        state.down = is_down;
    }

    /// Reports whether the key is currently held.
    #[must_use]
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.keys.get(&key).map_or(false, |state| state.down)
    }

    /// Returns `true` at most once per press of `key`, clearing the latch.
    pub fn consume_edge(&mut self, key: KeyCode) -> bool {
        match self.keys.get_mut(&key) {
            Some(state) => std::mem::take(&mut state.edge_latched),
            None => false,
        }
    }

    /// Drains the first pending directional edge, if any.
    ///
    /// All other pending directional edges are discarded so that one tick
    /// observes at most one turn request.
    pub fn take_direction_edge(&mut self) -> Option<Direction> {
        let mut requested = None;
        for key in KeyCode::DIRECTIONAL {
            if self.consume_edge(key) && requested.is_none() {
                requested = key.direction();
            }
        }
        requested
    }

    /// Drains pending restart edges, reporting whether any was present.
    pub fn take_restart_edge(&mut self) -> bool {
        let mut requested = false;
        for key in KeyCode::RESTART {
            requested |= self.consume_edge(key);
        }
        requested
    }

    /// Captures the held state of the four directions.
    #[must_use]
    pub fn directional(&self) -> DirectionalInput {
        let held = |direction: Direction| {
            KeyCode::DIRECTIONAL
                .iter()
                .any(|key| key.direction() == Some(direction) && self.is_pressed(*key))
        };
        DirectionalInput::new(
            held(Direction::Up),
            held(Direction::Down),
            held(Direction::Left),
            held(Direction::Right),
        )
    }

    /// Releases every key and drops all pending edges.
    pub fn release_all(&mut self) {
        self.keys.clear();
    }
}
