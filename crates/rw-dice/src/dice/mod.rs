//! Die sources and rolling.
//!
//! Every roll draws from a [`DieSource`] passed in by the caller, so a
//! seeded `StdRng` or a [`ScriptedSource`] makes rolls reproducible.

pub mod group;
pub mod roll;

pub use group::roll_group;
pub use roll::{DieGroupResult, RollResult};

use rand::Rng;
use rand::rngs::{StdRng, ThreadRng};

/// Something that can roll a single die.
pub trait DieSource {
    /// Roll one die with `sides` faces, returning a value in `1..=sides`.
    fn roll_die(&mut self, sides: u32) -> i64;
}

impl DieSource for StdRng {
    fn roll_die(&mut self, sides: u32) -> i64 {
        i64::from(self.random_range(1..=sides.max(1)))
    }
}

impl DieSource for ThreadRng {
    fn roll_die(&mut self, sides: u32) -> i64 {
        i64::from(self.random_range(1..=sides.max(1)))
    }
}

/// A die source that replays a fixed script of values, cycling when it
/// runs out. Ignores the number of sides.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    values: Vec<i64>,
    calls: usize,
}

impl ScriptedSource {
    /// Create a source that yields `values` in order.
    pub fn new(values: impl Into<Vec<i64>>) -> Self {
        Self {
            values: values.into(),
            calls: 0,
        }
    }

    /// How many dice have been rolled so far.
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl DieSource for ScriptedSource {
    fn roll_die(&mut self, _sides: u32) -> i64 {
        let value = match self.values.len() {
            0 => 1,
            len => self.values[self.calls % len],
        };
        self.calls += 1;
        value
    }
}
