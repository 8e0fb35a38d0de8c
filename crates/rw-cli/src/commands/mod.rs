pub mod check;
pub mod roll;
pub mod table;

use rand::SeedableRng;
use rand::rngs::{StdRng, ThreadRng};
use rw_dice::{DiceError, DieSource};

use crate::diagnostics::render_dice_error;

/// The die source for a command: seeded when `--seed` is given.
pub enum CliSource {
    Seeded(StdRng),
    Thread(ThreadRng),
}

impl CliSource {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::Seeded(StdRng::seed_from_u64(seed)),
            None => Self::Thread(rand::rng()),
        }
    }
}

impl DieSource for CliSource {
    fn roll_die(&mut self, sides: u32) -> i64 {
        match self {
            Self::Seeded(rng) => rng.roll_die(sides),
            Self::Thread(rng) => rng.roll_die(sides),
        }
    }
}

/// Print a diagnostic for `error` to stderr and turn it into a CLI error.
fn report(error: DiceError) -> String {
    eprint!("{}", render_dice_error(&error));
    error.to_string()
}
