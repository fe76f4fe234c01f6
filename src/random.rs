//! Random number generators for `fill_randn`
//!
//! Every [`RandomGenerator`] owns its engine state, so two generators never
//! influence each other. Calls that are not given a generator draw from a
//! process-wide default, created on first use with an OS-entropy seed.

use parking_lot::{Mutex, MutexGuard};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::OnceLock;

/// Independently seeded pseudo-random engine
///
/// # Example
///
/// ```
/// use hostops::random::RandomGenerator;
///
/// let a = RandomGenerator::seeded(42);
/// assert_eq!(a.seed(), Some(42));
/// ```
#[derive(Debug, Clone)]
pub struct RandomGenerator {
    engine: StdRng,
    seed: Option<u64>,
}

impl RandomGenerator {
    /// Create a generator from an explicit seed, or from OS entropy when `None`
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => {
                tracing::debug!("creating random generator from OS entropy");
                Self {
                    engine: StdRng::from_os_rng(),
                    seed: None,
                }
            }
        }
    }

    /// Create a reproducible generator
    pub fn seeded(seed: u64) -> Self {
        tracing::debug!("creating random generator with seed {seed}");
        Self {
            engine: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// The explicit seed this generator was created with
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Engine the sampling kernels draw from
    pub(crate) fn engine(&mut self) -> &mut StdRng {
        &mut self.engine
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::new(None)
    }
}

static DEFAULT_GENERATOR: OnceLock<Mutex<RandomGenerator>> = OnceLock::new();

/// Lock the process-wide default generator, creating it on first use
///
/// Initialization runs once even when several threads race to it. The
/// generator lives for the rest of the process.
pub fn default_generator() -> MutexGuard<'static, RandomGenerator> {
    DEFAULT_GENERATOR
        .get_or_init(|| Mutex::new(RandomGenerator::new(None)))
        .lock()
}
