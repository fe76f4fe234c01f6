//! Host client configuration

/// Tie rule applied by the `round` conversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoundingMode {
    /// 2.5 rounds to 3, -2.5 rounds to -3
    #[default]
    HalfAwayFromZero,
    /// 2.5 rounds to 2, 3.5 rounds to 4
    HalfToEven,
}

impl RoundingMode {
    /// Round a value to an integral value under this tie rule
    #[inline]
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Self::HalfAwayFromZero => x.round(),
            Self::HalfToEven => x.round_ties_even(),
        }
    }
}

/// Configuration for a [`HostClient`](super::HostClient)
///
/// The default matches conventional rounding: ties go away from zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostConfig {
    /// Tie rule for `round`
    pub rounding: RoundingMode,
}

impl HostConfig {
    /// Configuration with ties rounded to even, as IEEE-754 `roundeven` does
    pub const HALF_TO_EVEN: Self = Self {
        rounding: RoundingMode::HalfToEven,
    };

    /// Replace the rounding tie rule
    pub fn with_rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }
}
