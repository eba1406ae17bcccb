//! Market configuration.
//!
//! [`MarketConfig`] holds every tunable of a run except the aid policy,
//! which is a trait object attached to the [`Market`](super::Market).

use super::student::Student;
use crate::error::{ensure_non_negative, MarketError, Result};
use crate::random::gaussian;
use crate::utility::UtilityModel;
use rand::Rng;

/// How many universities a student applies to, and which.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ApplicationStrategy {
    /// Apply everywhere.
    All,

    /// Apply to the `n` universities with the highest application utility.
    TopRanked(usize),

    /// Apply to `n` universities drawn uniformly, ignoring utility.
    RandomSample(usize),

    /// Apply to the top-ranked universities, with a count that depends on
    /// the student:
    ///
    /// ```text
    /// n = base + (efc - efc_pivot) · efc_slope - (score - score_pivot) · score_slope
    ///       + N(0, jitter)
    /// n = trunc(clamp(n, min, max))
    /// ```
    ///
    /// Wealthier students apply more widely; stronger students apply more
    /// selectively.
    Adaptive {
        base: f64,
        efc_pivot: f64,
        efc_slope: f64,
        score_pivot: f64,
        score_slope: f64,
        jitter: f64,
        min: usize,
        max: usize,
    },
}

impl Default for ApplicationStrategy {
    fn default() -> Self {
        ApplicationStrategy::Adaptive {
            base: 7.5,
            efc_pivot: 30.0,
            efc_slope: 0.05,
            score_pivot: 1000.0,
            score_slope: 0.002,
            jitter: 1.0,
            min: 5,
            max: 10,
        }
    }
}

impl ApplicationStrategy {
    /// Number of applications `student` submits when `available`
    /// universities exist. Never exceeds `available`.
    pub fn budget<R: Rng + ?Sized>(&self, student: &Student, available: usize, rng: &mut R) -> usize {
        let wanted = match *self {
            ApplicationStrategy::All => available,
            ApplicationStrategy::TopRanked(n) | ApplicationStrategy::RandomSample(n) => n,
            ApplicationStrategy::Adaptive {
                base,
                efc_pivot,
                efc_slope,
                score_pivot,
                score_slope,
                jitter,
                min,
                max,
            } => {
                let mean = base + (student.efc() - efc_pivot) * efc_slope
                    - (student.score() - score_pivot) * score_slope;
                let drawn = gaussian(rng, mean, jitter);
                drawn.clamp(min as f64, max as f64) as usize
            }
        };
        wanted.min(available)
    }

    /// Whether the strategy picks universities without looking at utility.
    pub fn ignores_utility(&self) -> bool {
        matches!(self, ApplicationStrategy::RandomSample(_))
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            ApplicationStrategy::All => Ok(()),
            ApplicationStrategy::TopRanked(0) | ApplicationStrategy::RandomSample(0) => Err(
                MarketError::invalid("applications", "must allow at least one application"),
            ),
            ApplicationStrategy::TopRanked(_) | ApplicationStrategy::RandomSample(_) => Ok(()),
            ApplicationStrategy::Adaptive {
                base,
                efc_pivot,
                efc_slope,
                score_pivot,
                score_slope,
                jitter,
                min,
                max,
            } => {
                for (field, v) in [
                    ("applications.base", base),
                    ("applications.efc_pivot", efc_pivot),
                    ("applications.efc_slope", efc_slope),
                    ("applications.score_pivot", score_pivot),
                    ("applications.score_slope", score_slope),
                ] {
                    if !v.is_finite() {
                        return Err(MarketError::invalid(field, "must be finite"));
                    }
                }
                ensure_non_negative("applications.jitter", jitter)?;
                if min == 0 {
                    return Err(MarketError::invalid("applications.min", "must be at least 1"));
                }
                if min > max {
                    return Err(MarketError::invalid(
                        "applications.max",
                        format!("must be >= min ({min}), got {max}"),
                    ));
                }
                Ok(())
            }
        }
    }
}

/// How many applicants a university admits relative to its capacity.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OverbookPolicy {
    /// The same factor at every university. `Fixed(1.0)` disables overbooking.
    Fixed(f64),

    /// `base + scale · (1 - prestige)`: less prestigious universities expect
    /// lower yield and overbook more.
    PrestigeScaled { base: f64, scale: f64 },
}

impl Default for OverbookPolicy {
    fn default() -> Self {
        OverbookPolicy::Fixed(1.5)
    }
}

impl OverbookPolicy {
    /// Overbook factor for a university of the given prestige. Always >= 1
    /// for a validated policy.
    pub fn factor(&self, prestige: f64) -> f64 {
        match *self {
            OverbookPolicy::Fixed(f) => f,
            OverbookPolicy::PrestigeScaled { base, scale } => base + scale * (1.0 - prestige),
        }
    }

    /// Number of admission offers: `floor(capacity · factor)`.
    pub fn admits(&self, capacity: usize, prestige: f64) -> usize {
        (capacity as f64 * self.factor(prestige)).floor() as usize
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            OverbookPolicy::Fixed(f) => {
                if !f.is_finite() || f < 1.0 {
                    return Err(MarketError::invalid(
                        "overbook",
                        format!("factor must be finite and >= 1, got {f}"),
                    ));
                }
            }
            OverbookPolicy::PrestigeScaled { base, scale } => {
                if !base.is_finite() || base < 1.0 {
                    return Err(MarketError::invalid(
                        "overbook.base",
                        format!("must be finite and >= 1, got {base}"),
                    ));
                }
                ensure_non_negative("overbook.scale", scale)?;
            }
        }
        Ok(())
    }
}

/// What survives from one cycle to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CyclePolicy {
    /// Every cycle is an independent replay: universities release their
    /// seats and every student starts over.
    #[default]
    Independent,

    /// Later cycles are further rounds of the same season: enrolled
    /// students keep their seat and sit out, universities keep their
    /// enrolled students and overbook only their remaining seats, and only
    /// unmatched students apply again.
    Cumulative,
}

impl CyclePolicy {
    /// Whether universities release their enrolled students on reset.
    pub fn clears_enrollment(&self) -> bool {
        matches!(self, CyclePolicy::Independent)
    }
}

/// Configuration for a market run.
///
/// # Defaults
///
/// ```
/// use u_admissions::market::{MarketConfig, OverbookPolicy};
///
/// let config = MarketConfig::default();
/// assert_eq!(config.overbook, OverbookPolicy::Fixed(1.5));
/// assert!(config.validate().is_ok());
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_admissions::market::{ApplicationStrategy, CyclePolicy, MarketConfig, OverbookPolicy};
///
/// let config = MarketConfig::default()
///     .with_applications(ApplicationStrategy::TopRanked(4))
///     .with_overbook(OverbookPolicy::PrestigeScaled { base: 1.0, scale: 2.0 })
///     .with_cycle_policy(CyclePolicy::Cumulative)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketConfig {
    /// How students pick where to apply.
    pub applications: ApplicationStrategy,

    /// How far universities admit beyond capacity.
    pub overbook: OverbookPolicy,

    /// Reset semantics between cycles.
    pub cycle_policy: CyclePolicy,

    /// Valuation functions.
    pub utility: UtilityModel,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Whether to fan phases out over rayon (requires the `parallel`
    /// feature). Results are identical either way.
    pub parallel: bool,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            applications: ApplicationStrategy::default(),
            overbook: OverbookPolicy::default(),
            cycle_policy: CyclePolicy::default(),
            utility: UtilityModel::default(),
            seed: None,
            parallel: true,
        }
    }
}

impl MarketConfig {
    pub fn with_applications(mut self, strategy: ApplicationStrategy) -> Self {
        self.applications = strategy;
        self
    }

    pub fn with_overbook(mut self, policy: OverbookPolicy) -> Self {
        self.overbook = policy;
        self
    }

    pub fn with_cycle_policy(mut self, policy: CyclePolicy) -> Self {
        self.cycle_policy = policy;
        self
    }

    pub fn with_utility(mut self, utility: UtilityModel) -> Self {
        self.utility = utility;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel phase execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Every student applies everywhere and universities admit exactly
    /// their capacity.
    pub fn baseline() -> Self {
        Self {
            applications: ApplicationStrategy::All,
            overbook: OverbookPolicy::Fixed(1.0),
            ..Self::default()
        }
    }

    /// Five applications drawn at random, prestige-scaled overbooking
    /// `1 + 5 · (1 - prestige)`.
    pub fn competitive() -> Self {
        Self {
            applications: ApplicationStrategy::RandomSample(5),
            overbook: OverbookPolicy::PrestigeScaled {
                base: 1.0,
                scale: 5.0,
            },
            ..Self::default()
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        self.applications.validate()?;
        self.overbook.validate()?;
        self.utility.validate()
    }
}
