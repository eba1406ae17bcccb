//! Utility functions and the merit curve.

use crate::error::{ensure_non_negative, MarketError, Result};
use crate::market::{Student, University};
use crate::random::gaussian;
use rand::Rng;

/// Linear map from academic score to a merit factor.
///
/// `factor = (score - baseline) / span`. With the defaults (800, 400) the
/// factor spans roughly -0.5 to +0.75 over scores 600 to 1100 and reaches
/// 2.0 at a perfect 1600.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeritCurve {
    /// Score at which merit is zero.
    pub baseline: f64,
    /// Score distance per unit of merit factor.
    pub span: f64,
}

impl Default for MeritCurve {
    fn default() -> Self {
        Self {
            baseline: 800.0,
            span: 400.0,
        }
    }
}

impl MeritCurve {
    /// Merit factor for `score`. May be negative.
    pub fn factor(&self, score: f64) -> f64 {
        (score - self.baseline) / self.span
    }

    pub fn validate(&self) -> Result<()> {
        if !self.baseline.is_finite() {
            return Err(MarketError::invalid("merit.baseline", "must be finite"));
        }
        if !self.span.is_finite() || self.span <= 0.0 {
            return Err(MarketError::invalid(
                "merit.span",
                format!("must be positive, got {}", self.span),
            ));
        }
        Ok(())
    }
}

/// Parameters of the student and university valuation functions.
///
/// For a student with preference weight `w`, score `s` and EFC `e`:
///
/// ```text
/// prestige_weight = 2w · s / score_scale
/// cost_weight     = 2(1 - w) / (e + 1)
/// utility         = prestige_weight · prestige - cost_weight · net_cost
/// ```
///
/// At `w = 0.5` both factors of two cancel and the utility is the neutral
/// "score-scaled prestige minus EFC-scaled cost".
///
/// # Examples
///
/// ```
/// use u_admissions::market::{Student, StudentId, University, UniversityId};
/// use u_admissions::utility::UtilityModel;
///
/// let model = UtilityModel::default();
/// let s = Student::new(StudentId(0), 1600.0, 0.0, 0.5, 0.0).unwrap();
/// let u = University::new(UniversityId(0), 0.8, 10.0, 50).unwrap();
///
/// // Full aid: no net cost, only prestige counts.
/// assert!((model.choice_utility(&s, &u, 10.0) - 0.8).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UtilityModel {
    /// Score that normalizes academic strength to `[0, 1]`.
    pub score_scale: f64,

    /// Curve students use to estimate the aid they will be offered.
    pub merit: MeritCurve,
}

impl Default for UtilityModel {
    fn default() -> Self {
        Self {
            score_scale: 1600.0,
            merit: MeritCurve::default(),
        }
    }
}

impl UtilityModel {
    pub fn with_score_scale(mut self, scale: f64) -> Self {
        self.score_scale = scale;
        self
    }

    pub fn with_merit_curve(mut self, merit: MeritCurve) -> Self {
        self.merit = merit;
        self
    }

    /// Weight on prestige, growing with score and with the preference weight.
    pub fn prestige_weight(&self, student: &Student) -> f64 {
        2.0 * student.preference_weight() * student.score() / self.score_scale
    }

    /// Weight on net cost; a low EFC makes the student more cost-sensitive.
    pub fn cost_weight(&self, student: &Student) -> f64 {
        2.0 * (1.0 - student.preference_weight()) / (student.efc() + 1.0)
    }

    /// Net cost the student expects before any offer is known.
    ///
    /// The estimated aid is the merit curve applied to the sticker price,
    /// clamped into `[0, cost]`.
    pub fn expected_net_cost(&self, student: &Student, university: &University) -> f64 {
        let cost = university.cost();
        let estimated_aid = (self.merit.factor(student.score()) * cost).clamp(0.0, cost);
        cost - estimated_aid
    }

    /// Application utility without the noise term.
    pub fn expected_application_utility(&self, student: &Student, university: &University) -> f64 {
        self.prestige_weight(student) * university.prestige()
            - self.cost_weight(student) * self.expected_net_cost(student, university)
    }

    /// Application-time utility: expected utility plus `N(0, student.noise)`.
    ///
    /// The noise is drawn on every call.
    pub fn application_utility<R: Rng + ?Sized>(
        &self,
        student: &Student,
        university: &University,
        rng: &mut R,
    ) -> f64 {
        self.expected_application_utility(student, university)
            + gaussian(rng, 0.0, student.noise())
    }

    /// Choice-time utility given a known aid offer. Deterministic.
    pub fn choice_utility(&self, student: &Student, university: &University, aid: f64) -> f64 {
        let net_cost = (university.cost() - aid).max(0.0);
        self.prestige_weight(student) * university.prestige() - self.cost_weight(student) * net_cost
    }

    /// University-side ranking criterion: higher scores are admitted first.
    pub fn admission_priority(&self, student: &Student) -> f64 {
        student.score()
    }

    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("utility.score_scale", self.score_scale)?;
        if self.score_scale == 0.0 {
            return Err(MarketError::invalid("utility.score_scale", "must be positive"));
        }
        self.merit.validate()
    }
}
