//! Built-in aid policies.

use super::types::{need, AidPolicy};
use crate::error::{ensure_non_negative, Result};
use crate::market::{Student, University};
use crate::utility::MeritCurve;

/// Pays exactly the student's need.
///
/// ```text
/// aid = clamp(max(0, cost - efc), 0, cost)
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NeedOnlyAid;

impl AidPolicy for NeedOnlyAid {
    fn name(&self) -> &str {
        "NeedOnly"
    }

    fn aid(&self, student: &Student, university: &University) -> f64 {
        need(student, university).clamp(0.0, university.cost())
    }
}

/// Pays merit aid, but never more than need.
///
/// ```text
/// aid = clamp(min(need, merit_factor · cost), 0, cost)
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NeedCappedMeritAid {
    pub merit: MeritCurve,
    /// Truncate to whole currency units.
    pub whole_units: bool,
}

impl NeedCappedMeritAid {
    pub fn with_whole_units(mut self, whole: bool) -> Self {
        self.whole_units = whole;
        self
    }
}

impl AidPolicy for NeedCappedMeritAid {
    fn name(&self) -> &str {
        "NeedCappedMerit"
    }

    fn aid(&self, student: &Student, university: &University) -> f64 {
        let cost = university.cost();
        let merit_aid = self.merit.factor(student.score()) * cost;
        let raw = need(student, university).min(merit_aid);
        let raw = if self.whole_units { raw.trunc() } else { raw };
        raw.clamp(0.0, cost)
    }
}

/// Merit aid allowed to exceed need at less prestigious universities.
///
/// ```text
/// need        = max(0, cost - efc)
/// merit_boost = cost · merit_slack · (1 - prestige)
/// max_aid     = min(cost, need + merit_boost)
/// aid         = clamp(merit_factor · cost, 0, max_aid)
/// ```
///
/// At prestige 1 the boost vanishes and the policy degenerates to
/// need-capped merit aid.
///
/// # Examples
///
/// ```
/// use u_admissions::aid::{AidPolicy, MeritAugmentedAid};
/// use u_admissions::market::{Student, StudentId, University, UniversityId};
///
/// let policy = MeritAugmentedAid::default();
/// // No need (efc > cost), but a strong score at a mid-prestige school.
/// let s = Student::new(StudentId(0), 1500.0, 100.0, 0.5, 0.0).unwrap();
/// let u = University::new(UniversityId(0), 0.6, 50.0, 10).unwrap();
///
/// let aid = policy.aid(&s, &u);
/// assert!((aid - 5.0).abs() < 1e-12); // 50 · 0.25 · 0.4
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MeritAugmentedAid {
    pub merit: MeritCurve,
    /// Fraction of cost a prestige-0 university may add above need.
    pub merit_slack: f64,
    /// Truncate the cap and the merit award to whole currency units.
    pub whole_units: bool,
}

impl Default for MeritAugmentedAid {
    fn default() -> Self {
        Self {
            merit: MeritCurve::default(),
            merit_slack: 0.25,
            whole_units: false,
        }
    }
}

impl MeritAugmentedAid {
    /// Creates the policy with a custom slack.
    ///
    /// Fails when `merit_slack` is negative or not finite.
    pub fn new(merit_slack: f64) -> Result<Self> {
        ensure_non_negative("merit_slack", merit_slack)?;
        Ok(Self {
            merit_slack,
            ..Self::default()
        })
    }

    pub fn with_merit_curve(mut self, merit: MeritCurve) -> Self {
        self.merit = merit;
        self
    }

    pub fn with_whole_units(mut self, whole: bool) -> Self {
        self.whole_units = whole;
        self
    }

    /// Upper bound on the aid `university` may offer `student`.
    pub fn max_aid(&self, student: &Student, university: &University) -> f64 {
        let cost = university.cost();
        let boost = cost * self.merit_slack * (1.0 - university.prestige());
        let cap = need(student, university) + boost;
        let cap = if self.whole_units { cap.trunc() } else { cap };
        cost.min(cap)
    }
}

impl AidPolicy for MeritAugmentedAid {
    fn name(&self) -> &str {
        "MeritAugmented"
    }

    fn aid(&self, student: &Student, university: &University) -> f64 {
        let merit_aid = self.merit.factor(student.score()) * university.cost();
        let merit_aid = if self.whole_units {
            merit_aid.trunc()
        } else {
            merit_aid
        };
        merit_aid.min(self.max_aid(student, university)).max(0.0)
    }
}
