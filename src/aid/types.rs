//! Core trait for aid policies.

use crate::market::{Student, University};

/// Need-based floor: `max(0, cost - efc)`.
pub fn need(student: &Student, university: &University) -> f64 {
    (university.cost() - student.efc()).max(0.0)
}

/// Computes the aid offered to an admitted student.
///
/// Implementations must be pure. Universities clamp the result to
/// `[0, university.cost()]` before it becomes an offer.
///
/// # Examples
///
/// ```
/// use u_admissions::aid::AidPolicy;
/// use u_admissions::market::{Student, University};
///
/// /// Everyone pays half.
/// struct HalfTuition;
///
/// impl AidPolicy for HalfTuition {
///     fn name(&self) -> &str { "HalfTuition" }
///     fn aid(&self, _student: &Student, university: &University) -> f64 {
///         university.cost() / 2.0
///     }
/// }
/// ```
pub trait AidPolicy: Send + Sync {
    /// Returns a human-readable name for this policy.
    fn name(&self) -> &str;

    /// Aid offered by `university` to `student`.
    fn aid(&self, student: &Student, university: &University) -> f64;
}
