//! Subjective valuations driving both sides of the market.
//!
//! - [`UtilityModel::application_utility`]: a student's noisy, pre-aid
//!   valuation of a university, used to decide where to apply.
//! - [`UtilityModel::choice_utility`]: the noise-free valuation once the
//!   aid offer is known, used to choose among offers.
//! - [`UtilityModel::admission_priority`]: the university's criterion over
//!   applicants.
//!
//! The two student-side utilities share their prestige and cost weighting
//! but differ in the net cost they use and in the noise term. They are kept
//! as separate functions on purpose and must not be substituted for each
//! other.
//!
//! [`MeritCurve`] maps a score to a merit factor; it is shared with the aid
//! policies, which is what lets a student's expected aid track the aid a
//! merit-based university would actually offer.

mod model;

pub use model::{MeritCurve, UtilityModel};
