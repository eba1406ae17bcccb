//! The admissions market: entities, configuration and the cycle engine.
//!
//! # Entities
//!
//! - [`Student`]: score, EFC, preference weight, application noise, plus
//!   the per-round applications, offers and enrollment.
//! - [`University`]: prestige, cost, capacity, plus the per-round applicant
//!   pool and the enrolled students.
//!
//! Students and universities refer to each other by [`StudentId`] and
//! [`UniversityId`], which are indices into the [`Market`]'s registries.
//!
//! # Cycle
//!
//! [`Market::run_cycle`] executes one round in three barrier-separated
//! phases:
//!
//! 1. **Apply**: every student ranks all universities by noisy application
//!    utility and applies to a subset chosen by the [`ApplicationStrategy`].
//! 2. **Admit**: every university admits its top applicants by score, up
//!    to `capacity · overbook_factor`, attaching aid from the market's
//!    [`AidPolicy`](crate::aid::AidPolicy).
//! 3. **Choose**: every student with offers ranks them by choice utility and
//!    enrolls at the best one that still has a seat.
//!
//! With the `parallel` feature the pure part of each phase fans out over
//! rayon; all mutations are committed in id order afterwards, so results
//! do not depend on thread scheduling.

mod config;
mod engine;
mod report;
mod student;
mod types;
mod university;

pub use config::{ApplicationStrategy, CyclePolicy, MarketConfig, OverbookPolicy};
pub use engine::Market;
pub use report::{AidNeedPoint, CycleSummary, MarketReport, UniversityReport};
pub use student::Student;
pub use types::{Admission, Offer, StudentId, UniversityId};
pub use university::University;
