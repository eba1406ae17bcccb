//! Two-sided college admissions market simulation.
//!
//! Students with heterogeneous scores, ability to pay and tastes apply to
//! universities; universities admit under capacity constraints and attach
//! financial aid; students choose among competing offers.
//!
//! - **Utility** ([`utility`]): application-time and choice-time valuations
//!   of a university by a student, and the university's ranking criterion.
//! - **Aid** ([`aid`]): swappable aid policies (need-only, need-capped
//!   merit, merit-augmented).
//! - **Market** ([`market`]): students, universities, configuration and the
//!   Apply → Admit → Choose cycle engine, plus read-only reports.
//! - **Ranking** ([`ranking`]): rule-based ranking with deterministic
//!   tie-breaking, used by both sides.
//!
//! # Architecture
//!
//! Entities refer to each other through index ids into the market's
//! registries, never through references. Each phase of a cycle computes
//! decisions from a read-only view of the population (optionally in
//! parallel) and then commits them in id order, so a seeded run is
//! reproducible regardless of the `parallel` feature.
//!
//! Population generation, tabular reporting and plotting are left to
//! consumers; [`market::MarketReport`] is the hand-off point.

pub mod aid;
pub mod error;
pub mod market;
mod parallel;
pub mod random;
pub mod ranking;
pub mod utility;

pub use error::{MarketError, Result};
