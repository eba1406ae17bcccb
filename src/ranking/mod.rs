//! Rule-based ranking with deterministic tie-breaking.
//!
//! Both sides of the market rank things: universities order their applicant
//! pool, students order their offers and the universities they consider
//! applying to. A [`Ranker`] applies [`RankingRule`]s sequentially: a later
//! rule is only consulted when every earlier rule ties exactly.
//! Items that tie on every rule keep their input order, so rankings are
//! reproducible for a fixed input.

mod engine;
mod types;

pub use engine::{rank_values, Ranker};
pub use types::RankingRule;
