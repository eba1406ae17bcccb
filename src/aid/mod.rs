//! Financial aid policies.
//!
//! A university turns an admission into an offer by asking its
//! [`AidPolicy`] how much aid to attach. Policies are strategy objects:
//! the market holds one as `Box<dyn AidPolicy>` and neither students nor
//! universities know which one is in use.
//!
//! Built-in policies, from most to least generous toward strong students:
//!
//! - [`MeritAugmentedAid`]: merit aid that may exceed need by a slack that
//!   shrinks as prestige grows.
//! - [`NeedCappedMeritAid`]: merit aid, never more than need.
//! - [`NeedOnlyAid`]: need, regardless of score.
//!
//! Every policy returns a value in `[0, cost]`.

mod policies;
mod types;

pub use policies::{MeritAugmentedAid, NeedCappedMeritAid, NeedOnlyAid};
pub use types::{need, AidPolicy};
