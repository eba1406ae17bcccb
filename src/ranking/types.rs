//! Core trait for ranking rules.

/// A rule assigning a desirability value to an item.
///
/// **Higher values rank first.** The context carries whatever the rule
/// needs besides the item itself (the deciding student, the university
/// registry, the utility model).
///
/// # Examples
///
/// ```
/// use u_admissions::ranking::{Ranker, RankingRule};
///
/// struct Longest;
///
/// impl RankingRule<&'static str, ()> for Longest {
///     fn name(&self) -> &str { "Longest" }
///     fn value(&self, item: &&'static str, _ctx: &()) -> f64 {
///         item.len() as f64
///     }
/// }
///
/// let words = ["ab", "abcd", "abc"];
/// let order = Ranker::new().with_rule(Longest).rank(&words, &());
/// assert_eq!(order, vec![1, 2, 0]);
/// ```
pub trait RankingRule<T, C>: Send + Sync {
    /// Returns the name of this rule.
    fn name(&self) -> &str;

    /// Computes the value of `item`. Higher ranks first.
    fn value(&self, item: &T, context: &C) -> f64;
}
