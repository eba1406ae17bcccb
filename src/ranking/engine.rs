//! Sequential rule composition.

use super::types::RankingRule;
use std::cmp::Ordering;

/// Orders items by a chain of [`RankingRule`]s.
///
/// ```ignore
/// let ranker = Ranker::new().with_rule(ByScore);
/// let order = ranker.rank(&applicants, &students);
/// ```
pub struct Ranker<T, C> {
    rules: Vec<Box<dyn RankingRule<T, C>>>,
}

impl<T, C> Ranker<T, C> {
    /// Creates an engine with no rules. Without rules, `rank` is the identity.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Appends a rule. Rules added later only break ties of earlier ones.
    pub fn with_rule<R: RankingRule<T, C> + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Returns indices into `items`, best first.
    ///
    /// Every rule is evaluated exactly once per item.
    pub fn rank(&self, items: &[T], context: &C) -> Vec<usize> {
        if self.rules.is_empty() {
            return (0..items.len()).collect();
        }

        let values: Vec<Vec<f64>> = items
            .iter()
            .map(|item| self.rules.iter().map(|r| r.value(item, context)).collect())
            .collect();

        let mut indices: Vec<usize> = (0..items.len()).collect();
        // Stable: full ties keep input order.
        indices.sort_by(|&a, &b| {
            for (va, vb) in values[a].iter().zip(values[b].iter()) {
                let ord = compare_desc(*va, *vb);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            Ordering::Equal
        });
        indices
    }
}

impl<T, C> Default for Ranker<T, C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Ranks precomputed values, best (largest) first, ties in input order.
///
/// Used when values come from a stochastic evaluation that must be drawn
/// exactly once per item, such as noisy application utilities.
pub fn rank_values(values: &[f64]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..values.len()).collect();
    indices.sort_by(|&a, &b| compare_desc(values[a], values[b]));
    indices
}

/// Descending order; only exactly equal values tie.
fn compare_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
