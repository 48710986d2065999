use std::collections::HashMap;

use crate::model::exercise::Exercise;
use crate::model::tier::Difficulty;

/// The full set of authored exercises, keyed by difficulty tier.
///
/// Populated once at startup from the catalog documents and treated as
/// read-only afterwards. Sessions never mutate pool exercises; they work on
/// shuffled copies produced by the sampler.
#[derive(Debug, Clone, Default)]
pub struct ExercisePool {
    tiers: HashMap<Difficulty, Vec<Exercise>>,
}

impl ExercisePool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the given exercises to a tier, preserving authored order.
    pub fn extend_tier(&mut self, tier: Difficulty, exercises: impl IntoIterator<Item = Exercise>) {
        self.tiers.entry(tier).or_default().extend(exercises);
    }

    /// Exercises available for a tier. Missing tiers read as empty.
    #[must_use]
    pub fn tier(&self, tier: Difficulty) -> &[Exercise] {
        self.tiers.get(&tier).map_or(&[], Vec::as_slice)
    }

    /// Number of exercises in a tier.
    #[must_use]
    pub fn tier_len(&self, tier: Difficulty) -> usize {
        self.tier(tier).len()
    }

    /// Total number of exercises across all tiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiers.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::exercise::{AnswerOption, ExerciseDraft};
    use crate::model::ids::ExerciseId;

    fn exercise(id: u64) -> Exercise {
        ExerciseDraft::new(
            vec!["1".into(), "+".into(), "1".into()],
            vec![AnswerOption::new("2", true), AnswerOption::new("3", false)],
        )
        .validate(ExerciseId::new(id))
        .unwrap()
    }

    #[test]
    fn missing_tier_reads_as_empty() {
        let pool = ExercisePool::new();
        assert!(pool.tier(Difficulty::Advanced).is_empty());
        assert!(pool.is_empty());
    }

    #[test]
    fn extend_preserves_authored_order() {
        let mut pool = ExercisePool::new();
        pool.extend_tier(Difficulty::Basic, vec![exercise(1), exercise(2)]);
        pool.extend_tier(Difficulty::Basic, vec![exercise(3)]);

        let ids: Vec<u64> = pool
            .tier(Difficulty::Basic)
            .iter()
            .map(|e| e.id().value())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(pool.tier_len(Difficulty::Basic), 3);
        assert_eq!(pool.len(), 3);
    }
}
