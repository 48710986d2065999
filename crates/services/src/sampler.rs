use rand::Rng;
use rand::seq::SliceRandom;

use drill_core::model::Exercise;

/// Draws a bounded, randomized subset of exercises without replacement.
///
/// The pool is put through a uniform Fisher–Yates permutation, the first
/// `min(count, pool.len())` exercises are taken, and each selected exercise
/// gets its answer options reshuffled into a fresh copy. Pool exercises are
/// never mutated. An empty pool yields an empty selection; there are no
/// error conditions.
///
/// The generator is injected so callers can seed it and tests can assert
/// exact permutations.
#[must_use]
pub fn sample<R: Rng + ?Sized>(pool: &[Exercise], count: usize, rng: &mut R) -> Vec<Exercise> {
    let mut drawn: Vec<Exercise> = pool.to_vec();
    drawn.shuffle(rng);
    drawn.truncate(count.min(pool.len()));

    drawn
        .iter()
        .map(|exercise| {
            let mut options = exercise.options().to_vec();
            options.shuffle(rng);
            exercise.with_options(options)
        })
        .collect()
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use drill_core::model::{AnswerOption, ExerciseDraft, ExerciseId};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn build_exercise(id: u64) -> Exercise {
        ExerciseDraft::new(
            vec![id.to_string(), "+".into(), "1".into()],
            vec![
                AnswerOption::new((id + 1).to_string(), true),
                AnswerOption::new((id + 2).to_string(), false),
                AnswerOption::new(id.to_string(), false),
            ],
        )
        .validate(ExerciseId::new(id))
        .unwrap()
    }

    fn build_pool(size: u64) -> Vec<Exercise> {
        (1..=size).map(build_exercise).collect()
    }

    #[test]
    fn returns_min_of_count_and_pool_size() {
        let pool = build_pool(10);
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(sample(&pool, 3, &mut rng).len(), 3);
        assert_eq!(sample(&pool, 10, &mut rng).len(), 10);
        assert_eq!(sample(&pool, 25, &mut rng).len(), 10);
    }

    #[test]
    fn empty_pool_yields_empty_selection() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(sample(&[], 5, &mut rng).is_empty());
    }

    #[test]
    fn selection_has_no_repeated_ids() {
        let pool = build_pool(10);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let selected = sample(&pool, 5, &mut rng);
            let ids: HashSet<_> = selected.iter().map(|e| e.id()).collect();
            assert_eq!(ids.len(), selected.len());
        }
    }

    #[test]
    fn selection_draws_from_the_pool() {
        let pool = build_pool(6);
        let pool_ids: HashSet<_> = pool.iter().map(|e| e.id()).collect();
        let mut rng = StdRng::seed_from_u64(3);

        for exercise in sample(&pool, 4, &mut rng) {
            assert!(pool_ids.contains(&exercise.id()));
        }
    }

    #[test]
    fn options_are_a_permutation_with_one_correct() {
        let pool = build_pool(5);
        let mut rng = StdRng::seed_from_u64(11);

        for exercise in sample(&pool, 5, &mut rng) {
            let original = pool
                .iter()
                .find(|e| e.id() == exercise.id())
                .expect("sampled exercise comes from the pool");

            let mut sampled_texts: Vec<_> =
                exercise.options().iter().map(|o| o.text().to_string()).collect();
            let mut original_texts: Vec<_> =
                original.options().iter().map(|o| o.text().to_string()).collect();
            sampled_texts.sort();
            original_texts.sort();
            assert_eq!(sampled_texts, original_texts);

            let correct = exercise.options().iter().filter(|o| o.is_correct()).count();
            assert_eq!(correct, 1);
        }
    }

    #[test]
    fn pool_exercises_are_not_mutated() {
        let pool = build_pool(4);
        let before = pool.clone();
        let mut rng = StdRng::seed_from_u64(5);
        let _ = sample(&pool, 4, &mut rng);
        assert_eq!(pool, before);
    }

    #[test]
    fn different_seeds_produce_different_orders() {
        let pool = build_pool(10);
        let orders: Vec<Vec<_>> = (0..6)
            .map(|seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                sample(&pool, 10, &mut rng)
                    .iter()
                    .map(|e| e.id())
                    .collect()
            })
            .collect();

        assert!(orders.iter().any(|order| order != &orders[0]));
    }

    #[test]
    fn same_seed_reproduces_the_permutation() {
        let pool = build_pool(8);
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        assert_eq!(sample(&pool, 8, &mut a), sample(&pool, 8, &mut b));
    }
}
