//! Fixed display literals and feedback phrase pools.

use rand::Rng;
use rand::seq::IndexedRandom;

use drill_core::SessionSummary;

/// Shown once the last token is revealed and answers are enabled.
pub const READY_MESSAGE: &str = "¡Listo! Puedes responder.";

/// Shown during the 500 ms window after the countdown reaches zero.
pub const COUNTDOWN_GO: &str = "¡Ahora!";

/// End-of-session banner shown before the summary.
pub const CLOSING_MESSAGE: &str = "🎮 ¡Juego finalizado!";

/// Summary title when at least half of the answers were correct.
pub const SUMMARY_TITLE_MAJORITY: &str = "¡Felicidades! 🎉";

/// Summary title otherwise.
pub const SUMMARY_TITLE_RETRY: &str = "¡Buen intento! 💪";

const CORRECT_MESSAGES: [&str; 5] = [
    "¡Excelente! 🎯",
    "¡Muy bien hecho! 💪",
    "¡Perfecto! 🌟",
    "¡Súper respuesta! 🚀",
    "¡Buen trabajo! 😎",
];

const INCORRECT_MESSAGES: [&str; 5] = [
    "¡Ups! ❌",
    "Sigue intentando 💪",
    "Casi lo logras 😅",
    "No te rindas 🔁",
    "Intenta de nuevo 👊",
];

/// Pick a feedback phrase uniformly at random from the matching pool.
pub fn pick_feedback<R: Rng + ?Sized>(correct: bool, rng: &mut R) -> &'static str {
    let pool: &[&'static str] = if correct {
        &CORRECT_MESSAGES
    } else {
        &INCORRECT_MESSAGES
    };
    pool.choose(rng).copied().unwrap_or(pool[0])
}

/// Title for the summary screen, driven by the majority rule.
#[must_use]
pub fn summary_title(summary: &SessionSummary) -> &'static str {
    if summary.is_majority() {
        SUMMARY_TITLE_MAJORITY
    } else {
        SUMMARY_TITLE_RETRY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn feedback_comes_from_the_matching_pool() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..32 {
            assert!(CORRECT_MESSAGES.contains(&pick_feedback(true, &mut rng)));
            assert!(INCORRECT_MESSAGES.contains(&pick_feedback(false, &mut rng)));
        }
    }

    #[test]
    fn summary_title_follows_majority_rule() {
        assert_eq!(
            summary_title(&SessionSummary::from_score(20, 30)),
            SUMMARY_TITLE_MAJORITY
        );
        assert_eq!(
            summary_title(&SessionSummary::from_score(10, 30)),
            SUMMARY_TITLE_RETRY
        );
    }
}
