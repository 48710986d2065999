//! Line-oriented terminal rendering of session snapshots.

use drill_core::model::SessionConfig;
use services::sessions::{PhaseKind, SessionSnapshot, summary_title};

/// Print the start screen with the configured metadata, once at launch and
/// whenever the session returns to it.
pub fn print_start_screen(config: &SessionConfig) {
    let meta = config.metadata();
    println!();
    println!(
        "=== {} ===",
        meta.app_name.as_deref().unwrap_or("Cálculo Mental")
    );
    if let Some(description) = meta.description.as_deref() {
        println!("{description}");
    }
    if let Some(author) = meta.author.as_deref() {
        println!("Autor: {author}");
    }
    if let Some(version) = meta.version.as_deref() {
        println!("Versión: {version}");
    }
    if let Some(date) = meta.date.as_deref() {
        println!("Fecha: {date}");
    }
    if !meta.platforms.is_empty() {
        println!("Plataformas: {}", meta.platforms.join(", "));
    }
    println!(
        "Nivel: {} · {} ejercicios",
        config.difficulty(),
        config.exercise_count()
    );
    println!();
    println!("[s] empezar   [q] salir");
}

/// Render one snapshot as terminal lines.
pub fn print_snapshot(snapshot: &SessionSnapshot, config: &SessionConfig) {
    if snapshot.is_paused {
        println!("⏸ En pausa — [r] continuar, [x] salir al inicio");
        return;
    }

    match snapshot.phase {
        PhaseKind::StartScreen => print_start_screen(config),
        PhaseKind::Countdown => match snapshot.countdown {
            Some(0) | None => {
                if let Some(text) = snapshot.display_text.as_deref() {
                    println!("{text}");
                }
            }
            Some(value) => println!("{value}..."),
        },
        PhaseKind::Presenting => {
            if let Some(token) = snapshot.display_text.as_deref() {
                println!(
                    "  [{}/{}]   {token}",
                    snapshot.exercise_number, snapshot.exercise_total
                );
            }
        }
        PhaseKind::AwaitingAnswer => {
            if let Some(text) = snapshot.display_text.as_deref() {
                println!("{text}");
            }
            for (index, option) in snapshot.options.iter().enumerate() {
                println!("  [{}] {option}", index + 1);
            }
            println!("Elige una opción ([p] pausa):");
        }
        PhaseKind::Feedback => {
            if let Some(feedback) = snapshot.feedback.as_deref() {
                println!("{feedback}   Puntos: {}", snapshot.score);
            }
        }
        PhaseKind::Closing => {
            if let Some(banner) = snapshot.feedback.as_deref() {
                println!();
                println!("{banner}");
            }
        }
        PhaseKind::Summary => {
            if let Some(summary) = snapshot.summary.as_ref() {
                println!();
                println!("{}", summary_title(summary));
                println!(
                    "Correctas: {} · Incorrectas: {} · Puntos: {}/{} ({}%)",
                    summary.correct_count(),
                    summary.incorrect_count(),
                    summary.score(),
                    summary.max_score(),
                    summary.percentage()
                );
                println!("[n] jugar de nuevo   [x] inicio   [q] salir");
            }
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    // Rendering is print-only; these exercise the match arms for panics.
    #[test]
    fn renders_every_phase_without_panicking() {
        let config = SessionConfig::default();
        let mut snapshot = SessionSnapshot::start_screen();
        print_snapshot(&snapshot, &config);

        snapshot.phase = PhaseKind::Countdown;
        snapshot.countdown = Some(3);
        print_snapshot(&snapshot, &config);

        snapshot.phase = PhaseKind::AwaitingAnswer;
        snapshot.countdown = None;
        snapshot.options = vec!["12".into(), "11".into()];
        snapshot.display_text = Some("¡Listo! Puedes responder.".into());
        print_snapshot(&snapshot, &config);

        snapshot.is_paused = true;
        print_snapshot(&snapshot, &config);
    }
}
