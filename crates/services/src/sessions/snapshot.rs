use drill_core::SessionSummary;

/// Coarse phase discriminant exposed to the renderer.
///
/// While paused, `phase` keeps reporting the interrupted phase and
/// `is_paused` is set; `Paused` is not a renderable look of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    StartScreen,
    Countdown,
    Presenting,
    AwaitingAnswer,
    Feedback,
    Closing,
    Summary,
}

/// Read-only state snapshot for the renderer.
///
/// This is intentionally **not** a UI view-model: no layout, no styling, no
/// localization decisions beyond the fixed display literals the drill ships
/// with. The renderer subscribes to a stream of these and never writes back
/// except through player inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub phase: PhaseKind,
    pub is_paused: bool,

    /// Countdown value while counting down; `0` during the "¡Ahora!" window.
    pub countdown: Option<u8>,
    /// The currently revealed token, or the ready message once reveal is done.
    pub display_text: Option<String>,
    /// Answer option texts, present only once answering is possible.
    pub options: Vec<String>,
    /// Locked-in selection for the current exercise, if any.
    pub selected_option: Option<usize>,
    /// Feedback phrase or closing banner, while one is showing.
    pub feedback: Option<String>,

    /// 1-based position of the current exercise; `0` before sampling.
    pub exercise_number: usize,
    pub exercise_total: usize,

    pub score: u32,
    pub max_score: u32,

    /// Present once the session reached its terminal summary.
    pub summary: Option<SessionSummary>,
}

impl SessionSnapshot {
    /// Blank snapshot for the start screen.
    #[must_use]
    pub fn start_screen() -> Self {
        Self {
            phase: PhaseKind::StartScreen,
            is_paused: false,
            countdown: None,
            display_text: None,
            options: Vec::new(),
            selected_option: None,
            feedback: None,
            exercise_number: 0,
            exercise_total: 0,
            score: 0,
            max_score: 0,
            summary: None,
        }
    }
}
