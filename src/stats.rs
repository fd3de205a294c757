use crate::session::SessionState;
use crate::util::finite_or_zero;

/// Metrics derived from a [`SessionState`] at an observation instant.
/// Never stored; recomputed on every observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedStats {
    pub character_count: usize,
    pub word_count: usize,
    pub gross_wpm: f64,
    pub net_wpm: f64,
    /// Proxy metric: final character count over total keystrokes, not a
    /// true error rate. Defined as 100 when no keystrokes were recorded.
    pub accuracy_percent: f64,
    pub active_elapsed_ms: u64,
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn compute(state: &SessionState, active_elapsed_ms: u64) -> DerivedStats {
    let character_count = state.text.chars().count();
    let active_minutes = active_elapsed_ms as f64 / 60_000.0;

    let gross_wpm = if active_minutes > 0.0 {
        finite_or_zero((character_count as f64 / 5.0) / active_minutes)
    } else {
        0.0
    };

    let accuracy_percent = if state.total_keystrokes > 0 {
        (character_count as f64 / state.total_keystrokes as f64 * 100.0).clamp(0.0, 100.0)
    } else {
        100.0
    };

    let net_wpm = finite_or_zero(gross_wpm * accuracy_percent / 100.0);

    DerivedStats {
        character_count,
        word_count: word_count(&state.text),
        gross_wpm,
        net_wpm,
        accuracy_percent,
        active_elapsed_ms,
    }
}
