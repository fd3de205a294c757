use crate::keys::{classify, KeyClass};
use crate::report::SessionReport;
use crate::session::{SessionState, TimerConfig};
use crate::stats::{self, DerivedStats};
use crate::util::{format_time, time_diff_ms, timer_progress_percent};
use std::time::SystemTime;

/// Formatted values the presentation layer renders on every tick.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySnapshot {
    /// Active elapsed time as `MM:SS`.
    pub elapsed: String,
    /// Time left on the countdown as `MM:SS`; `00:00` when disabled.
    pub remaining: String,
    /// Countdown progress in percent; 0 when disabled.
    pub progress_percent: f64,
}

/// Owns all timing and keystroke state for one typing session and derives
/// statistics on demand. Callers pass the observation instant into every
/// operation, so transitions are deterministic and the tracker never reads
/// the clock itself.
///
/// Running/paused lifecycle:
///
/// ```text
/// [Idle] --start/first text--> [Running]
/// [Running] --pause/toggle/timer expiry--> [Paused]
/// [Paused] --start/toggle--> [Running]
/// [Running|Paused] --reset--> [Idle]
/// ```
#[derive(Debug, Clone, Default)]
pub struct TypingSessionTracker {
    pub session: SessionState,
    pub timer: TimerConfig,
}

impl TypingSessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timer(minutes_limit: u32) -> Self {
        Self {
            session: SessionState::default(),
            timer: TimerConfig::new(minutes_limit),
        }
    }

    /// Replaces the session text with the full current value of the input
    /// field. The first transition from empty to non-empty starts the
    /// session implicitly. Keystrokes are counted by [`Self::on_key_event`],
    /// never here.
    pub fn on_text_changed(&mut self, new_text: &str, now: SystemTime) {
        if self.session.text.is_empty() && !new_text.is_empty() {
            self.start(now);
        }
        self.session.text = new_text.to_string();
    }

    /// Counts one key-down event. Printable keys and backspace both count
    /// toward `total_keystrokes`; backspace is tallied separately; other
    /// keys are ignored. This stream is independent of the text-change
    /// stream: a counted key may never land in the text (blocked input,
    /// IME composition), which the accuracy proxy deliberately tolerates.
    pub fn on_key_event(&mut self, key: &str) {
        match classify(key) {
            KeyClass::Printable => {
                self.session.total_keystrokes += 1;
            }
            KeyClass::Backspace => {
                self.session.total_keystrokes += 1;
                self.session.backspace_count += 1;
            }
            KeyClass::Other => {}
        }
    }

    /// Idempotent while running. `started_at` is set on the first call only.
    pub fn start(&mut self, now: SystemTime) {
        if self.session.is_running {
            return;
        }
        if self.session.started_at.is_none() {
            self.session.started_at = Some(now);
        }
        self.session.is_running = true;
        self.session.last_resume_at = Some(now);
    }

    /// Idempotent while paused. Folds the just-ended running interval into
    /// `accumulated_active_ms`.
    pub fn pause(&mut self, now: SystemTime) {
        if !self.session.is_running {
            return;
        }
        if let Some(resumed_at) = self.session.last_resume_at {
            self.session.accumulated_active_ms += time_diff_ms(resumed_at, now);
        }
        self.session.last_resume_at = None;
        self.session.is_running = false;
    }

    /// The single pause/resume control: pauses when running, starts
    /// (or resumes) otherwise.
    pub fn toggle_running(&mut self, now: SystemTime) {
        if self.session.is_running {
            self.pause(now);
        } else {
            self.start(now);
        }
    }

    /// Returns the session to its initial state. The timer configuration
    /// survives a reset.
    pub fn reset(&mut self) {
        self.session = SessionState::default();
    }

    /// Replaces the countdown configuration. Takes effect on the next
    /// elapsed-time evaluation; never pauses or resumes by itself.
    pub fn set_timer_minutes(&mut self, minutes_limit: u32) {
        self.timer = TimerConfig::new(minutes_limit);
    }

    pub fn has_started(&self) -> bool {
        self.session.started_at.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.session.is_running
    }

    /// Wall-clock time spent in the running state, in milliseconds.
    pub fn active_elapsed_ms(&self, now: SystemTime) -> u64 {
        let running_ms = match self.session.last_resume_at {
            Some(resumed_at) if self.session.is_running => time_diff_ms(resumed_at, now),
            _ => 0,
        };
        self.session.accumulated_active_ms + running_ms
    }

    /// Auto-pauses the session once the countdown is used up and reports
    /// whether this call performed the transition. Safe to call from a
    /// periodic tick: once paused by expiry, later calls are no-ops.
    pub fn check_timer_expiry(&mut self, now: SystemTime) -> bool {
        if !self.timer.is_enabled() || !self.session.is_running {
            return false;
        }
        if self.active_elapsed_ms(now) >= self.timer.duration_ms() {
            self.pause(now);
            return true;
        }
        false
    }

    pub fn compute_stats(&self, now: SystemTime) -> DerivedStats {
        stats::compute(&self.session, self.active_elapsed_ms(now))
    }

    /// Snapshot of the session prepared for export.
    pub fn build_report(&self, now: SystemTime) -> SessionReport {
        SessionReport::new(self, now)
    }

    pub fn display_snapshot(&self, now: SystemTime) -> DisplaySnapshot {
        let elapsed_ms = self.active_elapsed_ms(now);
        let duration_ms = self.timer.duration_ms();
        DisplaySnapshot {
            elapsed: format_time(elapsed_ms),
            remaining: format_time(duration_ms.saturating_sub(elapsed_ms)),
            progress_percent: timer_progress_percent(elapsed_ms, duration_ms),
        }
    }
}
