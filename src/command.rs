use crate::report::SessionReport;
use crate::tracker::TypingSessionTracker;
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// Display theme. The core never interprets it; it is carried through the
/// command surface untouched so the presentation layer can restyle itself.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display, Default,
)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Control commands the presentation layer sends to the core.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetCommand {
    ToggleRun,
    Reset,
    /// Minutes are pre-validated at the boundary (a fixed enumerated set);
    /// 0 disables the countdown.
    SetTimerMinutes(u32),
    SetTheme(Theme),
    TriggerExport,
}

/// What the caller should do after a command has been applied.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Applied,
    /// Restyle the display; no core state changed.
    ThemeChanged(Theme),
    /// Hand the report to an exporter.
    Export(SessionReport),
}

pub fn apply_command(
    tracker: &mut TypingSessionTracker,
    command: &WidgetCommand,
    now: SystemTime,
) -> CommandOutcome {
    match command {
        WidgetCommand::ToggleRun => {
            tracker.toggle_running(now);
            CommandOutcome::Applied
        }
        WidgetCommand::Reset => {
            tracker.reset();
            CommandOutcome::Applied
        }
        WidgetCommand::SetTimerMinutes(minutes) => {
            tracker.set_timer_minutes(*minutes);
            CommandOutcome::Applied
        }
        WidgetCommand::SetTheme(theme) => CommandOutcome::ThemeChanged(*theme),
        WidgetCommand::TriggerExport => CommandOutcome::Export(SessionReport::new(tracker, now)),
    }
}
