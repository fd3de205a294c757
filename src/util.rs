use std::time::SystemTime;

/// Saturating difference in milliseconds; 0 if `end` precedes `start`.
pub fn time_diff_ms(start: SystemTime, end: SystemTime) -> u64 {
    end.duration_since(start)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Formats a millisecond duration as zero-padded `MM:SS`.
pub fn format_time(ms: u64) -> String {
    let total_secs = ms / 1000;
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

/// Countdown progress in percent, capped at 100. 0 when the timer is disabled.
pub fn timer_progress_percent(elapsed_ms: u64, duration_ms: u64) -> f64 {
    if duration_ms == 0 {
        return 0.0;
    }
    (elapsed_ms as f64 / duration_ms as f64 * 100.0).min(100.0)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
