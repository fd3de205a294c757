#[derive(Debug, Clone)]
pub struct SessionState {
    pub text: String,
    pub is_running: bool,
    pub started_at: Option<std::time::SystemTime>,
    /// Set iff `is_running` is true.
    pub last_resume_at: Option<std::time::SystemTime>,
    /// Grows only when a running interval ends (pause, expiry).
    pub accumulated_active_ms: u64,
    pub total_keystrokes: u64,
    pub backspace_count: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            text: String::new(),
            is_running: false,
            started_at: None,
            last_resume_at: None,
            accumulated_active_ms: 0,
            total_keystrokes: 0,
            backspace_count: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    /// 0 disables the countdown.
    pub minutes_limit: u32,
}

impl TimerConfig {
    pub fn new(minutes_limit: u32) -> Self {
        Self { minutes_limit }
    }

    pub fn is_enabled(&self) -> bool {
        self.minutes_limit > 0
    }

    pub fn duration_ms(&self) -> u64 {
        u64::from(self.minutes_limit) * 60_000
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self { minutes_limit: 0 }
    }
}
