use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyCode, KeyEvent, KeyEventKind};

use crate::command::WidgetCommand;

/// How often the presentation layer re-evaluates elapsed time, timer expiry,
/// and displayed stats.
pub const TICK_RATE_MS: u64 = 100;

/// Unified event type consumed by the widget loop
#[derive(Clone, Debug, PartialEq)]
pub enum WidgetEvent {
    /// Full current value of the text field after an edit.
    TextChanged(String),
    /// Key identifier string for a key-down event.
    Key(String),
    Command(WidgetCommand),
    Resize,
    Tick,
}

/// Source of input events (keyboard, resize, host commands)
pub trait WidgetEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<WidgetEvent, RecvTimeoutError>;
}

/// Maps a terminal key event to the identifier string the tracker consumes.
/// Printable keys become the character itself; everything else gets a name.
pub fn key_identifier(key: &KeyEvent) -> String {
    match key.code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".into(),
        KeyCode::Tab => "Tab".into(),
        KeyCode::Backspace => "Backspace".into(),
        KeyCode::Esc => "Escape".into(),
        KeyCode::Left => "ArrowLeft".into(),
        KeyCode::Right => "ArrowRight".into(),
        KeyCode::Up => "ArrowUp".into(),
        KeyCode::Down => "ArrowDown".into(),
        KeyCode::Delete => "Delete".into(),
        KeyCode::Home => "Home".into(),
        KeyCode::End => "End".into(),
        other => format!("{:?}", other),
    }
}

/// Production event source backed by crossterm
pub struct CrosstermEventSource {
    rx: Receiver<WidgetEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if key.kind == KeyEventKind::Release {
                        continue;
                    }
                    if tx.send(WidgetEvent::Key(key_identifier(&key))).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if tx.send(WidgetEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<WidgetEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for FixedTicker {
    fn default() -> Self {
        Self::new(Duration::from_millis(TICK_RATE_MS))
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<WidgetEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<WidgetEvent>) -> Self {
        Self { rx }
    }
}

impl WidgetEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<WidgetEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the widget one event/tick at a time
pub struct Runner<E: WidgetEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: WidgetEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Blocks up to tick interval and returns the next event, or Tick on timeout
    pub fn step(&self) -> WidgetEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                WidgetEvent::Tick
            }
        }
    }
}
