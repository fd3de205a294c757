use crate::tracker::TypingSessionTracker;
use crate::util::round2;
use chrono::{DateTime, SecondsFormat, Utc};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Column order is a compatibility surface for downstream consumers of the
/// exported file; keep it in sync with [`SessionReport::to_record`].
pub const CSV_HEADER: [&str; 10] = [
    "date",
    "duration_seconds",
    "characters",
    "words",
    "wpm_gross",
    "wpm_net",
    "accuracy_percent",
    "keystrokes",
    "backspaces",
    "timer_minutes",
];

/// Snapshot of a session prepared for export.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    /// RFC 3339 UTC timestamp of report generation.
    pub date: String,
    pub duration_seconds: u64,
    pub characters: usize,
    pub words: usize,
    pub wpm_gross: f64,
    pub wpm_net: f64,
    pub accuracy_percent: f64,
    pub keystrokes: u64,
    pub backspaces: u64,
    pub timer_minutes: u32,
}

impl SessionReport {
    pub fn new(tracker: &TypingSessionTracker, now: SystemTime) -> Self {
        let stats = tracker.compute_stats(now);
        let date = DateTime::<Utc>::from(now).to_rfc3339_opts(SecondsFormat::Secs, true);
        Self {
            date,
            duration_seconds: (stats.active_elapsed_ms as f64 / 1000.0).round() as u64,
            characters: stats.character_count,
            words: stats.word_count,
            wpm_gross: round2(stats.gross_wpm),
            wpm_net: round2(stats.net_wpm),
            accuracy_percent: round2(stats.accuracy_percent),
            keystrokes: tracker.session.total_keystrokes,
            backspaces: tracker.session.backspace_count,
            timer_minutes: tracker.timer.minutes_limit,
        }
    }

    pub fn file_name(&self) -> String {
        format!("typing-report-{}.csv", self.date)
    }

    /// One data row matching [`CSV_HEADER`]. Fractional metrics are emitted
    /// with two fixed decimals so the artifact is byte-stable.
    pub fn to_record(&self) -> [String; 10] {
        [
            self.date.clone(),
            self.duration_seconds.to_string(),
            self.characters.to_string(),
            self.words.to_string(),
            format!("{:.2}", self.wpm_gross),
            format!("{:.2}", self.wpm_net),
            format!("{:.2}", self.accuracy_percent),
            self.keystrokes.to_string(),
            self.backspaces.to_string(),
            self.timer_minutes.to_string(),
        ]
    }
}

/// Writes session reports as `typing-report-<ISO timestamp>.csv`, one file
/// per export.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    dir: PathBuf,
}

impl CsvExporter {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let dir = if let Some(pd) = ProjectDirs::from("", "", "typometer") {
            pd.data_dir().to_path_buf()
        } else {
            PathBuf::from(".")
        };
        Self { dir }
    }

    pub fn with_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn export(&self, report: &SessionReport) -> csv::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(report.file_name());

        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(CSV_HEADER)?;
        writer.write_record(report.to_record())?;
        writer.flush()?;

        Ok(path)
    }
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn at(ms: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_millis(ms)
    }

    fn sample_tracker() -> TypingSessionTracker {
        let mut tracker = TypingSessionTracker::with_timer(1);
        tracker.on_text_changed("hello world", at(0));
        for key in ["h", "e", "l", "l", "o", " ", "w", "o", "r", "l", "d"] {
            tracker.on_key_event(key);
        }
        tracker.pause(at(60_000));
        tracker
    }

    #[test]
    fn test_report_fields() {
        let report = SessionReport::new(&sample_tracker(), at(60_000));

        assert_eq!(report.date, "1970-01-01T00:01:00Z");
        assert_eq!(report.duration_seconds, 60);
        assert_eq!(report.characters, 11);
        assert_eq!(report.words, 2);
        assert_eq!(report.wpm_gross, 2.2);
        assert_eq!(report.wpm_net, 2.2);
        assert_eq!(report.accuracy_percent, 100.0);
        assert_eq!(report.keystrokes, 11);
        assert_eq!(report.backspaces, 0);
        assert_eq!(report.timer_minutes, 1);
    }

    #[test]
    fn test_duration_rounds_to_nearest_second() {
        let mut tracker = TypingSessionTracker::new();
        tracker.start(at(0));
        tracker.pause(at(1_499));
        assert_eq!(SessionReport::new(&tracker, at(1_499)).duration_seconds, 1);

        tracker.start(at(1_499));
        tracker.pause(at(2_600));
        assert_eq!(SessionReport::new(&tracker, at(2_600)).duration_seconds, 3);
    }

    #[test]
    fn test_file_name_convention() {
        let report = SessionReport::new(&sample_tracker(), at(60_000));
        assert_eq!(report.file_name(), "typing-report-1970-01-01T00:01:00Z.csv");
    }

    #[test]
    fn test_record_matches_header_arity_and_rounding() {
        let report = SessionReport::new(&sample_tracker(), at(60_000));
        let record = report.to_record();

        assert_eq!(record.len(), CSV_HEADER.len());
        assert_eq!(record[4], "2.20");
        assert_eq!(record[5], "2.20");
        assert_eq!(record[6], "100.00");
    }

    #[test]
    fn test_export_writes_header_and_row() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = CsvExporter::with_dir(dir.path());
        let report = SessionReport::new(&sample_tracker(), at(60_000));

        let path = exporter.export(&report).unwrap();
        assert!(path.exists());

        let contents = fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "date,duration_seconds,characters,words,wpm_gross,wpm_net,accuracy_percent,keystrokes,backspaces,timer_minutes"
        );
        assert_eq!(
            lines.next().unwrap(),
            "1970-01-01T00:01:00Z,60,11,2,2.20,2.20,100.00,11,0,1"
        );
        assert_eq!(lines.next(), None);
    }
}
