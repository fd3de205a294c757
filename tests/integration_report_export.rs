use std::time::{Duration, SystemTime};

use assert_matches::assert_matches;
use typometer::command::{apply_command, CommandOutcome, WidgetCommand};
use typometer::report::{CsvExporter, SessionReport, CSV_HEADER};
use typometer::TypingSessionTracker;

fn at(ms: u64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_millis(ms)
}

fn finished_session() -> TypingSessionTracker {
    let mut tracker = TypingSessionTracker::with_timer(1);
    tracker.on_text_changed("the quick brown fox", at(0));
    for key in "the quick brown fox".chars() {
        tracker.on_key_event(&key.to_string());
    }
    // Two typos that were erased along the way.
    for key in ["x", "Backspace", "q", "Backspace"] {
        tracker.on_key_event(key);
    }
    tracker.pause(at(30_000));
    tracker
}

#[test]
fn export_command_round_trips_through_csv() {
    let mut tracker = finished_session();

    let outcome = apply_command(&mut tracker, &WidgetCommand::TriggerExport, at(30_000));
    let report = assert_matches!(outcome, CommandOutcome::Export(report) => report);

    let dir = tempfile::tempdir().unwrap();
    let path = CsvExporter::with_dir(dir.path()).export(&report).unwrap();
    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        format!("typing-report-{}.csv", report.date)
    );

    let mut reader = csv::Reader::from_path(&path).unwrap();
    assert_eq!(
        reader.headers().unwrap().iter().collect::<Vec<_>>(),
        CSV_HEADER.to_vec()
    );

    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 1);
    let row = &records[0];

    assert_eq!(&row[0], report.date.as_str());
    assert_eq!(row[1].parse::<u64>().unwrap(), report.duration_seconds);
    assert_eq!(row[2].parse::<usize>().unwrap(), report.characters);
    assert_eq!(row[3].parse::<usize>().unwrap(), report.words);
    assert_eq!(row[4].parse::<f64>().unwrap(), report.wpm_gross);
    assert_eq!(row[5].parse::<f64>().unwrap(), report.wpm_net);
    assert_eq!(row[6].parse::<f64>().unwrap(), report.accuracy_percent);
    assert_eq!(row[7].parse::<u64>().unwrap(), report.keystrokes);
    assert_eq!(row[8].parse::<u64>().unwrap(), report.backspaces);
    assert_eq!(row[9].parse::<u32>().unwrap(), report.timer_minutes);
}

#[test]
fn exported_values_match_the_session() {
    let tracker = finished_session();
    let report = SessionReport::new(&tracker, at(30_000));

    // 19 chars over 23 keystrokes in half a minute.
    assert_eq!(report.duration_seconds, 30);
    assert_eq!(report.characters, 19);
    assert_eq!(report.words, 4);
    assert_eq!(report.keystrokes, 23);
    assert_eq!(report.backspaces, 2);
    assert_eq!(report.timer_minutes, 1);
    assert_eq!(report.wpm_gross, 7.6);
    assert_eq!(report.accuracy_percent, 82.61);
    assert_eq!(report.wpm_net, 6.28);
    assert_eq!(report.date, "1970-01-01T00:00:30Z");
}

#[test]
fn export_for_untouched_session_is_all_zeroes() {
    let tracker = TypingSessionTracker::new();
    let report = SessionReport::new(&tracker, at(0));

    assert_eq!(report.duration_seconds, 0);
    assert_eq!(report.characters, 0);
    assert_eq!(report.words, 0);
    assert_eq!(report.wpm_gross, 0.0);
    assert_eq!(report.wpm_net, 0.0);
    assert_eq!(report.accuracy_percent, 100.0);
    assert_eq!(report.keystrokes, 0);
    assert_eq!(report.backspaces, 0);
    assert_eq!(report.timer_minutes, 0);

    let dir = tempfile::tempdir().unwrap();
    let path = CsvExporter::with_dir(dir.path()).export(&report).unwrap();
    let contents = std::fs::read_to_string(path).unwrap();
    assert!(contents
        .lines()
        .nth(1)
        .unwrap()
        .ends_with("0,0,0,0.00,0.00,100.00,0,0,0"));
}

#[test]
fn repeated_exports_produce_distinct_files_per_timestamp() {
    let tracker = finished_session();
    let dir = tempfile::tempdir().unwrap();
    let exporter = CsvExporter::with_dir(dir.path());

    let first = exporter
        .export(&SessionReport::new(&tracker, at(30_000)))
        .unwrap();
    let second = exporter
        .export(&SessionReport::new(&tracker, at(31_000)))
        .unwrap();

    assert_ne!(first, second);
    assert!(first.exists() && second.exists());
}
