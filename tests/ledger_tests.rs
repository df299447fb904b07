use chrono::NaiveDate;
use rcheckin::errors::AppError;
use rcheckin::ledger::{AppendOutcome, AttendanceRow, LAST_NAME, Ledger, NAME, TIMESTAMP};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

fn setup_ledger(name: &str) -> Ledger {
    let mut dir: PathBuf = env::temp_dir();
    dir.push(format!("rcheckin_ledger_{name}"));
    fs::remove_dir_all(&dir).ok();
    Ledger::new(dir)
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 18).unwrap()
}

fn row(name: &str, last: &str) -> AttendanceRow {
    AttendanceRow::new()
        .with(NAME, name)
        .with(LAST_NAME, last)
        .with(TIMESTAMP, "2025-06-18 09:00")
}

#[test]
fn test_absent_ledger_reads_as_empty() {
    let ledger = setup_ledger("absent");

    assert!(!ledger.exists(day()));
    assert!(matches!(ledger.load(day()), Err(AppError::NotFound(_))));
    assert!(matches!(ledger.export(day()), Err(AppError::NotFound(_))));
    assert!(ledger.headers(day()).unwrap().is_empty());
    assert!(ledger.rows(day()).unwrap().is_empty());
    assert!(!ledger.contains(day(), "Ana", "Lopez").unwrap());
}

#[test]
fn test_append_creates_then_extends() {
    let ledger = setup_ledger("append");

    ledger.append(day(), row("Ana", "Lopez")).unwrap();
    assert!(ledger.exists(day()));
    assert!(
        ledger
            .path_for(day())
            .ends_with("attendance_2025-06-18.xlsx")
    );

    ledger.append(day(), row("Luis", "Diaz")).unwrap();

    let rows = ledger.rows(day()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name(), Some("Ana"));
    assert_eq!(rows[1].name(), Some("Luis"));
    assert!(ledger.contains(day(), "Luis", "Diaz").unwrap());
    assert!(!ledger.contains(day(), "Luis", "diaz").unwrap());

    // other days are separate ledgers
    let other = day().succ_opt().unwrap();
    assert!(!ledger.contains(other, "Ana", "Lopez").unwrap());
}

#[test]
fn test_guarded_append_rejects_duplicates() {
    let ledger = setup_ledger("guarded");

    assert_eq!(
        ledger.append_unless_present(day(), row("Ana", "Lopez")).unwrap(),
        AppendOutcome::Appended
    );
    let before = ledger.export(day()).unwrap();

    assert_eq!(
        ledger.append_unless_present(day(), row("Ana", "Lopez")).unwrap(),
        AppendOutcome::Duplicate
    );
    // a rejected duplicate does not touch the file
    assert_eq!(ledger.export(day()).unwrap(), before);
    assert_eq!(ledger.rows(day()).unwrap().len(), 1);
}

#[test]
fn test_mixed_columns_expose_union() {
    let ledger = setup_ledger("union");

    ledger
        .append(day(), row("Ana", "Lopez").with("Pregunta 1", "555"))
        .unwrap();
    ledger
        .append(
            day(),
            AttendanceRow::new()
                .with(NAME, "Luis")
                .with(LAST_NAME, "Diaz")
                .with("Pregunta 1", "556")
                .with("Pregunta 2", "ACME")
                .with(TIMESTAMP, "2025-06-18 11:00"),
        )
        .unwrap();

    let headers = ledger.headers(day()).unwrap();
    assert_eq!(
        headers,
        vec![NAME, LAST_NAME, TIMESTAMP, "Pregunta 1", "Pregunta 2"]
    );
    let rows = ledger.rows(day()).unwrap();
    assert_eq!(rows[0].get("Pregunta 2"), None);
    assert_eq!(rows[1].get("Pregunta 2"), Some("ACME"));
}

#[test]
fn test_delete_twice_is_fine() {
    let ledger = setup_ledger("delete");

    ledger.append(day(), row("Ana", "Lopez")).unwrap();
    ledger.delete(day()).unwrap();
    assert!(!ledger.exists(day()));
    ledger.delete(day()).unwrap();
    assert!(!ledger.exists(day()));
}

#[test]
fn test_corrupt_file_is_an_error_not_empty() {
    let ledger = setup_ledger("corrupt");
    fs::create_dir_all(ledger.dir()).unwrap();
    fs::write(ledger.path_for(day()), b"not a workbook").unwrap();

    assert!(ledger.load(day()).is_err());
    assert!(ledger.append(day(), row("Ana", "Lopez")).is_err());
    // the unreadable file is left alone
    assert_eq!(fs::read(ledger.path_for(day())).unwrap(), b"not a workbook");
}

// Without the per-day lock, concurrent read-modify-write appends lose rows.
#[test]
fn test_concurrent_appends_keep_every_row() {
    let ledger = Arc::new(setup_ledger("concurrent"));

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let ledger = Arc::clone(&ledger);
            thread::spawn(move || {
                ledger
                    .append(day(), row(&format!("Visitor{i}"), "Test"))
                    .unwrap();
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let rows = ledger.rows(day()).unwrap();
    assert_eq!(rows.len(), 16);
    for i in 0..16 {
        assert!(ledger.contains(day(), &format!("Visitor{i}"), "Test").unwrap());
    }
}

#[test]
fn test_concurrent_identical_submissions_land_once() {
    let ledger = Arc::new(setup_ledger("concurrent_dup"));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let ledger = Arc::clone(&ledger);
            thread::spawn(move || {
                ledger
                    .append_unless_present(day(), row("Ana", "Lopez"))
                    .unwrap()
            })
        })
        .collect();
    let appended = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|o| *o == AppendOutcome::Appended)
        .count();

    assert_eq!(appended, 1);
    assert_eq!(ledger.rows(day()).unwrap().len(), 1);
}
