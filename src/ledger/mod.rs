//! Daily attendance ledger: one xlsx file per calendar date.
//!
//! Writes are whole-file rewrites (load, push, encode, rename over). A per-day
//! lock serializes writers of the same date inside this process, so two
//! concurrent appends can no longer lose one another's row.

mod row;
mod xlsx;

pub use row::{AttendanceRow, LAST_NAME, LedgerTable, NAME, TIMESTAMP};

use crate::errors::{AppError, AppResult};
use crate::utils::path::write_atomic;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// Result of a guarded append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    Appended,
    Duplicate,
}

#[derive(Debug, Default)]
struct DayLocks {
    inner: Mutex<HashMap<NaiveDate, Arc<Mutex<()>>>>,
}

impl DayLocks {
    fn for_day(&self, date: NaiveDate) -> AppResult<Arc<Mutex<()>>> {
        let mut map = self
            .inner
            .lock()
            .map_err(|_| AppError::Other("ledger lock table poisoned".into()))?;
        // drop locks nobody holds for other days
        map.retain(|d, l| *d == date || Arc::strong_count(l) > 1);
        Ok(map.entry(date).or_default().clone())
    }
}

fn hold(lock: &Mutex<()>) -> MutexGuard<'_, ()> {
    // the guarded data is (), a poisoned lock carries no broken state
    lock.lock().unwrap_or_else(|p| p.into_inner())
}

#[derive(Debug)]
pub struct Ledger {
    dir: PathBuf,
    locks: DayLocks,
}

impl Ledger {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            locks: DayLocks::default(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `<dir>/attendance_YYYY-MM-DD.xlsx`
    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir
            .join(format!("attendance_{}.xlsx", date.format("%Y-%m-%d")))
    }

    pub fn exists(&self, date: NaiveDate) -> bool {
        self.path_for(date).is_file()
    }

    /// Raw bytes of the persisted file.
    pub fn export(&self, date: NaiveDate) -> AppResult<Vec<u8>> {
        match fs::read(self.path_for(date)) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(not_found(date)),
            Err(e) => Err(e.into()),
        }
    }

    pub fn load(&self, date: NaiveDate) -> AppResult<LedgerTable> {
        xlsx::decode(&self.export(date)?)
    }

    /// Like [`Ledger::load`], with an absent ledger read as empty.
    pub fn load_or_empty(&self, date: NaiveDate) -> AppResult<LedgerTable> {
        match self.load(date) {
            Err(AppError::NotFound(_)) => Ok(LedgerTable::new()),
            other => other,
        }
    }

    pub fn contains(&self, date: NaiveDate, name: &str, lastname: &str) -> AppResult<bool> {
        Ok(self.load_or_empty(date)?.contains(name, lastname))
    }

    pub fn headers(&self, date: NaiveDate) -> AppResult<Vec<String>> {
        Ok(self.load_or_empty(date)?.into_parts().0)
    }

    pub fn rows(&self, date: NaiveDate) -> AppResult<Vec<AttendanceRow>> {
        Ok(self.load_or_empty(date)?.into_parts().1)
    }

    /// Append `row` to the day's ledger, creating it if needed.
    pub fn append(&self, date: NaiveDate, row: AttendanceRow) -> AppResult<()> {
        let lock = self.locks.for_day(date)?;
        let _guard = hold(&lock);

        let mut table = self.load_or_empty(date)?;
        table.push(row);
        self.write(date, &table)
    }

    /// Duplicate check and append under one hold of the day lock.
    pub fn append_unless_present(
        &self,
        date: NaiveDate,
        row: AttendanceRow,
    ) -> AppResult<AppendOutcome> {
        let lock = self.locks.for_day(date)?;
        let _guard = hold(&lock);

        let mut table = self.load_or_empty(date)?;
        let name = row.name().unwrap_or_default();
        let lastname = row.last_name().unwrap_or_default();
        if table.contains(name, lastname) {
            return Ok(AppendOutcome::Duplicate);
        }

        table.push(row);
        self.write(date, &table)?;
        Ok(AppendOutcome::Appended)
    }

    /// Remove the day's ledger. Absent is fine.
    pub fn delete(&self, date: NaiveDate) -> AppResult<()> {
        let lock = self.locks.for_day(date)?;
        let _guard = hold(&lock);

        match fs::remove_file(self.path_for(date)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, date: NaiveDate, table: &LedgerTable) -> AppResult<()> {
        let bytes = xlsx::encode(table)?;
        write_atomic(&self.path_for(date), &bytes)?;
        Ok(())
    }
}

fn not_found(date: NaiveDate) -> AppError {
    AppError::NotFound(format!("No attendance ledger for {date}"))
}
