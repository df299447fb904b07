use crate::core::visitor::VisitorState;
use crate::errors::{AppError, AppResult};
use crate::ledger::{AppendOutcome, AttendanceRow, LAST_NAME, Ledger, NAME, TIMESTAMP};
use crate::settings::{Settings, SettingsStore};
use crate::utils::date;
use chrono::NaiveDateTime;
use serde::Deserialize;

pub const REQUIRED_FIELDS_MESSAGE: &str = "Nombre y Apellido son obligatorios";
pub const SAVE_FAILED_MESSAGE: &str = "Sistema error: No se pudo guardar la asistencia";

/// Raw form input, as posted to `/submit`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub question1: String,
    #[serde(default)]
    pub question2: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Row appended; carries the stored row.
    Accepted(AttendanceRow),
    /// Same `(Name, Last Name)` already checked in today; nothing written.
    Duplicate,
}

/// High-level business logic for a check-in submission.
pub struct SubmitLogic<'a> {
    settings: &'a SettingsStore,
    ledger: &'a Ledger,
}

impl<'a> SubmitLogic<'a> {
    pub fn new(settings: &'a SettingsStore, ledger: &'a Ledger) -> Self {
        Self { settings, ledger }
    }

    /// Submit against the local clock.
    pub fn submit(&self, form: &SubmitForm, visitor: &mut VisitorState) -> AppResult<SubmitOutcome> {
        self.submit_at(form, date::now(), visitor)
    }

    pub fn submit_at(
        &self,
        form: &SubmitForm,
        now: NaiveDateTime,
        visitor: &mut VisitorState,
    ) -> AppResult<SubmitOutcome> {
        let settings = self.settings.load()?;

        // ------------------------------------------------
        // 1️⃣ Validation
        // ------------------------------------------------
        let name = form.name.trim();
        let lastname = form.lastname.trim();
        if name.is_empty() || lastname.is_empty() {
            return Err(AppError::Validation(REQUIRED_FIELDS_MESSAGE.into()));
        }

        // le domande disattivate non vengono lette dal form
        let q1 = if settings.question_1_enabled() {
            form.question1.trim()
        } else {
            ""
        };
        let q2 = if settings.question_2_enabled() {
            form.question2.trim()
        } else {
            ""
        };

        // ------------------------------------------------
        // 2️⃣ Duplicate check + append
        // ------------------------------------------------
        let row = build_row(&settings, name, lastname, q1, q2, &now);
        let today = now.date();

        let outcome = self
            .ledger
            .append_unless_present(today, row.clone())
            .map_err(|e| {
                tracing::error!(date = %today, error = %e, "error saving attendance");
                AppError::Persistence(SAVE_FAILED_MESSAGE.into())
            })?;

        // ------------------------------------------------
        // 3️⃣ Visitor state for the acknowledgment view
        // ------------------------------------------------
        visitor.duplicate_attempt = outcome == AppendOutcome::Duplicate;
        visitor.name = name.to_string();
        visitor.lastname = lastname.to_string();
        visitor.question_1 = q1.to_string();

        Ok(match outcome {
            AppendOutcome::Appended => {
                tracing::info!(date = %today, "attendance recorded");
                SubmitOutcome::Accepted(row)
            }
            AppendOutcome::Duplicate => {
                tracing::info!(date = %today, "duplicate check-in rejected");
                SubmitOutcome::Duplicate
            }
        })
    }
}

/// Columns: Name, Last Name, enabled question labels, Timestamp.
pub fn build_row(
    settings: &Settings,
    name: &str,
    lastname: &str,
    q1: &str,
    q2: &str,
    now: &NaiveDateTime,
) -> AttendanceRow {
    let mut row = AttendanceRow::new().with(NAME, name).with(LAST_NAME, lastname);
    if settings.question_1_enabled() {
        row.set(settings.question_1_label(), q1);
    }
    if settings.question_2_enabled() {
        row.set(settings.question_2_label(), q2);
    }
    row.set(TIMESTAMP, date::format_timestamp(now));
    row
}
