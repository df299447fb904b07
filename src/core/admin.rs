use crate::errors::AppResult;
use crate::ledger::{Ledger, LedgerTable};
use crate::settings::{Settings, SettingsStore};
use chrono::NaiveDate;
use serde::Deserialize;

/// Fields posted by the admin settings form.
///
/// Checkboxes are present only when ticked; text inputs that the client did
/// not send stay `None` and are saved as `null`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsForm {
    pub page_title: Option<String>,
    pub subtitle: Option<String>,
    pub logo_url: Option<String>,
    pub form_name_label: Option<String>,
    pub enable_question_1: Option<String>,
    pub question_1_label: Option<String>,
    pub enable_question_2: Option<String>,
    pub question_2_label: Option<String>,
    pub submit_button_label: Option<String>,
    pub form_enabled: Option<String>,
}

impl SettingsForm {
    /// The document to save, taken literally from the form.
    pub fn into_settings(self) -> Settings {
        Settings {
            page_title: self.page_title,
            subtitle: self.subtitle,
            logo_url: self.logo_url,
            form_name_label: self.form_name_label,
            enable_question_1: Some(self.enable_question_1.is_some()),
            question_1_label: self.question_1_label,
            enable_question_2: Some(self.enable_question_2.is_some()),
            question_2_label: self.question_2_label,
            submit_button_label: self.submit_button_label,
            form_enabled: Some(self.form_enabled.is_some()),
        }
    }
}

pub struct AdminLogic<'a> {
    settings: &'a SettingsStore,
    ledger: &'a Ledger,
}

impl<'a> AdminLogic<'a> {
    pub fn new(settings: &'a SettingsStore, ledger: &'a Ledger) -> Self {
        Self { settings, ledger }
    }

    pub fn settings(&self) -> AppResult<Settings> {
        self.settings.load()
    }

    /// Overwrite the settings document with the form content.
    pub fn update_settings(&self, form: SettingsForm) -> AppResult<Settings> {
        let updated = form.into_settings();
        self.settings.save(&updated)?;
        tracing::info!(path = %self.settings.path().display(), "settings saved");
        Ok(updated)
    }

    /// Headers and rows for display. An unreadable ledger shows as empty.
    pub fn view(&self, date: NaiveDate) -> LedgerTable {
        match self.ledger.load_or_empty(date) {
            Ok(table) => table,
            Err(e) => {
                tracing::error!(date = %date, error = %e, "error loading logs");
                LedgerTable::new()
            }
        }
    }

    pub fn export(&self, date: NaiveDate) -> AppResult<Vec<u8>> {
        self.ledger.export(date)
    }

    pub fn clear(&self, date: NaiveDate) -> AppResult<()> {
        self.ledger.delete(date)?;
        tracing::info!(date = %date, "ledger cleared");
        Ok(())
    }
}
