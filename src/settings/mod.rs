//! Admin-editable form settings, persisted as a flat JSON document.
//!
//! The document is read fresh on every request and rewritten wholesale on
//! every admin save. Every key is optional: an absent key and an explicit
//! `null` both mean "unset", and the typed accessors below supply defaults.

use crate::errors::AppResult;
use crate::utils::path::write_atomic;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_QUESTION_1_LABEL: &str = "Pregunta 1";
pub const DEFAULT_QUESTION_2_LABEL: &str = "Pregunta 2";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub page_title: Option<String>,
    pub subtitle: Option<String>,
    pub logo_url: Option<String>,
    pub form_name_label: Option<String>,
    pub enable_question_1: Option<bool>,
    pub question_1_label: Option<String>,
    pub enable_question_2: Option<bool>,
    pub question_2_label: Option<String>,
    pub submit_button_label: Option<String>,
    pub form_enabled: Option<bool>,
}

impl Settings {
    /// Document returned when nothing has been saved yet.
    pub fn minimal() -> Self {
        Self {
            enable_question_1: Some(true),
            form_enabled: Some(true),
            ..Default::default()
        }
    }

    /// Every key populated; written by `rcheckin init`.
    pub fn full_defaults() -> Self {
        Self {
            page_title: Some("Registro de asistencia".into()),
            subtitle: Some("Por favor, registra tu asistencia".into()),
            logo_url: Some(String::new()),
            form_name_label: Some("Nombre".into()),
            enable_question_1: Some(true),
            question_1_label: Some(DEFAULT_QUESTION_1_LABEL.into()),
            enable_question_2: Some(false),
            question_2_label: Some(DEFAULT_QUESTION_2_LABEL.into()),
            submit_button_label: Some("Enviar".into()),
            form_enabled: Some(true),
        }
    }

    /// Absent means enabled.
    pub fn question_1_enabled(&self) -> bool {
        self.enable_question_1.unwrap_or(true)
    }

    /// Absent means disabled.
    pub fn question_2_enabled(&self) -> bool {
        self.enable_question_2.unwrap_or(false)
    }

    pub fn form_is_enabled(&self) -> bool {
        self.form_enabled.unwrap_or(true)
    }

    /// A blank label falls back to the default: it doubles as a ledger column name.
    pub fn question_1_label(&self) -> &str {
        label_or(&self.question_1_label, DEFAULT_QUESTION_1_LABEL)
    }

    pub fn question_2_label(&self) -> &str {
        label_or(&self.question_2_label, DEFAULT_QUESTION_2_LABEL)
    }

    /// Set one key from its document name. Returns false for an unknown key.
    ///
    /// Boolean keys accept `true/false`, `yes/no`, `on/off`, `1/0`; the literal
    /// `null` unsets any key.
    pub fn set_field(&mut self, key: &str, value: &str) -> Result<bool, String> {
        let text = || (value != "null").then(|| value.to_string());
        let flag = || -> Result<Option<bool>, String> {
            match value.to_ascii_lowercase().as_str() {
                "null" => Ok(None),
                "true" | "yes" | "on" | "1" => Ok(Some(true)),
                "false" | "no" | "off" | "0" => Ok(Some(false)),
                other => Err(format!("'{other}' is not a boolean")),
            }
        };

        match key {
            "page_title" => self.page_title = text(),
            "subtitle" => self.subtitle = text(),
            "logo_url" => self.logo_url = text(),
            "form_name_label" => self.form_name_label = text(),
            "question_1_label" => self.question_1_label = text(),
            "question_2_label" => self.question_2_label = text(),
            "submit_button_label" => self.submit_button_label = text(),
            "enable_question_1" => self.enable_question_1 = flag()?,
            "enable_question_2" => self.enable_question_2 = flag()?,
            "form_enabled" => self.form_enabled = flag()?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

fn label_or<'a>(label: &'a Option<String>, default: &'a str) -> &'a str {
    match label.as_deref().map(str::trim) {
        Some(l) if !l.is_empty() => l,
        _ => default,
    }
}

/// File-backed Settings store.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current document, or [`Settings::minimal`] when none is persisted.
    pub fn load(&self) -> AppResult<Settings> {
        if !self.path.exists() {
            return Ok(Settings::minimal());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Replace the persisted document with `settings`, verbatim.
    pub fn save(&self, settings: &Settings) -> AppResult<()> {
        let mut buf = Vec::new();
        let fmt = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, fmt);
        settings.serialize(&mut ser)?;
        write_atomic(&self.path, &buf)?;
        Ok(())
    }

    /// Write the full default document unless one already exists.
    /// Returns true when a file was created.
    pub fn init_defaults(&self) -> AppResult<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        self.save(&Settings::full_defaults())?;
        Ok(true)
    }
}
