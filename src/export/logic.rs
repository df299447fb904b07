// src/export/logic.rs

use crate::errors::AppResult;
use crate::export::fs_utils::{ensure_absolute, ensure_writable};
use crate::export::json_csv::{export_csv, export_json};
use crate::export::{ExportFormat, notify_export_success};
use crate::ledger::Ledger;
use crate::ui::messages::{info, warning};
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

/// Logica di alto livello per l'export.
pub struct ExportLogic;

impl ExportLogic {
    /// Export the ledger of `date` to `file` (absolute path).
    ///
    /// - `Xlsx`: the persisted file, verbatim
    /// - `Csv` / `Json`: decoded rows
    ///
    /// Fails with `NotFound` when there is no ledger for the date.
    pub fn export(
        ledger: &Ledger,
        date: NaiveDate,
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<()> {
        let path = Path::new(file);

        ensure_absolute(path)?;
        // missing ledger fails before any overwrite prompt
        let bytes = ledger.export(date)?;
        ensure_writable(path, force)?;

        match format {
            ExportFormat::Xlsx => {
                info(format!("Exporting to XLSX: {}", path.display()));
                fs::write(path, bytes)?;
                notify_export_success("XLSX", path);
            }
            ExportFormat::Csv | ExportFormat::Json => {
                let table = ledger.load(date)?;
                if table.is_empty() {
                    warning(format!("Ledger for {date} has no rows."));
                }
                if format == ExportFormat::Csv {
                    export_csv(&table, path)?;
                } else {
                    export_json(&table, path)?;
                }
            }
        }

        Ok(())
    }
}
