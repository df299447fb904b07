// src/export/json_csv.rs

use crate::errors::AppResult;
use crate::export::notify_export_success;
use crate::ledger::LedgerTable;
use crate::ui::messages::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export JSON pretty-printed: an array of objects, one per row, holding only
/// the columns each row has.
pub(crate) fn export_json(table: &LedgerTable, path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(table.rows())?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path);
    Ok(())
}

/// Export CSV: header union first, missing cells empty.
pub(crate) fn export_csv(table: &LedgerTable, path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(table.headers())?;

    for row in table.rows() {
        let cells = table.aligned(row);
        wtr.write_record(cells.iter().map(|c| c.as_deref().unwrap_or("")))?;
    }

    wtr.flush()?;

    notify_export_success("CSV", path);
    Ok(())
}
