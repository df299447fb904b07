// src/ledger/xlsx.rs

use crate::errors::AppResult;
use crate::ledger::row::{AttendanceRow, LedgerTable};
use calamine::{Data, Reader, Xlsx};
use rust_xlsxwriter::{Color, Format, FormatBorder, FormatPattern, Workbook};
use std::io::Cursor;
use unicode_width::UnicodeWidthStr;

/// Serializza il ledger in un workbook XLSX (foglio unico, header stilizzato).
///
/// Every value is written as text so that it reads back unchanged; a row that
/// lacks a column, or has an empty value for it, gets a blank cell.
pub(crate) fn encode(table: &LedgerTable) -> AppResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    // ---------------------------
    // Header
    // ---------------------------
    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in table.headers().iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, header, &header_format)?;
    }

    worksheet.set_freeze_panes(1, 0)?;

    let mut col_widths: Vec<usize> = table
        .headers()
        .iter()
        .map(|h| UnicodeWidthStr::width(h.as_str()))
        .collect();

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    // ---------------------------
    // Righe
    // ---------------------------
    for (row_index, record) in table.rows().iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band = if row_index % 2 == 0 { band1 } else { band2 };
        let fmt = Format::new()
            .set_background_color(band)
            .set_pattern(FormatPattern::Solid)
            .set_border(FormatBorder::Thin);

        for (col, value) in table.aligned(record).iter().enumerate() {
            match value.as_deref() {
                Some(v) if !v.is_empty() => {
                    worksheet.write_string_with_format(row, col as u16, v, &fmt)?;
                    col_widths[col] = col_widths[col].max(UnicodeWidthStr::width(v));
                }
                _ => {
                    worksheet.write_blank(row, col as u16, &fmt)?;
                }
            }
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet.set_column_width(c as u16, *w as f64 + 2.0)?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// Legge il primo foglio: riga 0 = header, righe successive = record.
///
/// Blank cells are missing values. Rows with no values at all are skipped.
pub(crate) fn decode(bytes: &[u8]) -> AppResult<LedgerTable> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;

    let range = match workbook.worksheet_range_at(0) {
        Some(r) => r?,
        None => return Ok(LedgerTable::new()),
    };

    let mut iter = range.rows();
    let headers: Vec<String> = match iter.next() {
        Some(cells) => cells
            .iter()
            .enumerate()
            .map(|(i, c)| cell_text(c).unwrap_or_else(|| format!("Unnamed: {i}")))
            .collect(),
        None => return Ok(LedgerTable::new()),
    };

    let mut rows = Vec::new();
    for cells in iter {
        let mut record = AttendanceRow::new();
        for (header, cell) in headers.iter().zip(cells) {
            if let Some(v) = cell_text(cell) {
                record.set(header.as_str(), v);
            }
        }
        if record.columns().next().is_some() {
            rows.push(record);
        }
    }

    Ok(LedgerTable::from_parts(headers, rows))
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
