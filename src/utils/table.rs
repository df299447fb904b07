//! Table rendering for CLI outputs.
//! Column widths are measured in terminal cells, so accented names line up.

use unicode_width::UnicodeWidthStr;

const GREY: &str = "\x1b[90m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Placeholder shown for a cell the row does not have.
pub const MISSING: &str = "--";

pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<Option<String>>) {
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.width()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate().take(widths.len()) {
                let w = cell.as_deref().unwrap_or(MISSING).width();
                widths[i] = widths[i].max(w);
            }
        }
        widths
    }

    pub fn render(&self, color: bool) -> String {
        let widths = self.widths();
        let mut out = String::new();

        for (h, w) in self.headers.iter().zip(&widths) {
            if color {
                out.push_str(BOLD);
            }
            out.push_str(&pad(h, *w));
            if color {
                out.push_str(RESET);
            }
            out.push(' ');
        }
        out.push('\n');

        for row in &self.rows {
            for (i, w) in widths.iter().enumerate() {
                match row.get(i).and_then(|c| c.as_deref()) {
                    Some(v) => out.push_str(&pad(v, *w)),
                    None if color => {
                        out.push_str(GREY);
                        out.push_str(&pad(MISSING, *w));
                        out.push_str(RESET);
                    }
                    None => out.push_str(&pad(MISSING, *w)),
                }
                out.push(' ');
            }
            out.push('\n');
        }

        out
    }
}

fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{s}{}", " ".repeat(fill))
}
