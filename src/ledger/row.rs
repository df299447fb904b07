use serde::ser::{Serialize, SerializeMap, Serializer};

pub const NAME: &str = "Name";
pub const LAST_NAME: &str = "Last Name";
pub const TIMESTAMP: &str = "Timestamp";

/// One attendance record: ordered `(column, value)` pairs.
///
/// Columns vary between rows of the same day when the settings change
/// mid-day, so a row carries its own column names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceRow {
    cells: Vec<(String, String)>,
}

impl AttendanceRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `column` to `value`, replacing an existing value in place.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        let column = column.into();
        let value = value.into();
        match self.cells.iter_mut().find(|(c, _)| *c == column) {
            Some(cell) => cell.1 = value,
            None => self.cells.push((column, value)),
        }
    }

    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(column, value);
        self
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(c, _)| c.as_str())
    }

    pub fn cells(&self) -> &[(String, String)] {
        &self.cells
    }

    pub fn name(&self) -> Option<&str> {
        self.get(NAME)
    }

    pub fn last_name(&self) -> Option<&str> {
        self.get(LAST_NAME)
    }

    pub fn timestamp(&self) -> Option<&str> {
        self.get(TIMESTAMP)
    }

    /// Exact, case-sensitive match on both identity columns.
    pub fn is_same_person(&self, name: &str, lastname: &str) -> bool {
        self.name() == Some(name) && self.last_name() == Some(lastname)
    }
}

/// Rows serialize as maps holding only the columns the row has.
impl Serialize for AttendanceRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (c, v) in &self.cells {
            map.serialize_entry(c, v)?;
        }
        map.end()
    }
}

/// A day's ledger in memory: ordered headers plus ordered rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerTable {
    headers: Vec<String>,
    rows: Vec<AttendanceRow>,
}

impl LedgerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from decoded parts. Headers of the rows that are not listed are appended.
    pub fn from_parts(headers: Vec<String>, rows: Vec<AttendanceRow>) -> Self {
        let mut table = Self {
            headers,
            rows: Vec::with_capacity(rows.len()),
        };
        for row in rows {
            table.push(row);
        }
        table
    }

    /// Append a row, extending the header union with any new columns.
    pub fn push(&mut self, row: AttendanceRow) {
        for c in row.columns() {
            if !self.headers.iter().any(|h| h == c) {
                self.headers.push(c.to_string());
            }
        }
        self.rows.push(row);
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[AttendanceRow] {
        &self.rows
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<AttendanceRow>) {
        (self.headers, self.rows)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, name: &str, lastname: &str) -> bool {
        self.rows.iter().any(|r| r.is_same_person(name, lastname))
    }

    /// A row's values aligned to the headers; `None` where the row lacks the column.
    pub fn aligned(&self, row: &AttendanceRow) -> Vec<Option<String>> {
        self.headers
            .iter()
            .map(|h| row.get(h).map(str::to_string))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, last: &str) -> AttendanceRow {
        AttendanceRow::new()
            .with(NAME, name)
            .with(LAST_NAME, last)
            .with(TIMESTAMP, "2025-06-18 09:00")
    }

    #[test]
    fn header_union_keeps_first_seen_order() {
        let mut t = LedgerTable::new();
        t.push(row("Ana", "Lopez"));
        t.push(
            AttendanceRow::new()
                .with(NAME, "Luis")
                .with(LAST_NAME, "Diaz")
                .with("Empresa", "ACME")
                .with(TIMESTAMP, "2025-06-18 09:10"),
        );
        assert_eq!(t.headers(), &[NAME, LAST_NAME, TIMESTAMP, "Empresa"]);
        assert_eq!(
            t.aligned(&t.rows()[0]),
            vec![
                Some("Ana".to_string()),
                Some("Lopez".to_string()),
                Some("2025-06-18 09:00".to_string()),
                None
            ]
        );
    }

    #[test]
    fn duplicate_match_is_exact() {
        let mut t = LedgerTable::new();
        t.push(row("Ana", "Lopez"));
        assert!(t.contains("Ana", "Lopez"));
        assert!(!t.contains("ana", "Lopez"));
        assert!(!t.contains("Ana", "López"));
        assert!(!t.contains("Ana ", "Lopez"));
    }

    #[test]
    fn set_replaces_existing_column() {
        let mut r = row("Ana", "Lopez");
        r.set(NAME, "Ana María");
        assert_eq!(r.name(), Some("Ana María"));
        assert_eq!(r.columns().count(), 3);
    }

    #[test]
    fn serializes_only_present_columns() {
        let json = serde_json::to_string(&row("Ana", "Lopez")).unwrap();
        assert_eq!(
            json,
            r#"{"Name":"Ana","Last Name":"Lopez","Timestamp":"2025-06-18 09:00"}"#
        );
    }
}
