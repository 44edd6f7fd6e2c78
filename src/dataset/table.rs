//! Verbatim string table
//!
//! Keeps headers and cells exactly as read. Empty cells stand for missing
//! values. Used wherever a file must round-trip untouched (explicit impact
//! links, reference codes).

use std::collections::BTreeMap;

use serde_json::{Map, Value};

/// Header row plus string cells, row-major.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates an empty table with the given columns
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Builds a table from already-read parts. Short rows are padded with
    /// blanks; callers reject rows wider than the header.
    pub fn from_parts(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                if row.len() < width {
                    row.resize(width, String::new());
                }
                row
            })
            .collect();
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell value, `None` when the column is unknown or the cell is blank
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows
            .get(row)
            .and_then(|r| r.get(idx))
            .map(|s| s.as_str())
            .filter(|s| !s.trim().is_empty())
    }

    /// Appends a row given as column -> value. Unknown columns are added to
    /// the header and back-filled with blanks for existing rows.
    pub fn push_row(&mut self, values: &BTreeMap<String, String>) {
        for key in values.keys() {
            if !self.has_column(key) {
                self.headers.push(key.clone());
                for row in &mut self.rows {
                    row.push(String::new());
                }
            }
        }

        let row = self
            .headers
            .iter()
            .map(|h| values.get(h).cloned().unwrap_or_default())
            .collect();
        self.rows.push(row);
    }

    /// Rows as JSON objects; blank cells become `null`
    pub fn to_json_rows(&self) -> Vec<Value> {
        self.rows
            .iter()
            .map(|row| {
                let mut obj = Map::new();
                for (h, cell) in self.headers.iter().zip(row) {
                    let v = if cell.is_empty() {
                        Value::Null
                    } else {
                        Value::String(cell.clone())
                    };
                    obj.insert(h.clone(), v);
                }
                Value::Object(obj)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_blank_is_none() {
        let table = Table::from_parts(
            vec!["a".into(), "b".into()],
            vec![vec!["1".into(), "".into()]],
        );
        assert_eq!(table.get(0, "a"), Some("1"));
        assert_eq!(table.get(0, "b"), None);
        assert_eq!(table.get(0, "c"), None);
        assert_eq!(table.get(1, "a"), None);
    }

    #[test]
    fn test_from_parts_pads_short_rows() {
        let table = Table::from_parts(vec!["a".into(), "b".into()], vec![vec!["1".into()]]);
        assert_eq!(table.rows()[0], vec!["1".to_string(), String::new()]);
    }

    #[test]
    fn test_push_row_extends_headers() {
        let mut table = Table::new(["parent_id", "child_id"]);
        let mut first = BTreeMap::new();
        first.insert("parent_id".to_string(), "evt_1".to_string());
        first.insert("child_id".to_string(), "obs_1".to_string());
        table.push_row(&first);

        let mut second = first.clone();
        second.insert("id".to_string(), "imp_1".to_string());
        table.push_row(&second);

        assert_eq!(table.headers(), &["parent_id", "child_id", "id"]);
        assert_eq!(table.get(0, "id"), None);
        assert_eq!(table.get(1, "id"), Some("imp_1"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_json_rows_null_for_blank() {
        let table = Table::from_parts(
            vec!["a".into(), "b".into()],
            vec![vec!["x".into(), "".into()]],
        );
        let rows = table.to_json_rows();
        assert_eq!(rows[0]["a"], "x");
        assert!(rows[0]["b"].is_null());
    }
}
