//! Minimal tabular projection of raw objects.
//!
//! Stands in for a full dataframe: columns in first-seen order across the
//! records, missing values filled with null. Callers needing real dataframe
//! functionality can feed `columns()`/`rows()` into their own constructor.

use serde_json::Value;

/// A column-ordered table built from a sequence of JSON objects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Frame {
    /// Build a frame from raw records.
    ///
    /// Column order is the order keys are first seen across the records;
    /// records missing a column get a null in that cell. Non-object records
    /// contribute an all-null row.
    pub fn from_records(records: &[Value]) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for record in records {
            if let Value::Object(map) = record {
                for key in map.keys() {
                    if !columns.iter().any(|c| c == key) {
                        columns.push(key.clone());
                    }
                }
            }
        }

        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|c| record.get(c).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    /// Column names in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Row data, one vec per record, aligned with `columns()`.
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// `(rows, columns)` dimensions.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    /// Whether the frame has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All values of one column, or `None` if the column does not exist.
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|row| &row[idx]).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_records() {
        let records = vec![
            json!({"id": "a", "name": "First"}),
            json!({"id": "b", "name": "Second", "owner": "admin"}),
        ];
        let frame = Frame::from_records(&records);
        assert_eq!(frame.shape(), (2, 3));
        assert_eq!(frame.columns(), &["id", "name", "owner"]);
        assert_eq!(frame.rows()[0][2], Value::Null);
        assert_eq!(frame.rows()[1][2], json!("admin"));
    }

    #[test]
    fn test_column_access() {
        let records = vec![json!({"id": "a"}), json!({"id": "b"})];
        let frame = Frame::from_records(&records);
        let ids = frame.column("id").unwrap();
        assert_eq!(ids, vec![&json!("a"), &json!("b")]);
        assert!(frame.column("missing").is_none());
    }

    #[test]
    fn test_empty_input() {
        let frame = Frame::from_records(&[]);
        assert!(frame.is_empty());
        assert_eq!(frame.shape(), (0, 0));
    }
}
