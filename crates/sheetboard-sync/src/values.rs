//! Decoding for the Sheets v4 `ValueRange` response.

use serde::Deserialize;
use serde_json::Value;

use crate::error::SyncError;
use crate::source::Row;

/// The subset of a `ValueRange` body the dashboard reads.
///
/// The API omits `values` entirely when the range holds no data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValueRange {
    #[serde(default)]
    pub range: Option<String>,
    #[serde(default)]
    pub values: Option<Vec<Vec<Value>>>,
}

impl ValueRange {
    /// Decode a raw response body.
    pub fn from_json(body: &str) -> Result<Self, SyncError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Rows with every cell rendered as a string. Absent `values` is zero rows.
    pub fn into_rows(self) -> Vec<Row> {
        self.values
            .unwrap_or_default()
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect()
    }
}

fn cell_to_string(cell: Value) -> String {
    match cell {
        Value::String(s) => s,
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_rows_pass_through() {
        let body = r#"{
            "range": "Sheet1!A2:G1000",
            "majorDimension": "ROWS",
            "values": [
                ["10/18/2026 9:00:00", "Bug A", "desc", "Bug", "Critical", "Open"],
                ["", "Task B"]
            ]
        }"#;
        let range = ValueRange::from_json(body).unwrap();
        assert_eq!(range.range.as_deref(), Some("Sheet1!A2:G1000"));
        let rows = range.into_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][1], "Bug A");
        assert_eq!(rows[1], vec!["".to_string(), "Task B".to_string()]);
    }

    #[test]
    fn missing_values_is_zero_rows() {
        let range = ValueRange::from_json(r#"{"range": "Sheet1!A2:G1000", "majorDimension": "ROWS"}"#)
            .unwrap();
        assert!(range.into_rows().is_empty());
    }

    #[test]
    fn empty_values_is_zero_rows() {
        let range = ValueRange::from_json(r#"{"values": []}"#).unwrap();
        assert!(range.into_rows().is_empty());
    }

    #[test]
    fn non_string_cells_are_stringified() {
        let range = ValueRange::from_json(r#"{"values": [[45123, true, null, "x", 1.5]]}"#).unwrap();
        assert_eq!(range.into_rows()[0], vec!["45123", "true", "", "x", "1.5"]);
    }

    #[test]
    fn malformed_body_is_json_error() {
        let err = ValueRange::from_json("<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, SyncError::Json(_)));
        assert!(err.to_string().starts_with("invalid response body:"));
    }

    #[test]
    fn wrong_shape_is_json_error() {
        let err = ValueRange::from_json(r#"{"values": "nope"}"#).unwrap_err();
        assert!(matches!(err, SyncError::Json(_)));
    }
}
