//! Row parsing: raw sheet rows into [`UpdateRecord`]s.
//!
//! Column layout (the seventh column is carried by the sheet but unused):
//!
//! | idx | column      |
//! |-----|-------------|
//! | 0   | timestamp   |
//! | 1   | title       |
//! | 2   | description |
//! | 3   | issue type  |
//! | 4   | priority    |
//! | 5   | status      |

use crate::update::{DEFAULT_ISSUE_TYPE, DEFAULT_PRIORITY, DEFAULT_STATUS, UpdateRecord};

const COL_TIMESTAMP: usize = 0;
const COL_TITLE: usize = 1;
const COL_DESCRIPTION: usize = 2;
const COL_ISSUE_TYPE: usize = 3;
const COL_PRIORITY: usize = 4;
const COL_STATUS: usize = 5;

/// Parse sheet rows into update records, preserving row order.
///
/// Missing or empty cells take the record defaults. Priority and status are
/// trimmed. Rows whose title is blank after trimming are dropped.
pub fn parse_rows<R: AsRef<[String]>>(rows: &[R]) -> Vec<UpdateRecord> {
    rows.iter().filter_map(|row| parse_row(row.as_ref())).collect()
}

fn parse_row(row: &[String]) -> Option<UpdateRecord> {
    // Absent cells read as empty, so a row without a title never reaches the
    // "Untitled" default.
    let title = cell(row, COL_TITLE).filter(|t| !t.trim().is_empty())?;

    Some(UpdateRecord {
        timestamp: cell(row, COL_TIMESTAMP).unwrap_or_default().to_string(),
        title: title.to_string(),
        description: cell(row, COL_DESCRIPTION).unwrap_or_default().to_string(),
        issue_type: cell(row, COL_ISSUE_TYPE)
            .unwrap_or(DEFAULT_ISSUE_TYPE)
            .to_string(),
        priority: cell(row, COL_PRIORITY)
            .unwrap_or(DEFAULT_PRIORITY)
            .trim()
            .to_string(),
        status: cell(row, COL_STATUS)
            .unwrap_or(DEFAULT_STATUS)
            .trim()
            .to_string(),
    })
}

/// Non-empty cell value at `idx`, or `None` when absent or empty.
fn cell(row: &[String], idx: usize) -> Option<&str> {
    row.get(idx).map(String::as_str).filter(|s| !s.is_empty())
}
