//! Priority ranking for update records.
//!
//! Ranks follow the triage order used in the sheet:
//!
//! - Critical → 0
//! - High → 1
//! - Medium → 2
//! - Low → 3
//! - anything else → [`UNRANKED`], after every recognized value
//!
//! Matching is exact and case-sensitive: `"high"` is unrecognized.

use crate::update::UpdateRecord;

/// Rank given to priority labels outside the known set.
pub const UNRANKED: u32 = 999;

/// Recognized priority labels in rank order.
pub const KNOWN_PRIORITIES: [&str; 4] = ["Critical", "High", "Medium", "Low"];

/// Rank of a priority label. Lower sorts first.
pub fn priority_rank(priority: &str) -> u32 {
    KNOWN_PRIORITIES
        .iter()
        .position(|&p| p == priority)
        .map_or(UNRANKED, |i| i as u32)
}

/// Stable in-place sort by priority rank.
///
/// Ties, including every unrecognized label, keep their input order. No
/// secondary key is applied.
pub fn sort_by_priority(records: &mut [UpdateRecord]) {
    records.sort_by_key(|r| priority_rank(&r.priority));
}
