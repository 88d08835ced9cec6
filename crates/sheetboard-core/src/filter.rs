//! Equality filters over the sorted update list.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::priority::priority_rank;
use crate::update::UpdateRecord;

/// A filterable record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    IssueType,
    Priority,
    Status,
}

impl FilterField {
    pub const ALL: [FilterField; 3] = [Self::IssueType, Self::Priority, Self::Status];

    /// The record value this field filters on.
    pub fn value_of(self, record: &UpdateRecord) -> &str {
        match self {
            Self::IssueType => &record.issue_type,
            Self::Priority => &record.priority,
            Self::Status => &record.status,
        }
    }

    /// Human label used by selectors.
    pub fn label(self) -> &'static str {
        match self {
            Self::IssueType => "Issue type",
            Self::Priority => "Priority",
            Self::Status => "Status",
        }
    }

    /// Stable identifier used in markup and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Self::IssueType => "type",
            Self::Priority => "priority",
            Self::Status => "status",
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown filter field: {0}")]
pub struct UnknownFilterField(pub String);

impl FromStr for FilterField {
    type Err = UnknownFilterField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "type" | "issue-type" | "issueType" => Ok(Self::IssueType),
            "priority" => Ok(Self::Priority),
            "status" => Ok(Self::Status),
            other => Err(UnknownFilterField(other.to_string())),
        }
    }
}

/// The three optional filter selections. `None` means unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    pub issue_type: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
}

impl FilterSet {
    pub fn get(&self, field: FilterField) -> Option<&str> {
        match field {
            FilterField::IssueType => self.issue_type.as_deref(),
            FilterField::Priority => self.priority.as_deref(),
            FilterField::Status => self.status.as_deref(),
        }
    }

    /// Set or unset one filter. An empty value unsets it.
    pub fn set(&mut self, field: FilterField, value: Option<String>) {
        let value = value.filter(|v| !v.is_empty());
        match field {
            FilterField::IssueType => self.issue_type = value,
            FilterField::Priority => self.priority = value,
            FilterField::Status => self.status = value,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        FilterField::ALL.iter().all(|&f| self.get(f).is_none())
    }

    /// Whether a record passes every set filter.
    pub fn matches(&self, record: &UpdateRecord) -> bool {
        FilterField::ALL.iter().all(|&field| {
            self.get(field)
                .is_none_or(|wanted| field.value_of(record) == wanted)
        })
    }

    /// The visible subset of `records`, order preserved.
    pub fn apply(&self, records: &[UpdateRecord]) -> Vec<UpdateRecord> {
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

/// Distinct values observed per field, for selector options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub issue_types: Vec<String>,
    pub priorities: Vec<String>,
    pub statuses: Vec<String>,
}

impl FilterOptions {
    /// Collect the vocabulary from `records`.
    ///
    /// Issue types and statuses come out alphabetically. Priorities come out
    /// in rank order, with unrecognized labels alphabetically after them.
    /// Active selections in `active` are always included.
    pub fn observe(records: &[UpdateRecord], active: &FilterSet) -> Self {
        let observed = |field: FilterField| -> BTreeSet<String> {
            records
                .iter()
                .map(|r| field.value_of(r))
                .chain(active.get(field))
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .collect()
        };

        let mut priorities: Vec<String> = observed(FilterField::Priority).into_iter().collect();
        priorities.sort_by_key(|p| priority_rank(p));

        Self {
            issue_types: observed(FilterField::IssueType).into_iter().collect(),
            priorities,
            statuses: observed(FilterField::Status).into_iter().collect(),
        }
    }

    pub fn values(&self, field: FilterField) -> &[String] {
        match field {
            FilterField::IssueType => &self.issue_types,
            FilterField::Priority => &self.priorities,
            FilterField::Status => &self.statuses,
        }
    }
}
