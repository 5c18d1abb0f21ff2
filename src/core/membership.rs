use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{UpsetError, UpsetResult};

/// One boolean flag per category, in table category order.
pub type MembershipMask = SmallVec<[bool; 16]>;

/// One record of a membership table: a category combination and how many
/// underlying entities share it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MembershipRow {
    pub membership: MembershipMask,
    pub count: u64,
}

impl MembershipRow {
    #[must_use]
    pub fn new(membership: impl IntoIterator<Item = bool>, count: u64) -> Self {
        Self {
            membership: membership.into_iter().collect(),
            count,
        }
    }
}

/// Pre-aggregated boolean-membership table.
///
/// Fields are public so callers can assemble tables directly; every consumer
/// in this crate calls [`MembershipTable::validate`] before reading them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MembershipTable {
    pub categories: Vec<String>,
    pub rows: Vec<MembershipRow>,
}

impl MembershipTable {
    pub fn new(categories: Vec<String>, rows: Vec<MembershipRow>) -> UpsetResult<Self> {
        let table = Self { categories, rows };
        table.validate()?;
        Ok(table)
    }

    /// Builds a table from per-row category lists.
    ///
    /// Category names are collected from every entry and sorted; a name listed
    /// twice in one entry counts once. An empty list is the all-false row.
    pub fn from_memberships<I, M, S>(entries: I) -> UpsetResult<Self>
    where
        I: IntoIterator<Item = (M, u64)>,
        M: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries: Vec<(BTreeSet<String>, u64)> = entries
            .into_iter()
            .map(|(names, count)| (names.into_iter().map(Into::into).collect(), count))
            .collect();

        let categories: Vec<String> = entries
            .iter()
            .flat_map(|(names, _)| names.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let rows = entries
            .iter()
            .map(|(names, count)| {
                MembershipRow::new(categories.iter().map(|c| names.contains(c)), *count)
            })
            .collect();

        Self::new(categories, rows)
    }

    /// Parses `{"categories": [..], "rows": [{"membership": [..], "count": n}]}`.
    pub fn from_json_str(input: &str) -> UpsetResult<Self> {
        let table: Self = serde_json::from_str(input)
            .map_err(|e| UpsetError::Format(format!("failed to parse membership table: {e}")))?;
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> UpsetResult<()> {
        if self.categories.is_empty() && !self.rows.is_empty() {
            return Err(UpsetError::Format(
                "membership index must have at least one category level".to_owned(),
            ));
        }

        let mut seen = HashSet::with_capacity(self.categories.len());
        for name in &self.categories {
            if name.trim().is_empty() {
                return Err(UpsetError::Format(
                    "category names must not be empty".to_owned(),
                ));
            }
            if !seen.insert(name.as_str()) {
                return Err(UpsetError::Format(format!(
                    "category `{name}` appears more than once in the index"
                )));
            }
        }

        for (index, row) in self.rows.iter().enumerate() {
            if row.membership.len() != self.categories.len() {
                return Err(UpsetError::Format(format!(
                    "row {index} has {} membership flags, expected {}",
                    row.membership.len(),
                    self.categories.len()
                )));
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Names of the categories flagged in `mask`, sorted alphabetically.
    #[must_use]
    pub fn active_categories(&self, mask: &[bool]) -> Vec<String> {
        let mut names: Vec<String> = self
            .categories
            .iter()
            .zip(mask)
            .filter(|(_, flag)| **flag)
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }
}
