//! Operator prefixes on filter field names.
//!
//! `GreaterThanOrEqualBirthDate` targets `BirthDate` with a `>=` bound,
//! `ContainsName` targets `Name` with a substring match and `ListId` marks a
//! collection of candidate ids. Prefixes are checked in a fixed order and the
//! first match wins, so the order must put longer prefixes before the shorter
//! ones they start with.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::FilterError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Operator {
    LessThanOrEqual,
    GreaterThanOrEqual,
    GreaterThan,
    LessThan,
    Contains,
    List,
}

impl Operator {
    /// Most specific first: `GreaterThanOrEqual` before `GreaterThan`.
    pub const DEFAULT_ORDER: [Self; 6] = [
        Self::LessThanOrEqual,
        Self::GreaterThanOrEqual,
        Self::GreaterThan,
        Self::LessThan,
        Self::Contains,
        Self::List,
    ];
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LessThanOrEqual => "LessThanOrEqual",
            Self::GreaterThanOrEqual => "GreaterThanOrEqual",
            Self::GreaterThan => "GreaterThan",
            Self::LessThan => "LessThan",
            Self::Contains => "Contains",
            Self::List => "List",
        };
        f.write_str(name)
    }
}

/// Prefix naming conventions, loadable from a configuration section.
///
/// ```json
/// { "GreaterThanOrEqual": "Min", "LessThanOrEqual": "Max" }
/// ```
///
/// Keys left out keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FilterConventions {
    pub less_than_or_equal: String,
    pub greater_than_or_equal: String,
    pub greater_than: String,
    pub less_than: String,
    pub contains: String,
    /// Also the marker for collection-valued fields.
    pub list: String,
    /// Order in which the prefixes are checked.
    pub order: Vec<Operator>,
}

impl Default for FilterConventions {
    fn default() -> Self {
        Self {
            less_than_or_equal: "LessThanOrEqual".to_string(),
            greater_than_or_equal: "GreaterThanOrEqual".to_string(),
            greater_than: "GreaterThan".to_string(),
            less_than: "LessThan".to_string(),
            contains: "Contains".to_string(),
            list: "List".to_string(),
            order: Operator::DEFAULT_ORDER.to_vec(),
        }
    }
}

impl FilterConventions {
    #[must_use]
    pub fn prefix(&self, operator: Operator) -> &str {
        match operator {
            Operator::LessThanOrEqual => &self.less_than_or_equal,
            Operator::GreaterThanOrEqual => &self.greater_than_or_equal,
            Operator::GreaterThan => &self.greater_than,
            Operator::LessThan => &self.less_than,
            Operator::Contains => &self.contains,
            Operator::List => &self.list,
        }
    }
}

/// Validated, ordered prefix table.
#[derive(Debug, Clone)]
pub struct PrefixTable {
    entries: Vec<(Operator, String)>,
}

impl PrefixTable {
    /// Build a table, rejecting orders in which a prefix could never match.
    pub fn new(conventions: &FilterConventions) -> Result<Self, FilterError> {
        let mut order = conventions.order.clone();
        order.sort_by_key(|op| Operator::DEFAULT_ORDER.iter().position(|o| o == op));
        if order != Operator::DEFAULT_ORDER {
            return Err(FilterError::InvalidPrefixOrder(conventions.order.clone()));
        }

        let table = Self::build(conventions);
        for (i, (operator, prefix)) in table.entries.iter().enumerate() {
            if prefix.is_empty() {
                return Err(FilterError::EmptyPrefix(*operator));
            }
            if let Some((_, earlier)) = table.entries[..i]
                .iter()
                .find(|(_, earlier)| starts_with_ignore_case(prefix, earlier).is_some())
            {
                tracing::warn!(%earlier, later = %prefix, "filter prefix can never match");
                return Err(FilterError::MisorderedPrefix {
                    earlier: earlier.clone(),
                    later: prefix.clone(),
                });
            }
        }
        Ok(table)
    }

    fn build(conventions: &FilterConventions) -> Self {
        Self {
            entries: conventions
                .order
                .iter()
                .map(|op| (*op, conventions.prefix(*op).to_string()))
                .collect(),
        }
    }

    /// Split a field name into its operator and the member name after it.
    /// Names without a known prefix come back whole.
    #[must_use]
    pub fn strip<'n>(&self, name: &'n str) -> (Option<Operator>, &'n str) {
        for (operator, prefix) in &self.entries {
            if let Some(rest) = starts_with_ignore_case(name, prefix) {
                return (Some(*operator), rest);
            }
        }
        (None, name)
    }

    #[must_use]
    pub fn prefix(&self, operator: Operator) -> &str {
        self.entries
            .iter()
            .find(|(op, _)| *op == operator)
            .map_or("", |(_, prefix)| prefix.as_str())
    }

    #[must_use]
    pub fn has_prefix(&self, name: &str, operator: Operator) -> bool {
        starts_with_ignore_case(name, self.prefix(operator)).is_some()
    }

    #[must_use]
    pub fn is_list_marked(&self, name: &str) -> bool {
        self.has_prefix(name, Operator::List)
    }
}

impl Default for PrefixTable {
    fn default() -> Self {
        Self::build(&FilterConventions::default())
    }
}

/// ASCII case-insensitive `strip_prefix`.
fn starts_with_ignore_case<'n>(name: &'n str, prefix: &str) -> Option<&'n str> {
    let head = name.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        name.get(prefix.len()..)
    } else {
        None
    }
}
