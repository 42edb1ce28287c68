use sea_orm::{
    EntityTrait, QueryOrder, Select,
    sea_query::{Order, SimpleExpr},
};
use std::cmp::Ordering;

use crate::errors::FilterError;
use crate::filtering::conditions::ColumnMap;
use crate::schema::{Entity, PropertyPath};
use crate::value::Value;

/// One sort key. The first descriptor in a list is the primary key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortDescriptor {
    pub path: String,
    pub ascending: bool,
}

impl SortDescriptor {
    #[must_use]
    pub fn asc(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ascending: true,
        }
    }

    #[must_use]
    pub fn desc(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ascending: false,
        }
    }

    #[must_use]
    pub const fn order(&self) -> Order {
        if self.ascending { Order::Asc } else { Order::Desc }
    }
}

/// Parse `"Name desc, Location.Name"` into sort descriptors.
///
/// Clauses are comma separated. A clause ending in `asc` or `desc` (any case)
/// after a space takes that direction; anything else is a path sorted
/// ascending. Empty clauses are dropped. Parsing never fails, unknown paths
/// are reported when the sort is applied.
#[must_use]
pub fn parse_sort(input: &str) -> Vec<SortDescriptor> {
    input
        .split(',')
        .map(str::trim)
        .filter(|clause| !clause.is_empty())
        .map(parse_clause)
        .collect()
}

fn parse_clause(clause: &str) -> SortDescriptor {
    match clause.rsplit_once(' ') {
        Some((head, direction)) if direction.eq_ignore_ascii_case("asc") => {
            SortDescriptor::asc(head.trim_end())
        }
        Some((head, direction)) if direction.eq_ignore_ascii_case("desc") => {
            SortDescriptor::desc(head.trim_end())
        }
        _ => SortDescriptor::asc(clause),
    }
}

fn resolve_keys<E: Entity>(keys: &[SortDescriptor]) -> Result<Vec<(PropertyPath, bool)>, FilterError> {
    keys.iter()
        .map(|key| {
            let path = E::schema().resolve(&key.path)?;
            if path.scalar_kind().is_none() {
                return Err(FilterError::NonScalarMember(key.path.clone()));
            }
            Ok((path, key.ascending))
        })
        .collect()
}

/// Nulls first, then by value.
fn compare_nullable(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.total_cmp(b),
    }
}

/// Stable multi-key sort of in-memory records.
pub fn sort_records<E: Entity>(records: &mut [E], keys: &[SortDescriptor]) -> Result<(), FilterError> {
    if keys.is_empty() {
        return Ok(());
    }
    let keys = resolve_keys::<E>(keys)?;
    records.sort_by(|a, b| {
        for (path, ascending) in &keys {
            let ordering = compare_nullable(path.value_of(a).as_ref(), path.value_of(b).as_ref());
            let ordering = if *ascending { ordering } else { ordering.reverse() };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
    Ok(())
}

/// Chain `ORDER BY` clauses onto a select, first key first.
pub fn apply_sort<E>(
    mut select: Select<E>,
    keys: &[SortDescriptor],
    columns: &ColumnMap<E>,
) -> Result<Select<E>, FilterError>
where
    E: EntityTrait,
    E::Column: Copy,
{
    for key in keys {
        let expr = SimpleExpr::from(columns.expr(&key.path)?);
        select = select.order_by(expr, key.order());
    }
    Ok(select)
}
