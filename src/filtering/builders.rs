//! One builder per operator family. Each checks the filter value against the
//! member it targets before building its clause.

use crate::errors::FilterError;
use crate::filtering::predicate::{Clause, RangeBounds};
use crate::filtering::prefix::Operator;
use crate::schema::PropertyPath;
use crate::value::{Value, ValueKind};

fn check_kind(path: &PropertyPath, found: ValueKind) -> Result<(), FilterError> {
    let Some(expected) = path.scalar_kind() else {
        return Err(FilterError::NonScalarMember(path.to_string()));
    };
    if expected.comparable_with(found) {
        Ok(())
    } else {
        Err(FilterError::TypeMismatch {
            path: path.to_string(),
            expected,
            found,
        })
    }
}

/// Exact equality.
pub fn equality(path: PropertyPath, value: Value) -> Result<Clause, FilterError> {
    check_kind(&path, value.kind())?;
    Ok(Clause::Equals { path, value })
}

/// Substring match on a string member.
pub fn contains(path: PropertyPath, needle: String) -> Result<Clause, FilterError> {
    check_kind(&path, ValueKind::String)?;
    Ok(Clause::Contains { path, needle })
}

/// Strings: `Contains` prefix gives a substring match, anything else equality.
pub fn string_match(
    path: PropertyPath,
    operator: Option<Operator>,
    value: String,
) -> Result<Clause, FilterError> {
    if operator == Some(Operator::Contains) {
        contains(path, value)
    } else {
        equality(path, Value::String(value))
    }
}

/// The single bound selected by a range prefix. No prefix means equality.
#[must_use]
pub fn bounds_for(operator: Option<Operator>, value: Value) -> RangeBounds {
    let mut bounds = RangeBounds::default();
    match operator {
        Some(Operator::GreaterThanOrEqual) => bounds.gte = Some(value),
        Some(Operator::GreaterThan) => bounds.gt = Some(value),
        Some(Operator::LessThanOrEqual) => bounds.lte = Some(value),
        Some(Operator::LessThan) => bounds.lt = Some(value),
        Some(Operator::Contains | Operator::List) | None => bounds.eq = Some(value),
    }
    bounds
}

/// Conjunction of one comparison per present bound. No bounds matches everything.
pub fn range(path: PropertyPath, bounds: RangeBounds) -> Result<Clause, FilterError> {
    if bounds.is_empty() {
        return Ok(always());
    }
    for (bound, _) in bounds.iter() {
        check_kind(&path, bound.kind())?;
    }
    Ok(Clause::Range { path, bounds })
}

/// OR-chain of equalities. An empty list imposes no constraint.
pub fn membership(path: PropertyPath, values: Vec<Value>) -> Result<Clause, FilterError> {
    if values.is_empty() {
        return Ok(always());
    }
    for value in &values {
        check_kind(&path, value.kind())?;
    }
    Ok(Clause::OneOf { path, values })
}

#[must_use]
pub const fn always() -> Clause {
    Clause::Always
}
