//! Compile predicates into Sea-ORM conditions.
//!
//! The compiler works on property paths (`Name`, `Location.Address`); a
//! [`ColumnMap`] tells this module which column each path reads. Paths on
//! joined tables map to `table.column` and the caller adds the join.

use sea_orm::{
    Condition, EntityTrait,
    sea_query::{Alias, Expr, LikeExpr, SimpleExpr},
};
use std::collections::HashMap;

use crate::errors::FilterError;
use crate::filtering::predicate::{Clause, Predicate, RangeOp};

#[derive(Debug, Clone)]
enum ColumnTarget<C> {
    Column(C),
    Joined { table: String, column: String },
}

/// Property path to column registry for one Sea-ORM entity.
#[derive(Debug, Clone)]
pub struct ColumnMap<E: EntityTrait> {
    columns: HashMap<String, ColumnTarget<E::Column>>,
}

impl<E: EntityTrait> Default for ColumnMap<E> {
    fn default() -> Self {
        Self {
            columns: HashMap::new(),
        }
    }
}

impl<E> ColumnMap<E>
where
    E: EntityTrait,
    E::Column: Copy,
{
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a path to a column of `E`.
    #[must_use]
    pub fn column(mut self, path: impl Into<String>, column: E::Column) -> Self {
        self.columns.insert(path.into(), ColumnTarget::Column(column));
        self
    }

    /// Map a path to a column of a joined table (or its alias).
    #[must_use]
    pub fn joined(
        mut self,
        path: impl Into<String>,
        table: impl Into<String>,
        column: impl Into<String>,
    ) -> Self {
        self.columns.insert(
            path.into(),
            ColumnTarget::Joined {
                table: table.into(),
                column: column.into(),
            },
        );
        self
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.columns.contains_key(path)
    }

    /// Table-qualified column expression for a path.
    pub fn expr(&self, path: &str) -> Result<Expr, FilterError> {
        match self.columns.get(path) {
            Some(ColumnTarget::Column(column)) => Ok(Expr::col((E::default(), *column))),
            Some(ColumnTarget::Joined { table, column }) => Ok(Expr::col((
                Alias::new(table.as_str()),
                Alias::new(column.as_str()),
            ))),
            None => Err(FilterError::UnmappedPath(path.to_string())),
        }
    }
}

/// Escape LIKE wildcards so user input is matched literally.
fn like_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '%' | '_' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            c => out.push(c),
        }
    }
    out
}

fn like_contains(s: &str) -> LikeExpr {
    LikeExpr::new(format!("%{}%", like_escape(s))).escape('\\')
}

/// Build a `WHERE` condition. An always-true predicate yields an empty
/// condition, which Sea-ORM leaves out of the query.
pub fn predicate_to_condition<M, E>(
    predicate: &Predicate<M>,
    columns: &ColumnMap<E>,
) -> Result<Condition, FilterError>
where
    E: EntityTrait,
    E::Column: Copy,
{
    if predicate.is_always() {
        return Ok(Condition::all());
    }
    clause_to_condition(predicate.clause(), columns)
}

pub fn clause_to_condition<E>(clause: &Clause, columns: &ColumnMap<E>) -> Result<Condition, FilterError>
where
    E: EntityTrait,
    E::Column: Copy,
{
    let condition = match clause {
        // Empty conditions are dropped when nested, so truth must be explicit here.
        Clause::Always => Condition::all().add(Expr::cust("1=1")),
        Clause::Equals { path, value } => {
            let col = columns.expr(&path.to_string())?;
            Condition::all().add(col.eq(sea_orm::Value::from(value.clone())))
        }
        Clause::Contains { path, needle } => {
            let col = columns.expr(&path.to_string())?;
            Condition::all().add(col.like(like_contains(needle)))
        }
        Clause::Range { path, bounds } => {
            let key = path.to_string();
            let mut condition = Condition::all();
            for (bound, op) in bounds.iter() {
                let col = columns.expr(&key)?;
                let v = sea_orm::Value::from(bound.clone());
                let expr: SimpleExpr = match op {
                    RangeOp::Gte => col.gte(v),
                    RangeOp::Lte => col.lte(v),
                    RangeOp::Eq => col.eq(v),
                    RangeOp::Gt => col.gt(v),
                    RangeOp::Lt => col.lt(v),
                };
                condition = condition.add(expr);
            }
            condition
        }
        Clause::OneOf { path, values } => {
            if values.is_empty() {
                Condition::all().add(Expr::cust("1=0"))
            } else {
                let key = path.to_string();
                let mut any = Condition::any();
                for value in values {
                    any = any.add(columns.expr(&key)?.eq(sea_orm::Value::from(value.clone())));
                }
                any
            }
        }
        Clause::And(children) => {
            let mut all = Condition::all();
            for child in children {
                all = all.add(clause_to_condition(child, columns)?);
            }
            all
        }
        Clause::Or(children) => {
            let mut any = Condition::any();
            for child in children {
                any = any.add(clause_to_condition(child, columns)?);
            }
            any
        }
    };
    Ok(condition)
}
