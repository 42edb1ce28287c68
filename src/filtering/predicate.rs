use std::fmt;
use std::marker::PhantomData;

use crate::schema::{PropertyPath, Record};
use crate::value::Value;

/// Optional bounds of a range filter. Every present bound must hold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeBounds {
    pub gte: Option<Value>,
    pub lte: Option<Value>,
    pub eq: Option<Value>,
    pub gt: Option<Value>,
    pub lt: Option<Value>,
}

impl RangeBounds {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.gte.is_none()
            && self.lte.is_none()
            && self.eq.is_none()
            && self.gt.is_none()
            && self.lt.is_none()
    }

    /// Present bounds as `(bound, operator)` pairs, in a fixed order.
    pub fn iter(&self) -> impl Iterator<Item = (&Value, RangeOp)> {
        [
            (self.gte.as_ref(), RangeOp::Gte),
            (self.lte.as_ref(), RangeOp::Lte),
            (self.eq.as_ref(), RangeOp::Eq),
            (self.gt.as_ref(), RangeOp::Gt),
            (self.lt.as_ref(), RangeOp::Lt),
        ]
        .into_iter()
        .filter_map(|(bound, op)| bound.map(|b| (b, op)))
    }

    #[must_use]
    pub fn contains(&self, value: &Value) -> bool {
        self.iter().all(|(bound, op)| {
            value
                .compare(bound)
                .is_some_and(|ordering| op.accepts(ordering))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOp {
    Gte,
    Lte,
    Eq,
    Gt,
    Lt,
}

impl RangeOp {
    const fn accepts(self, ordering: std::cmp::Ordering) -> bool {
        match self {
            Self::Gte => ordering.is_ge(),
            Self::Lte => ordering.is_le(),
            Self::Eq => ordering.is_eq(),
            Self::Gt => ordering.is_gt(),
            Self::Lt => ordering.is_lt(),
        }
    }
}

/// Untyped predicate tree over resolved property paths.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    Always,
    Equals { path: PropertyPath, value: Value },
    Contains { path: PropertyPath, needle: String },
    Range { path: PropertyPath, bounds: RangeBounds },
    OneOf { path: PropertyPath, values: Vec<Value> },
    And(Vec<Clause>),
    Or(Vec<Clause>),
}

impl Clause {
    /// Conjunction. `Always` is the identity and nested `And`s are flattened.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::Always, other) | (other, Self::Always) => other,
            (Self::And(mut left), Self::And(right)) => {
                left.extend(right);
                Self::And(left)
            }
            (Self::And(mut left), other) => {
                left.push(other);
                Self::And(left)
            }
            (this, Self::And(mut right)) => {
                right.insert(0, this);
                Self::And(right)
            }
            (this, other) => Self::And(vec![this, other]),
        }
    }

    /// Disjunction. `Always` absorbs the other side and nested `Or`s are flattened.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        match (self, other) {
            (Self::Always, _) | (_, Self::Always) => Self::Always,
            (Self::Or(mut left), Self::Or(right)) => {
                left.extend(right);
                Self::Or(left)
            }
            (Self::Or(mut left), other) => {
                left.push(other);
                Self::Or(left)
            }
            (this, Self::Or(mut right)) => {
                right.insert(0, this);
                Self::Or(right)
            }
            (this, other) => Self::Or(vec![this, other]),
        }
    }

    #[must_use]
    pub const fn is_always(&self) -> bool {
        matches!(self, Self::Always)
    }

    /// Number of leaf comparisons in the tree.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Always => 0,
            Self::And(children) | Self::Or(children) => {
                children.iter().map(Self::leaf_count).sum()
            }
            _ => 1,
        }
    }

    /// Null members and missing nested records never satisfy a comparison.
    #[must_use]
    pub fn evaluate(&self, record: &dyn Record) -> bool {
        match self {
            Self::Always => true,
            Self::Equals { path, value } => path
                .value_of(record)
                .is_some_and(|actual| actual.loosely_eq(value)),
            Self::Contains { path, needle } => path
                .value_of(record)
                .is_some_and(|actual| actual.as_str().is_some_and(|s| s.contains(needle.as_str()))),
            Self::Range { path, bounds } => {
                bounds.is_empty()
                    || path
                        .value_of(record)
                        .is_some_and(|actual| bounds.contains(&actual))
            }
            Self::OneOf { path, values } => path
                .value_of(record)
                .is_some_and(|actual| values.iter().any(|v| actual.loosely_eq(v))),
            Self::And(children) => children.iter().all(|c| c.evaluate(record)),
            Self::Or(children) => children.iter().any(|c| c.evaluate(record)),
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(f: &mut fmt::Formatter<'_>, children: &[Clause], sep: &str) -> fmt::Result {
            f.write_str("(")?;
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    f.write_str(sep)?;
                }
                write!(f, "{child}")?;
            }
            f.write_str(")")
        }

        match self {
            Self::Always => f.write_str("true"),
            Self::Equals { path, value } => write!(f, "{path} == {value}"),
            Self::Contains { path, needle } => write!(f, "{path} contains {needle:?}"),
            Self::Range { path, bounds } => {
                let parts: Vec<String> = bounds
                    .iter()
                    .map(|(bound, op)| {
                        let symbol = match op {
                            RangeOp::Gte => ">=",
                            RangeOp::Lte => "<=",
                            RangeOp::Eq => "==",
                            RangeOp::Gt => ">",
                            RangeOp::Lt => "<",
                        };
                        format!("{path} {symbol} {bound}")
                    })
                    .collect();
                write!(f, "{}", parts.join(" && "))
            }
            Self::OneOf { path, values } => {
                let values: Vec<String> = values.iter().map(ToString::to_string).collect();
                write!(f, "{path} in [{}]", values.join(", "))
            }
            Self::And(children) => join(f, children, " && "),
            Self::Or(children) => join(f, children, " || "),
        }
    }
}

/// A [`Clause`] bound to the entity type it was compiled against.
pub struct Predicate<E> {
    clause: Clause,
    entity: PhantomData<fn(&E) -> bool>,
}

impl<E> Predicate<E> {
    #[must_use]
    pub const fn always() -> Self {
        Self::from_clause(Clause::Always)
    }

    #[must_use]
    pub const fn from_clause(clause: Clause) -> Self {
        Self {
            clause,
            entity: PhantomData,
        }
    }

    #[must_use]
    pub const fn clause(&self) -> &Clause {
        &self.clause
    }

    #[must_use]
    pub fn into_clause(self) -> Clause {
        self.clause
    }

    #[must_use]
    pub fn and(self, other: Self) -> Self {
        Self::from_clause(self.clause.and(other.clause))
    }

    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self::from_clause(self.clause.or(other.clause))
    }

    #[must_use]
    pub const fn is_always(&self) -> bool {
        self.clause.is_always()
    }
}

impl<E: Record> Predicate<E> {
    #[must_use]
    pub fn matches(&self, entity: &E) -> bool {
        self.clause.evaluate(entity)
    }
}

impl<E> Clone for Predicate<E> {
    fn clone(&self) -> Self {
        Self::from_clause(self.clause.clone())
    }
}

impl<E> fmt::Debug for Predicate<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Predicate").field(&self.clause).finish()
    }
}

impl<E> PartialEq for Predicate<E> {
    fn eq(&self, other: &Self) -> bool {
        self.clause == other.clause
    }
}

impl<E> Default for Predicate<E> {
    fn default() -> Self {
        Self::always()
    }
}

impl<E> fmt::Display for Predicate<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.clause)
    }
}
