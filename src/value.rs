use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use std::cmp::Ordering;
use std::fmt;
use uuid::Uuid;

/// A scalar carried by a filter field or an entity member.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i64),
    Float(f64),
    Decimal(Decimal),
    Bool(bool),
    Uuid(Uuid),
    DateTime(DateTime<Utc>),
    Date(NaiveDate),
    Time(NaiveTime),
}

/// Type tag of a [`Value`], also used to describe entity members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    String,
    Int,
    Float,
    Decimal,
    Bool,
    Uuid,
    DateTime,
    Date,
    Time,
}

impl ValueKind {
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Int | Self::Float | Self::Decimal)
    }

    /// Kinds that take range bounds (`>=`, `<`, ...) when filtered.
    #[must_use]
    pub const fn is_rangeable(self) -> bool {
        self.is_numeric() || matches!(self, Self::DateTime | Self::Date)
    }

    /// Numeric kinds compare with each other, everything else only with itself.
    #[must_use]
    pub fn comparable_with(self, other: Self) -> bool {
        self == other || (self.is_numeric() && other.is_numeric())
    }

    const fn rank(self) -> u8 {
        match self {
            Self::Bool => 0,
            Self::Int | Self::Float | Self::Decimal => 1,
            Self::String => 2,
            Self::Uuid => 3,
            Self::Date => 4,
            Self::DateTime => 5,
            Self::Time => 6,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Int => "integer",
            Self::Float => "float",
            Self::Decimal => "decimal",
            Self::Bool => "bool",
            Self::Uuid => "uuid",
            Self::DateTime => "datetime",
            Self::Date => "date",
            Self::Time => "time",
        };
        f.write_str(name)
    }
}

impl Value {
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::String(_) => ValueKind::String,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::Decimal(_) => ValueKind::Decimal,
            Self::Bool(_) => ValueKind::Bool,
            Self::Uuid(_) => ValueKind::Uuid,
            Self::DateTime(_) => ValueKind::DateTime,
            Self::Date(_) => ValueKind::Date,
            Self::Time(_) => ValueKind::Time,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Compare two values of comparable kinds. `None` when the kinds differ
    /// (numerics excepted) or a float is NaN.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::String(a), Self::String(b)) => Some(a.cmp(b)),
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Float(a), Self::Float(b)) => a.partial_cmp(b),
            (Self::Decimal(a), Self::Decimal(b)) => Some(a.cmp(b)),
            (Self::Int(a), Self::Float(b)) => (*a as f64).partial_cmp(b),
            (Self::Float(a), Self::Int(b)) => a.partial_cmp(&(*b as f64)),
            (Self::Int(a), Self::Decimal(b)) => Some(Decimal::from(*a).cmp(b)),
            (Self::Decimal(a), Self::Int(b)) => Some(a.cmp(&Decimal::from(*b))),
            (Self::Decimal(a), Self::Float(b)) => compare_decimal_float(*a, *b),
            (Self::Float(a), Self::Decimal(b)) => {
                compare_decimal_float(*b, *a).map(Ordering::reverse)
            }
            (Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            (Self::Uuid(a), Self::Uuid(b)) => Some(a.cmp(b)),
            (Self::DateTime(a), Self::DateTime(b)) => Some(a.cmp(b)),
            (Self::Date(a), Self::Date(b)) => Some(a.cmp(b)),
            (Self::Time(a), Self::Time(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Equality under [`Value::compare`], so `Int(5)` equals `Float(5.0)`.
    #[must_use]
    pub fn loosely_eq(&self, other: &Self) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }

    /// A total order used for sorting: kinds are grouped, then compared.
    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match self.compare(other) {
            Some(ordering) => ordering,
            None => match (self, other) {
                (Self::Float(a), Self::Float(b)) => a.total_cmp(b),
                _ => self.kind().rank().cmp(&other.kind().rank()),
            },
        }
    }
}

fn compare_decimal_float(d: Decimal, f: f64) -> Option<Ordering> {
    match Decimal::from_f64(f) {
        Some(converted) => Some(d.cmp(&converted)),
        None => d.to_f64().and_then(|lhs| lhs.partial_cmp(&f)),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(v) => write!(f, "{v:?}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Decimal(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Uuid(v) => write!(f, "{v}"),
            Self::DateTime(v) => write!(f, "{}", v.to_rfc3339()),
            Self::Date(v) => write!(f, "{v}"),
            Self::Time(v) => write!(f, "{v}"),
        }
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Self::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Self::Decimal(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Self::Uuid(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Self::DateTime(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Self::Date(v)
    }
}

impl From<NaiveTime> for Value {
    fn from(v: NaiveTime) -> Self {
        Self::Time(v)
    }
}

impl From<Value> for sea_orm::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::String(v) => v.into(),
            Value::Int(v) => v.into(),
            Value::Float(v) => v.into(),
            Value::Decimal(v) => v.into(),
            Value::Bool(v) => v.into(),
            Value::Uuid(v) => v.into(),
            Value::DateTime(v) => v.into(),
            Value::Date(v) => v.into(),
            Value::Time(v) => v.into(),
        }
    }
}
