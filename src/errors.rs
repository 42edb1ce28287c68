//! # Errors
//!
//! Everything the compiler rejects is a configuration error: a filter type that
//! names a member the entity does not have, a non-nullable filter field, a prefix
//! table that can never match, a value whose type cannot be compared with the
//! member it targets. These surface as [`FilterError`] and are never swallowed.
//!
//! [`QueryError`] wraps a [`FilterError`] or a database error for the async
//! Sea-ORM pipeline. Database errors are logged with `tracing` when they are
//! converted.

use sea_orm::DbErr;
use thiserror::Error;

use crate::filtering::prefix::Operator;
use crate::value::ValueKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// A path segment does not name a member of the type it is resolved against.
    #[error("'{member}' is not a member of type '{type_name}'")]
    UnknownMember { member: String, type_name: String },

    /// One or more filter fields were declared non-nullable.
    #[error("the following filter fields must be nullable: {}", .fields.join(", "))]
    NonNullableFilterField { fields: Vec<String> },

    /// A later prefix starts with an earlier one and would never be matched.
    #[error("prefix '{later}' is shadowed by '{earlier}', which is checked first")]
    MisorderedPrefix { earlier: String, later: String },

    #[error("prefix for operator {0} must not be empty")]
    EmptyPrefix(Operator),

    /// The check order must name every operator exactly once.
    #[error("prefix order must list every operator exactly once, got {0:?}")]
    InvalidPrefixOrder(Vec<Operator>),

    /// The filter value cannot be compared with the member it targets.
    #[error("cannot compare '{path}' of type {expected} with a {found} value")]
    TypeMismatch {
        path: String,
        expected: ValueKind,
        found: ValueKind,
    },

    /// The path resolves to a nested entity, not a value.
    #[error("'{0}' does not resolve to a scalar member")]
    NonScalarMember(String),

    /// The path resolved but has no column registered for it.
    #[error("no column is mapped for '{0}'")]
    UnmappedPath(String),
}

#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error("database error: {0}")]
    Database(DbErr),
}

impl From<DbErr> for QueryError {
    fn from(err: DbErr) -> Self {
        tracing::error!(error = %err, "database error while running filtered query");
        Self::Database(err)
    }
}
