//! # Filter Compilation
//!
//! Turns filter objects into predicates. A filter object is a struct of
//! optional fields whose names follow a prefix convention; every populated
//! field becomes one clause and the clauses are ANDed.
//!
//! ## Naming Convention
//!
//! | Field name | Clause |
//! |---|---|
//! | `Name` | `Name == value` |
//! | `ContainsName` | `Name` contains `value` |
//! | `GreaterThanOrEqualId` | `Id >= value` |
//! | `GreaterThanId` | `Id > value` |
//! | `LessThanOrEqualBirthDate` | `BirthDate <= value` |
//! | `LessThanBirthDate` | `BirthDate < value` |
//! | `ListId` (a collection) | `Id` is one of `value` |
//! | `Location` (a nested filter) | each field applied to `Location.<field>` |
//!
//! Range prefixes apply to numbers, decimals, dates and date-times. Strings
//! use equality or `Contains`. Booleans, UUIDs and times of day are not
//! filtered. An empty `List` collection matches everything.
//!
//! ## Main Components
//!
//! - [`FilterCompiler`]: compiles a [`FilterObject`] into a [`Predicate`]
//! - [`FilterConventions`] / [`PrefixTable`]: the prefix strings and their check order
//! - [`parse_sort`]: `"Name desc, Email"` into [`SortDescriptor`]s
//! - [`PaginationSpec`]: page windowing
//! - [`predicate_to_condition`]: predicates as Sea-ORM conditions
//!
//! ```rust,ignore
//! let predicate = compile::<client::Model, _>(&filter)?;
//! let page = paginate(&db, client::Entity::find(), &predicate, &sort, &spec, &columns).await?;
//! ```

pub mod builders;
pub mod compiler;
pub mod conditions;
pub mod object;
pub mod pagination;
pub mod predicate;
pub mod prefix;
pub mod sort;

// Re-export commonly used items
pub use compiler::{FilterCompiler, compile};
pub use conditions::{ColumnMap, clause_to_condition, predicate_to_condition};
pub use object::{FilterField, FilterFields, FilterObject, FilterValue};
pub use pagination::{
    DEFAULT_PAGE, DEFAULT_PAGE_SIZE, PaginationSpec, Window, apply_pagination, paginate_select,
};
pub use predicate::{Clause, Predicate, RangeBounds, RangeOp};
pub use prefix::{FilterConventions, Operator, PrefixTable};
pub use sort::{SortDescriptor, apply_sort, parse_sort, sort_records};
