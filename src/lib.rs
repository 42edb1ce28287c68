pub mod errors;
pub mod filtering;
pub mod models;
pub mod query;
pub mod schema;
pub mod traits;
pub mod value;

pub use errors::{FilterError, QueryError};
pub use filtering::{
    FilterCompiler, FilterConventions, FilterFields, FilterObject, PaginationSpec, Predicate,
    SortDescriptor, apply_pagination, compile, parse_sort,
};
pub use models::{ListRequest, PaginatedResult};
pub use query::{InMemoryQuery, SelectExt, paginate};
pub use schema::{Entity, EntitySchema, Member, PropertyPath, Record};
pub use traits::FilterableResource;
pub use value::{Value, ValueKind};
