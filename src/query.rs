//! Running compiled filters: filter, count, sort, page, fetch.
//!
//! The total count is always taken after filtering and before pagination.
//! [`InMemoryQuery`] runs the steps over a vector; [`paginate`] runs them as
//! SQL through Sea-ORM.

use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Select};

use crate::errors::{FilterError, QueryError};
use crate::filtering::compiler::FilterCompiler;
use crate::filtering::conditions::{ColumnMap, predicate_to_condition};
use crate::filtering::object::FilterObject;
use crate::filtering::pagination::{PaginationSpec, apply_pagination, paginate_select};
use crate::filtering::predicate::Predicate;
use crate::filtering::sort::{SortDescriptor, apply_sort, sort_records};
use crate::models::{ListRequest, PaginatedResult};
use crate::schema::Entity;

/// An in-memory source of entities.
#[derive(Debug, Clone)]
pub struct InMemoryQuery<E> {
    items: Vec<E>,
}

impl<E: Entity> InMemoryQuery<E> {
    pub fn new(items: impl IntoIterator<Item = E>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn filter(mut self, predicate: &Predicate<E>) -> Self {
        self.items.retain(|item| predicate.matches(item));
        self
    }

    #[must_use]
    pub fn count(&self) -> u64 {
        self.items.len() as u64
    }

    pub fn order_by(mut self, keys: &[SortDescriptor]) -> Result<Self, FilterError> {
        sort_records(&mut self.items, keys)?;
        Ok(self)
    }

    #[must_use]
    pub fn paginate(self, spec: &PaginationSpec) -> Self {
        Self {
            items: apply_pagination(spec, self.items),
        }
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<E> {
        self.items
    }

    pub fn run(
        self,
        predicate: &Predicate<E>,
        sort: &[SortDescriptor],
        pagination: &PaginationSpec,
    ) -> Result<PaginatedResult<E>, FilterError> {
        let filtered = self.filter(predicate);
        let total_count = filtered.count();
        let items = filtered.order_by(sort)?.paginate(pagination).into_vec();
        tracing::debug!(
            entity = E::schema().type_name(),
            total_count,
            returned = items.len(),
            "ran in-memory filtered query"
        );
        Ok(PaginatedResult::from_spec(items, total_count, pagination))
    }

    /// Compile `filter` and run it with the request's sort and pagination.
    pub fn list<F>(
        self,
        compiler: &FilterCompiler,
        filter: &F,
        request: &ListRequest,
    ) -> Result<PaginatedResult<E>, FilterError>
    where
        F: FilterObject + ?Sized,
    {
        let predicate = compiler.compile::<E, F>(filter)?;
        self.run(&predicate, &request.sort(), &request.pagination())
    }
}

/// Filter, sort and page a Sea-ORM select through a [`ColumnMap`].
pub trait SelectExt<E: EntityTrait>: Sized {
    fn apply_predicate<M>(
        self,
        predicate: &Predicate<M>,
        columns: &ColumnMap<E>,
    ) -> Result<Self, FilterError>;

    fn apply_sort_descriptors(
        self,
        keys: &[SortDescriptor],
        columns: &ColumnMap<E>,
    ) -> Result<Self, FilterError>;

    #[must_use]
    fn apply_pagination(self, spec: &PaginationSpec) -> Self;
}

impl<E> SelectExt<E> for Select<E>
where
    E: EntityTrait,
    E::Column: Copy,
{
    fn apply_predicate<M>(
        self,
        predicate: &Predicate<M>,
        columns: &ColumnMap<E>,
    ) -> Result<Self, FilterError> {
        Ok(self.filter(predicate_to_condition(predicate, columns)?))
    }

    fn apply_sort_descriptors(
        self,
        keys: &[SortDescriptor],
        columns: &ColumnMap<E>,
    ) -> Result<Self, FilterError> {
        apply_sort(self, keys, columns)
    }

    fn apply_pagination(self, spec: &PaginationSpec) -> Self {
        paginate_select(self, spec)
    }
}

/// Run a filtered, sorted, paginated select and count the unpaginated matches.
pub async fn paginate<E, C>(
    conn: &C,
    select: Select<E>,
    predicate: &Predicate<E::Model>,
    sort: &[SortDescriptor],
    pagination: &PaginationSpec,
    columns: &ColumnMap<E>,
) -> Result<PaginatedResult<E::Model>, QueryError>
where
    E: EntityTrait,
    E::Column: Copy,
    E::Model: Sync,
    C: ConnectionTrait + Send + Sync,
{
    let filtered = select.apply_predicate(predicate, columns)?;
    let total_count = filtered.clone().count(conn).await?;
    let items = filtered
        .apply_sort_descriptors(sort, columns)?
        .apply_pagination(pagination)
        .all(conn)
        .await?;
    tracing::debug!(
        total_count,
        returned = items.len(),
        "ran filtered query"
    );
    Ok(PaginatedResult::from_spec(items, total_count, pagination))
}
