use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, Select};

use crate::errors::QueryError;
use crate::filtering::compiler::FilterCompiler;
use crate::filtering::conditions::ColumnMap;
use crate::filtering::object::FilterObject;
use crate::models::{ListRequest, PaginatedResult};
use crate::query::paginate;
use crate::schema::Entity;

/// A response type listed from a Sea-ORM entity through filter objects.
///
/// Implementors name the entity, register its columns and convert models
/// into `Self`; [`FilterableResource::get_filtered`] does the rest. Columns
/// mapped onto joined tables need the join added in
/// [`FilterableResource::select`].
#[async_trait]
pub trait FilterableResource: Sized + Send + Sync
where
    Self::EntityType: EntityTrait + Sync,
    <Self::EntityType as EntityTrait>::Column: Copy,
    <Self::EntityType as EntityTrait>::Model: Entity + Sync,
    Self: From<<Self::EntityType as EntityTrait>::Model>,
{
    type EntityType: EntityTrait + Sync;

    const RESOURCE_NAME: &'static str;

    fn column_map() -> ColumnMap<Self::EntityType>;

    /// Base select that filters, sorting and paging are applied to.
    #[must_use]
    fn select() -> Select<Self::EntityType> {
        Self::EntityType::find()
    }

    async fn get_filtered<F>(
        db: &DatabaseConnection,
        compiler: &FilterCompiler,
        filter: &F,
        request: &ListRequest,
    ) -> Result<PaginatedResult<Self>, QueryError>
    where
        F: FilterObject + Sync,
    {
        let predicate = compiler.compile::<<Self::EntityType as EntityTrait>::Model, F>(filter)?;
        tracing::debug!(resource = Self::RESOURCE_NAME, %predicate, "listing resource");
        let page = paginate(
            db,
            Self::select(),
            &predicate,
            &request.sort(),
            &request.pagination(),
            &Self::column_map(),
        )
        .await?;
        Ok(page.map_items(Self::from))
    }
}
