use chrono::{DateTime, Utc};
use crudfilter::{
    Entity as FilterEntity, EntitySchema, FilterFields, FilterObject, FilterableResource, Member,
    Record, ValueKind, filtering::ColumnMap,
};
use sea_orm::Select;
use sea_orm::entity::prelude::*;
use serde::Serialize;
use std::sync::LazyLock;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "clients")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub date_created: DateTime<Utc>,
    pub location_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::location_entity::Entity",
        from = "Column::LocationId",
        to = "super::location_entity::Column::Id"
    )]
    Location,
}

impl Related<super::location_entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Location.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Record for Model {
    fn member(&self, name: &str) -> Member<'_> {
        match name {
            "Id" => Member::value(self.id),
            "Name" => Member::value(self.name.clone()),
            "Email" => Member::value(self.email.clone()),
            "PhoneNumber" => Member::optional(self.phone_number.clone()),
            "DateCreated" => Member::value(self.date_created),
            "LocationId" => Member::optional(self.location_id),
            _ => Member::Null,
        }
    }
}

impl FilterEntity for Model {
    fn schema() -> &'static EntitySchema {
        static SCHEMA: LazyLock<EntitySchema> = LazyLock::new(|| {
            EntitySchema::new("Client")
                .field("Id", ValueKind::Int)
                .field("Name", ValueKind::String)
                .field("Email", ValueKind::String)
                .field("PhoneNumber", ValueKind::String)
                .field("DateCreated", ValueKind::DateTime)
                .field("LocationId", ValueKind::Int)
                .nested::<super::location_entity::Model>("Location")
        });
        &SCHEMA
    }
}

pub fn column_map() -> ColumnMap<Entity> {
    ColumnMap::new()
        .column("Id", Column::Id)
        .column("Name", Column::Name)
        .column("Email", Column::Email)
        .column("PhoneNumber", Column::PhoneNumber)
        .column("DateCreated", Column::DateCreated)
        .joined("Location.Name", "locations", "name")
        .joined("Location.Address", "locations", "address")
}

/// Response shape returned by list endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ClientSummary {
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl From<Model> for ClientSummary {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
        }
    }
}

impl FilterableResource for ClientSummary {
    type EntityType = Entity;

    const RESOURCE_NAME: &'static str = "clients";

    fn column_map() -> ColumnMap<Self::EntityType> {
        column_map()
    }

    fn select() -> Select<Self::EntityType> {
        Entity::find().left_join(super::location_entity::Entity)
    }
}

#[derive(Clone, Debug, Default)]
pub struct LocationDbFilter {
    pub name: Option<String>,
    pub contains_address: Option<String>,
}

impl FilterObject for LocationDbFilter {
    fn filter_fields(&self) -> FilterFields {
        FilterFields::new()
            .field("Name", &self.name)
            .field("ContainsAddress", &self.contains_address)
    }
}

#[derive(Clone, Debug, Default)]
pub struct ClientDbFilter {
    pub email: Option<String>,
    pub contains_name: Option<String>,
    pub greater_than_or_equal_id: Option<i32>,
    pub less_than_id: Option<i32>,
    pub list_id: Option<Vec<i32>>,
    pub greater_than_or_equal_date_created: Option<DateTime<Utc>>,
    pub location: Option<LocationDbFilter>,
}

impl FilterObject for ClientDbFilter {
    fn filter_fields(&self) -> FilterFields {
        FilterFields::new()
            .field("Email", &self.email)
            .field("ContainsName", &self.contains_name)
            .field("GreaterThanOrEqualId", &self.greater_than_or_equal_id)
            .field("LessThanId", &self.less_than_id)
            .list("ListId", &self.list_id)
            .field("GreaterThanOrEqualDateCreated", &self.greater_than_or_equal_date_created)
            .nested("Location", &self.location)
    }
}
