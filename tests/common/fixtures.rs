//! Photography-studio domain used by the in-memory tests and benchmarks.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use crudfilter::{Entity, EntitySchema, FilterFields, FilterObject, Member, Record, ValueKind};
use rust_decimal::Decimal;
use std::sync::LazyLock;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq)]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Photographer {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Client {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub comments: Option<String>,
    pub date_created: DateTime<Utc>,
    pub birth_date: Option<DateTime<Utc>>,
    pub external_id: Uuid,
    pub vip: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub id: i64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub session_type: String,
    pub notes: Option<String>,
    pub price: Decimal,
    pub client: Option<Client>,
    pub photographer: Option<Photographer>,
    pub location: Option<Location>,
}

impl Record for Location {
    fn member(&self, name: &str) -> Member<'_> {
        match name {
            "Id" => Member::value(self.id),
            "Name" => Member::value(self.name.clone()),
            "Address" => Member::optional(self.address.clone()),
            _ => Member::Null,
        }
    }
}

impl Entity for Location {
    fn schema() -> &'static EntitySchema {
        static SCHEMA: LazyLock<EntitySchema> = LazyLock::new(|| {
            EntitySchema::new("Location")
                .field("Id", ValueKind::Int)
                .field("Name", ValueKind::String)
                .field("Address", ValueKind::String)
        });
        &SCHEMA
    }
}

impl Record for Photographer {
    fn member(&self, name: &str) -> Member<'_> {
        match name {
            "Id" => Member::value(self.id),
            "Name" => Member::value(self.name.clone()),
            "Email" => Member::value(self.email.clone()),
            _ => Member::Null,
        }
    }
}

impl Entity for Photographer {
    fn schema() -> &'static EntitySchema {
        static SCHEMA: LazyLock<EntitySchema> = LazyLock::new(|| {
            EntitySchema::new("Photographer")
                .field("Id", ValueKind::Int)
                .field("Name", ValueKind::String)
                .field("Email", ValueKind::String)
        });
        &SCHEMA
    }
}

impl Record for Client {
    fn member(&self, name: &str) -> Member<'_> {
        match name {
            "Id" => Member::value(self.id),
            "Name" => Member::value(self.name.clone()),
            "Email" => Member::value(self.email.clone()),
            "PhoneNumber" => Member::optional(self.phone_number.clone()),
            "Comments" => Member::optional(self.comments.clone()),
            "DateCreated" => Member::value(self.date_created),
            "BirthDate" => Member::optional(self.birth_date),
            "ExternalId" => Member::value(self.external_id),
            "Vip" => Member::value(self.vip),
            _ => Member::Null,
        }
    }
}

impl Entity for Client {
    fn schema() -> &'static EntitySchema {
        static SCHEMA: LazyLock<EntitySchema> = LazyLock::new(|| {
            EntitySchema::new("Client")
                .field("Id", ValueKind::Int)
                .field("Name", ValueKind::String)
                .field("Email", ValueKind::String)
                .field("PhoneNumber", ValueKind::String)
                .field("Comments", ValueKind::String)
                .field("DateCreated", ValueKind::DateTime)
                .field("BirthDate", ValueKind::DateTime)
                .field("ExternalId", ValueKind::Uuid)
                .field("Vip", ValueKind::Bool)
        });
        &SCHEMA
    }
}

impl Record for Session {
    fn member(&self, name: &str) -> Member<'_> {
        match name {
            "Id" => Member::value(self.id),
            "Date" => Member::value(self.date),
            "Time" => Member::value(self.time),
            "SessionType" => Member::value(self.session_type.clone()),
            "Notes" => Member::optional(self.notes.clone()),
            "Price" => Member::value(self.price),
            "Client" => Member::nested(self.client.as_ref()),
            "Photographer" => Member::nested(self.photographer.as_ref()),
            "Location" => Member::nested(self.location.as_ref()),
            _ => Member::Null,
        }
    }
}

impl Entity for Session {
    fn schema() -> &'static EntitySchema {
        static SCHEMA: LazyLock<EntitySchema> = LazyLock::new(|| {
            EntitySchema::new("Session")
                .field("Id", ValueKind::Int)
                .field("Date", ValueKind::Date)
                .field("Time", ValueKind::Time)
                .field("SessionType", ValueKind::String)
                .field("Notes", ValueKind::String)
                .field("Price", ValueKind::Decimal)
                .nested::<Client>("Client")
                .nested::<Photographer>("Photographer")
                .nested::<Location>("Location")
        });
        &SCHEMA
    }
}

#[derive(Clone, Debug, Default)]
pub struct ClientQueryFilter {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub list_id: Option<Vec<i32>>,
    pub less_than_or_equal_id: Option<i32>,
    pub greater_than_or_equal_id: Option<i32>,
    pub greater_than_id: Option<i32>,
    pub less_than_id: Option<i32>,
    pub contains_name: Option<String>,
    pub list_name: Option<Vec<String>>,
    pub greater_than_or_equal_birth_date: Option<DateTime<Utc>>,
    pub less_than_or_equal_birth_date: Option<DateTime<Utc>>,
    pub greater_than_birth_date: Option<DateTime<Utc>>,
    pub less_than_birth_date: Option<DateTime<Utc>>,
    pub greater_than_or_equal_date_created: Option<DateTime<Utc>>,
    pub less_than_or_equal_date_created: Option<DateTime<Utc>>,
    pub vip: Option<bool>,
    pub external_id: Option<Uuid>,
}

impl FilterObject for ClientQueryFilter {
    fn filter_fields(&self) -> FilterFields {
        FilterFields::new()
            .field("Id", &self.id)
            .field("Name", &self.name)
            .field("Email", &self.email)
            .field("PhoneNumber", &self.phone_number)
            .list("ListId", &self.list_id)
            .field("LessThanOrEqualId", &self.less_than_or_equal_id)
            .field("GreaterThanOrEqualId", &self.greater_than_or_equal_id)
            .field("GreaterThanId", &self.greater_than_id)
            .field("LessThanId", &self.less_than_id)
            .field("ContainsName", &self.contains_name)
            .list("ListName", &self.list_name)
            .field("GreaterThanOrEqualBirthDate", &self.greater_than_or_equal_birth_date)
            .field("LessThanOrEqualBirthDate", &self.less_than_or_equal_birth_date)
            .field("GreaterThanBirthDate", &self.greater_than_birth_date)
            .field("LessThanBirthDate", &self.less_than_birth_date)
            .field("GreaterThanOrEqualDateCreated", &self.greater_than_or_equal_date_created)
            .field("LessThanOrEqualDateCreated", &self.less_than_or_equal_date_created)
            .field("Vip", &self.vip)
            .field("ExternalId", &self.external_id)
    }
}

/// The same fields registered in reverse order.
pub struct ReversedClientFilter<'a>(pub &'a ClientQueryFilter);

impl FilterObject for ReversedClientFilter<'_> {
    fn filter_fields(&self) -> FilterFields {
        let fields: Vec<_> = self.0.filter_fields().into_iter().collect();
        fields.into_iter().rev().collect()
    }
}

#[derive(Clone, Debug, Default)]
pub struct LocationFilter {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub contains_address: Option<String>,
    pub list_id: Option<Vec<i64>>,
    /// Not a `Location` member.
    pub nickname: Option<String>,
}

impl FilterObject for LocationFilter {
    fn filter_fields(&self) -> FilterFields {
        FilterFields::new()
            .field("Id", &self.id)
            .field("Name", &self.name)
            .field("ContainsAddress", &self.contains_address)
            .list("ListId", &self.list_id)
            .field("Nickname", &self.nickname)
    }
}

#[derive(Clone, Debug, Default)]
pub struct PhotographerFilter {
    pub contains_name: Option<String>,
    pub email: Option<String>,
}

impl FilterObject for PhotographerFilter {
    fn filter_fields(&self) -> FilterFields {
        FilterFields::new()
            .field("ContainsName", &self.contains_name)
            .field("Email", &self.email)
    }
}

#[derive(Clone, Debug, Default)]
pub struct SessionFilter {
    pub session_type: Option<String>,
    pub greater_than_or_equal_date: Option<NaiveDate>,
    pub less_than_date: Option<NaiveDate>,
    pub less_than_price: Option<Decimal>,
    pub time: Option<NaiveTime>,
    pub location: Option<LocationFilter>,
    pub photographer: Option<PhotographerFilter>,
    pub client: Option<ClientQueryFilter>,
}

impl FilterObject for SessionFilter {
    fn filter_fields(&self) -> FilterFields {
        FilterFields::new()
            .field("SessionType", &self.session_type)
            .field("GreaterThanOrEqualDate", &self.greater_than_or_equal_date)
            .field("LessThanDate", &self.less_than_date)
            .field("LessThanPrice", &self.less_than_price)
            .field("Time", &self.time)
            .nested("Location", &self.location)
            .nested("Photographer", &self.photographer)
            .nested("Client", &self.client)
    }
}

pub fn utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

pub fn client(id: i32, name: &str) -> Client {
    Client {
        id,
        name: name.to_string(),
        email: format!("client{id}@example.com"),
        phone_number: (id % 3 != 0).then(|| format!("555-{id:04}")),
        comments: None,
        date_created: utc(2024, 1, 1) + Duration::days(i64::from(id)),
        birth_date: (id % 5 != 0).then(|| utc(1990, 1, 1) + Duration::days(i64::from(id) * 30)),
        external_id: Uuid::from_u128(u128::try_from(id).unwrap()),
        vip: id % 2 == 0,
    }
}

/// Clients `1..=count` named `Client 01`, `Client 02`, ...
pub fn clients(count: i32) -> Vec<Client> {
    (1..=count).map(|id| client(id, &format!("Client {id:02}"))).collect()
}

pub fn locations() -> Vec<Location> {
    vec![
        Location {
            id: 1,
            name: "Studio North".to_string(),
            address: Some("12 North Street".to_string()),
        },
        Location {
            id: 2,
            name: "Beach".to_string(),
            address: Some("Ocean Drive".to_string()),
        },
        Location {
            id: 3,
            name: "City Park".to_string(),
            address: None,
        },
    ]
}

pub fn photographers() -> Vec<Photographer> {
    vec![
        Photographer {
            id: 1,
            name: "Ana Lima".to_string(),
            email: "ana@studio.test".to_string(),
        },
        Photographer {
            id: 2,
            name: "Bruno Costa".to_string(),
            email: "bruno@studio.test".to_string(),
        },
    ]
}

/// Five sessions; session 4 has no client, photographer or location.
pub fn sessions() -> Vec<Session> {
    let locations = locations();
    let photographers = photographers();
    let clients = clients(4);
    let session = |id: i64,
                   on: NaiveDate,
                   at: NaiveTime,
                   kind: &str,
                   price: Decimal,
                   parties: Option<(usize, usize, usize)>| Session {
        id,
        date: on,
        time: at,
        session_type: kind.to_string(),
        notes: None,
        price,
        client: parties.map(|(c, _, _)| clients[c].clone()),
        photographer: parties.map(|(_, p, _)| photographers[p].clone()),
        location: parties.map(|(_, _, l)| locations[l].clone()),
    };
    vec![
        session(1, date(2024, 3, 1), time(10, 0), "Portrait", Decimal::new(12000, 2), Some((0, 0, 0))),
        session(2, date(2024, 3, 5), time(14, 30), "Wedding", Decimal::new(150_000, 2), Some((1, 1, 1))),
        session(3, date(2024, 4, 10), time(9, 0), "Portrait", Decimal::new(9550, 2), Some((2, 0, 2))),
        session(4, date(2024, 4, 12), time(16, 0), "Family", Decimal::new(30000, 2), None),
        session(5, date(2024, 5, 20), time(11, 0), "Portrait", Decimal::new(13000, 2), Some((3, 1, 0))),
    ]
}
