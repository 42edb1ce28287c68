//! Entity schemas and dotted property paths.
//!
//! An [`Entity`] describes its members once, through a static [`EntitySchema`],
//! and exposes them at runtime through [`Record`]. The compiler resolves filter
//! field names against the schema; predicates read values through the record.
//!
//! ```rust
//! use std::sync::LazyLock;
//! use crudfilter::{Entity, EntitySchema, Member, Record, ValueKind};
//!
//! struct Location {
//!     name: String,
//! }
//!
//! impl Record for Location {
//!     fn member(&self, name: &str) -> Member<'_> {
//!         match name {
//!             "Name" => Member::value(self.name.clone()),
//!             _ => Member::Null,
//!         }
//!     }
//! }
//!
//! impl Entity for Location {
//!     fn schema() -> &'static EntitySchema {
//!         static SCHEMA: LazyLock<EntitySchema> =
//!             LazyLock::new(|| EntitySchema::new("Location").field("Name", ValueKind::String));
//!         &SCHEMA
//!     }
//! }
//!
//! let path = Location::schema().resolve("Name").unwrap();
//! assert_eq!(path.to_string(), "Name");
//! ```

use std::fmt;

use crate::errors::FilterError;
use crate::value::{Value, ValueKind};

/// What a member holds: a scalar, or another entity.
///
/// Nested schemas are reached through a function so entity graphs may refer to
/// each other in both directions.
#[derive(Debug, Clone, Copy)]
pub enum MemberType {
    Scalar(ValueKind),
    Nested(fn() -> &'static EntitySchema),
}

#[derive(Debug, Clone)]
pub struct MemberDef {
    pub name: &'static str,
    pub ty: MemberType,
}

#[derive(Debug, Clone)]
pub struct EntitySchema {
    type_name: &'static str,
    members: Vec<MemberDef>,
}

impl EntitySchema {
    #[must_use]
    pub const fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            members: Vec::new(),
        }
    }

    #[must_use]
    pub fn field(mut self, name: &'static str, kind: ValueKind) -> Self {
        self.members.push(MemberDef {
            name,
            ty: MemberType::Scalar(kind),
        });
        self
    }

    #[must_use]
    pub fn nested<E: Entity>(mut self, name: &'static str) -> Self {
        self.members.push(MemberDef {
            name,
            ty: MemberType::Nested(E::schema),
        });
        self
    }

    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Member lookup is exact and case-sensitive.
    #[must_use]
    pub fn member(&self, name: &str) -> Option<&MemberDef> {
        self.members.iter().find(|m| m.name == name)
    }

    #[must_use]
    pub fn has_member(&self, name: &str) -> bool {
        self.member(name).is_some()
    }

    pub fn members(&self) -> impl Iterator<Item = &MemberDef> {
        self.members.iter()
    }

    /// Resolve a dot-separated path such as `Location.Name`.
    pub fn resolve(&self, path: &str) -> Result<PropertyPath, FilterError> {
        self.resolve_segments(path.split('.'))
    }

    /// Resolve already-split segments, walking into nested schemas.
    pub fn resolve_segments<'s, I>(&self, segments: I) -> Result<PropertyPath, FilterError>
    where
        I: IntoIterator<Item = &'s str>,
    {
        let mut resolved = Vec::new();
        let mut current = self;
        let mut target: Option<MemberType> = None;

        for segment in segments {
            if let Some(MemberType::Scalar(kind)) = target {
                return Err(FilterError::UnknownMember {
                    member: segment.to_string(),
                    type_name: kind.to_string(),
                });
            }
            if let Some(MemberType::Nested(schema)) = target {
                current = schema();
            }
            let member = current
                .member(segment)
                .ok_or_else(|| FilterError::UnknownMember {
                    member: segment.to_string(),
                    type_name: current.type_name.to_string(),
                })?;
            resolved.push(member.name);
            target = Some(member.ty);
        }

        match target {
            Some(ty) => Ok(PropertyPath {
                segments: resolved,
                ty,
            }),
            None => Err(FilterError::UnknownMember {
                member: String::new(),
                type_name: self.type_name.to_string(),
            }),
        }
    }
}

/// A resolved path: canonical member names plus the type of the last one.
#[derive(Debug, Clone)]
pub struct PropertyPath {
    segments: Vec<&'static str>,
    ty: MemberType,
}

impl PropertyPath {
    #[must_use]
    pub fn segments(&self) -> &[&'static str] {
        &self.segments
    }

    #[must_use]
    pub const fn member_type(&self) -> MemberType {
        self.ty
    }

    /// Kind of the terminal member, `None` when it is a nested entity.
    #[must_use]
    pub const fn scalar_kind(&self) -> Option<ValueKind> {
        match self.ty {
            MemberType::Scalar(kind) => Some(kind),
            MemberType::Nested(_) => None,
        }
    }

    /// Read the value at this path. Null members and absent nested records
    /// yield `None`.
    #[must_use]
    pub fn value_of(&self, record: &dyn Record) -> Option<Value> {
        let (last, parents) = self.segments.split_last()?;
        let mut current = record;
        for segment in parents {
            match current.member(segment) {
                Member::Nested(inner) => current = inner,
                Member::Value(_) | Member::Null => return None,
            }
        }
        match current.member(last) {
            Member::Value(value) => Some(value),
            Member::Null | Member::Nested(_) => None,
        }
    }
}

impl PartialEq for PropertyPath {
    fn eq(&self, other: &Self) -> bool {
        self.segments == other.segments
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

/// Runtime view of a member.
pub enum Member<'a> {
    Value(Value),
    Null,
    Nested(&'a dyn Record),
}

impl<'a> Member<'a> {
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    pub fn optional<T: Into<Value>>(value: Option<T>) -> Self {
        value.map_or(Self::Null, |v| Self::Value(v.into()))
    }

    pub fn nested<R: Record>(record: Option<&'a R>) -> Self {
        match record {
            Some(inner) => Self::Nested(inner),
            None => Self::Null,
        }
    }
}

/// Member access by name.
pub trait Record {
    fn member(&self, name: &str) -> Member<'_>;
}

/// A record type with a static schema.
pub trait Entity: Record {
    fn schema() -> &'static EntitySchema;
}
