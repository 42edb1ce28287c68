//! Field registration for filter objects.
//!
//! A filter object lists its fields, in declaration order, through
//! [`FilterFields`]:
//!
//! ```rust
//! use crudfilter::{FilterFields, FilterObject};
//!
//! #[derive(Default)]
//! struct ClientFilter {
//!     contains_name: Option<String>,
//!     greater_than_or_equal_id: Option<i32>,
//!     list_id: Option<Vec<i32>>,
//! }
//!
//! impl FilterObject for ClientFilter {
//!     fn filter_fields(&self) -> FilterFields {
//!         FilterFields::new()
//!             .field("ContainsName", &self.contains_name)
//!             .field("GreaterThanOrEqualId", &self.greater_than_or_equal_id)
//!             .list("ListId", &self.list_id)
//!     }
//! }
//!
//! assert_eq!(ClientFilter::default().filter_fields().len(), 3);
//! ```

use crate::value::Value;

/// A populated field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Scalar(Value),
    List(Vec<Value>),
    /// Fields of a nested filter sub-object.
    Nested(Vec<FilterField>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterField {
    pub name: &'static str,
    pub nullable: bool,
    pub value: Option<FilterValue>,
}

/// A bag of optional filter fields.
pub trait FilterObject {
    fn filter_fields(&self) -> FilterFields;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterFields {
    fields: Vec<FilterField>,
}

impl FilterFields {
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    fn push(mut self, name: &'static str, nullable: bool, value: Option<FilterValue>) -> Self {
        self.fields.push(FilterField {
            name,
            nullable,
            value,
        });
        self
    }

    /// Optional scalar field.
    #[must_use]
    pub fn field<T>(self, name: &'static str, value: &Option<T>) -> Self
    where
        T: Clone + Into<Value>,
    {
        let value = value.clone().map(|v| FilterValue::Scalar(v.into()));
        self.push(name, true, value)
    }

    /// Optional collection field. Only names carrying the list marker are
    /// compiled into a membership test.
    #[must_use]
    pub fn list<T>(self, name: &'static str, value: &Option<Vec<T>>) -> Self
    where
        T: Clone + Into<Value>,
    {
        let value = value
            .as_ref()
            .map(|items| FilterValue::List(items.iter().cloned().map(Into::into).collect()));
        self.push(name, true, value)
    }

    /// Optional nested filter targeting a nested entity member.
    #[must_use]
    pub fn nested<F: FilterObject>(self, name: &'static str, value: &Option<F>) -> Self {
        let value = value
            .as_ref()
            .map(|inner| FilterValue::Nested(inner.filter_fields().fields));
        self.push(name, true, value)
    }

    /// A field that is always populated. Filters declaring one are rejected
    /// at compile time, since an unset value would still filter.
    #[must_use]
    pub fn required<T>(self, name: &'static str, value: &T) -> Self
    where
        T: Clone + Into<Value>,
    {
        let value = Some(FilterValue::Scalar(value.clone().into()));
        self.push(name, false, value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FilterField> {
        self.fields.iter()
    }
}

impl IntoIterator for FilterFields {
    type Item = FilterField;
    type IntoIter = std::vec::IntoIter<FilterField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> IntoIterator for &'a FilterFields {
    type Item = &'a FilterField;
    type IntoIter = std::slice::Iter<'a, FilterField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl FromIterator<FilterField> for FilterFields {
    fn from_iter<I: IntoIterator<Item = FilterField>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
