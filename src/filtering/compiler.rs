use std::sync::LazyLock;

use crate::errors::FilterError;
use crate::filtering::builders;
use crate::filtering::object::{FilterField, FilterObject, FilterValue};
use crate::filtering::predicate::{Clause, Predicate};
use crate::filtering::prefix::{FilterConventions, PrefixTable};
use crate::schema::{Entity, EntitySchema, MemberType, PropertyPath};
use crate::value::Value;

static DEFAULT_COMPILER: LazyLock<FilterCompiler> = LazyLock::new(FilterCompiler::default);

/// Compile a filter with the default prefix conventions.
pub fn compile<E, F>(filter: &F) -> Result<Predicate<E>, FilterError>
where
    E: Entity,
    F: FilterObject + ?Sized,
{
    DEFAULT_COMPILER.compile(filter)
}

/// Turns filter objects into predicates over an entity.
///
/// Every populated field contributes one clause and the clauses are ANDed
/// in declaration order. Unpopulated fields contribute nothing, so an empty
/// filter matches every entity.
#[derive(Debug, Clone, Default)]
pub struct FilterCompiler {
    prefixes: PrefixTable,
}

impl FilterCompiler {
    pub fn new(conventions: &FilterConventions) -> Result<Self, FilterError> {
        Ok(Self {
            prefixes: PrefixTable::new(conventions)?,
        })
    }

    #[must_use]
    pub const fn with_prefixes(prefixes: PrefixTable) -> Self {
        Self { prefixes }
    }

    #[must_use]
    pub const fn prefixes(&self) -> &PrefixTable {
        &self.prefixes
    }

    pub fn compile<E, F>(&self, filter: &F) -> Result<Predicate<E>, FilterError>
    where
        E: Entity,
        F: FilterObject + ?Sized,
    {
        let fields = filter.filter_fields();
        let schema = E::schema();

        let mut non_nullable = Vec::new();
        collect_non_nullable(&fields, None, &mut non_nullable);
        if !non_nullable.is_empty() {
            return Err(FilterError::NonNullableFilterField {
                fields: non_nullable,
            });
        }

        let mut clause = Clause::Always;
        for field in fields {
            let Some(value) = field.value else {
                continue;
            };
            let next = match value {
                FilterValue::Nested(inner) => self.nested_clause(schema, field.name, inner)?,
                value => self.field_clause(schema, field.name, value)?,
            };
            clause = clause.and(next);
        }

        tracing::debug!(
            entity = schema.type_name(),
            clauses = clause.leaf_count(),
            "compiled filter"
        );
        Ok(Predicate::from_clause(clause))
    }

    /// A field whose (possibly dotted) name is resolved segment by segment,
    /// each with its prefix stripped.
    fn field_clause(
        &self,
        schema: &EntitySchema,
        name: &str,
        value: FilterValue,
    ) -> Result<Clause, FilterError> {
        let path = schema.resolve_segments(name.split('.').map(|s| self.prefixes.strip(s).1))?;
        let last = name.rsplit('.').next().unwrap_or(name);
        self.dispatch(path, last, value)
    }

    fn nested_clause(
        &self,
        schema: &EntitySchema,
        outer: &'static str,
        inner: Vec<FilterField>,
    ) -> Result<Clause, FilterError> {
        let Some(MemberType::Nested(nested)) = schema.member(outer).map(|m| m.ty) else {
            // Not a nested entity: resolve the dotted path so unknown names fail.
            let mut clause = Clause::Always;
            for field in inner {
                if let Some(value) = field.value {
                    let name = format!("{outer}.{}", field.name);
                    clause = clause.and(self.field_clause(schema, &name, value)?);
                }
            }
            return Ok(clause);
        };

        let nested = nested();
        let mut clause = Clause::Always;
        for field in inner {
            let Some(value) = field.value else {
                continue;
            };
            let (_, member) = self.prefixes.strip(field.name);
            if !nested.has_member(member) {
                tracing::trace!(
                    entity = nested.type_name(),
                    field = field.name,
                    "nested filter field has no matching member, skipped"
                );
                continue;
            }
            let path = schema.resolve_segments([outer, member])?;
            clause = clause.and(self.dispatch(path, field.name, value)?);
        }
        Ok(clause)
    }

    /// Pick the builder for a value. `raw_name` still carries its prefix.
    fn dispatch(
        &self,
        path: PropertyPath,
        raw_name: &str,
        value: FilterValue,
    ) -> Result<Clause, FilterError> {
        if path.scalar_kind().is_none() {
            return Err(FilterError::NonScalarMember(path.to_string()));
        }
        let (operator, _) = self.prefixes.strip(raw_name);

        match value {
            FilterValue::List(values) if self.prefixes.is_list_marked(raw_name) => {
                builders::membership(path, values)
            }
            FilterValue::List(_) => {
                tracing::trace!(%path, field = raw_name, "collection without list marker, skipped");
                Ok(builders::always())
            }
            FilterValue::Scalar(Value::String(s)) => builders::string_match(path, operator, s),
            FilterValue::Scalar(value) if value.kind().is_rangeable() => {
                builders::range(path, builders::bounds_for(operator, value))
            }
            FilterValue::Scalar(value) => {
                tracing::trace!(%path, kind = %value.kind(), "unsupported filter value type, skipped");
                Ok(builders::always())
            }
            FilterValue::Nested(_) => {
                tracing::trace!(%path, "nested filter inside nested filter, skipped");
                Ok(builders::always())
            }
        }
    }
}

fn collect_non_nullable<'a, I>(fields: I, parent: Option<&str>, out: &mut Vec<String>)
where
    I: IntoIterator<Item = &'a FilterField>,
{
    for field in fields {
        let name = parent.map_or_else(
            || field.name.to_string(),
            |parent| format!("{parent}.{}", field.name),
        );
        if !field.nullable {
            out.push(name.clone());
        }
        if let Some(FilterValue::Nested(inner)) = &field.value {
            collect_non_nullable(inner, Some(&name), out);
        }
    }
}
