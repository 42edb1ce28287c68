use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::filtering::pagination::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, PaginationSpec};
use crate::filtering::sort::{SortDescriptor, parse_sort};

/// Paging, sorting and the pagination switch shared by every list request.
///
/// # Pagination
/// `page` is 1-based. A missing or non-positive `page` becomes 1 and a missing
/// or non-positive `page_size` becomes 50. Set `disabled` to get every
/// matching row in one response.
///
/// # Sorting
/// `sorting_fields` is a comma-separated list of property paths, each
/// optionally followed by `asc` or `desc`:
/// ```text
/// Name desc, Location.Name
/// ```
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ListRequest {
    /// 1-based page number.
    #[param(example = 1)]
    pub page: Option<i64>,
    /// Number of items per page.
    #[param(example = 50)]
    pub page_size: Option<i64>,
    /// Sort clauses, for example `Name desc,DateCreated`.
    #[param(example = "Name desc,DateCreated")]
    pub sorting_fields: Option<String>,
    /// Return every matching item instead of one page.
    #[serde(default)]
    pub disabled: bool,
}

impl ListRequest {
    #[must_use]
    pub fn page(&self) -> u64 {
        positive_or(self.page, DEFAULT_PAGE)
    }

    #[must_use]
    pub fn page_size(&self) -> u64 {
        positive_or(self.page_size, DEFAULT_PAGE_SIZE)
    }

    /// Pagination with defaults already applied.
    #[must_use]
    pub fn pagination(&self) -> PaginationSpec {
        PaginationSpec {
            page: i64::try_from(self.page()).ok(),
            page_size: i64::try_from(self.page_size()).ok(),
            disabled: self.disabled,
        }
    }

    #[must_use]
    pub fn sort(&self) -> Vec<SortDescriptor> {
        self.sorting_fields.as_deref().map(parse_sort).unwrap_or_default()
    }
}

fn positive_or(value: Option<i64>, default: u64) -> u64 {
    value
        .and_then(|v| u64::try_from(v).ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

/// One page of results plus the number of items matching the filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    /// Matches before pagination.
    pub total_count: u64,
    pub page: u64,
    pub page_size: u64,
}

impl<T> PaginatedResult<T> {
    #[must_use]
    pub const fn new(items: Vec<T>, total_count: u64, page: u64, page_size: u64) -> Self {
        Self {
            items,
            total_count,
            page,
            page_size,
        }
    }

    /// Page and page size are taken from `spec`, defaulted when absent.
    #[must_use]
    pub fn from_spec(items: Vec<T>, total_count: u64, spec: &PaginationSpec) -> Self {
        Self::new(
            items,
            total_count,
            positive_or(spec.page, DEFAULT_PAGE),
            positive_or(spec.page_size, DEFAULT_PAGE_SIZE),
        )
    }

    /// Convert every item, e.g. entity models into response DTOs.
    #[must_use]
    pub fn map_items<U, F>(self, f: F) -> PaginatedResult<U>
    where
        F: FnMut(T) -> U,
    {
        PaginatedResult {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            page: self.page,
            page_size: self.page_size,
        }
    }

    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            0
        } else {
            self.total_count.div_ceil(self.page_size)
        }
    }
}
