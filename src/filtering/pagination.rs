use sea_orm::{EntityTrait, QuerySelect, Select};

/// Page number used when a request leaves it out or sends a non-positive value.
pub const DEFAULT_PAGE: u64 = 1;
/// Page size used when a request leaves it out or sends a non-positive value.
pub const DEFAULT_PAGE_SIZE: u64 = 50;

/// Requested page window. Pages are 1-based.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationSpec {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub disabled: bool,
}

/// Rows to skip and rows to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: u64,
    pub limit: u64,
}

impl PaginationSpec {
    #[must_use]
    pub const fn new(page: i64, page_size: i64) -> Self {
        Self {
            page: Some(page),
            page_size: Some(page_size),
            disabled: false,
        }
    }

    /// Both page and page size present and positive.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!((self.page, self.page_size), (Some(page), Some(size)) if page > 0 && size > 0)
    }

    /// The window to apply, or `None` when pagination is disabled or invalid.
    #[must_use]
    pub fn window(&self) -> Option<Window> {
        if self.disabled || !self.is_valid() {
            return None;
        }
        let page = u64::try_from(self.page?).ok()?;
        let limit = u64::try_from(self.page_size?).ok()?;
        Some(Window {
            offset: page.saturating_sub(1).saturating_mul(limit),
            limit,
        })
    }
}

/// Skip and take over any sequence. Disabled or invalid specs return it whole.
pub fn apply_pagination<T, I>(spec: &PaginationSpec, items: I) -> Vec<T>
where
    I: IntoIterator<Item = T>,
{
    match spec.window() {
        Some(window) => items
            .into_iter()
            .skip(usize::try_from(window.offset).unwrap_or(usize::MAX))
            .take(usize::try_from(window.limit).unwrap_or(usize::MAX))
            .collect(),
        None => items.into_iter().collect(),
    }
}

/// `OFFSET`/`LIMIT` on a select. Disabled or invalid specs leave it unchanged.
#[must_use]
pub fn paginate_select<E: EntityTrait>(select: Select<E>, spec: &PaginationSpec) -> Select<E> {
    match spec.window() {
        Some(window) => select.offset(window.offset).limit(window.limit),
        None => select,
    }
}
