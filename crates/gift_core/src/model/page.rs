//! Pagination descriptors for list use-cases.
//!
//! # Invariants
//! - Page indexes are zero-based.
//! - Page size is clamped to `1..=PAGE_SIZE_MAX`; `None` means
//!   `PAGE_SIZE_DEFAULT`.
//! - Every sort includes `id` as final tie-breaker so paging is stable.

use serde::{Deserialize, Serialize};

pub const PAGE_SIZE_DEFAULT: u32 = 10;
pub const PAGE_SIZE_MAX: u32 = 50;

/// Sort column for wish listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WishSortKey {
    #[default]
    Id,
    Quantity,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Caller-supplied page request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub size: Option<u32>,
    pub sort: WishSortKey,
    pub direction: SortDirection,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size: Some(size),
            ..Self::default()
        }
    }

    pub fn sorted_by(mut self, sort: WishSortKey, direction: SortDirection) -> Self {
        self.sort = sort;
        self.direction = direction;
        self
    }

    /// Effective page size after defaulting and clamping.
    pub fn applied_size(&self) -> u32 {
        normalize_page_size(self.size)
    }

    /// Row offset of the first element on this page.
    pub fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.applied_size())
    }
}

/// One page of results plus totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.total_elements.div_ceil(u64::from(self.size))
    }

    pub fn is_last(&self) -> bool {
        u64::from(self.page) + 1 >= self.total_pages()
    }
}

/// Applies default/clamp policy for page sizes.
pub fn normalize_page_size(size: Option<u32>) -> u32 {
    match size {
        Some(0) | None => PAGE_SIZE_DEFAULT,
        Some(value) => value.min(PAGE_SIZE_MAX),
    }
}
