/// Pagination support for list queries
///
/// Standard pagination model shared by the author and book listings
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Pagination parameters as received from query strings (`?page=2&size=20`)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_size")]
    pub size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            size: default_size(),
        }
    }
}

impl PaginationParams {
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }.normalized()
    }

    /// Clamp page to >= 1 and size to 1..=MAX_PAGE_SIZE
    pub fn normalized(self) -> Self {
        Self {
            page: self.page.max(1),
            size: self.size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Calculate offset for database queries
    pub fn offset(&self) -> i64 {
        let params = self.normalized();
        (params.page as i64 - 1) * params.size as i64
    }

    /// Get limit for database queries
    pub fn limit(&self) -> i64 {
        self.normalized().size as i64
    }
}

/// Paginated result wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub size: u32,
    pub pages: u32,
}

impl<T> PaginatedResult<T> {
    pub fn new(items: Vec<T>, total: u64, params: &PaginationParams) -> Self {
        let params = params.normalized();
        let pages = total.div_ceil(params.size as u64) as u32;

        Self {
            items,
            total,
            page: params.page,
            size: params.size,
            pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResult<U> {
        PaginatedResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            size: self.size,
            pages: self.pages,
        }
    }
}
