use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Number of items per page. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize(usize);

impl PageSize {
    pub fn new(raw: i64) -> Result<Self, InvalidPageSizeError> {
        usize::try_from(raw)
            .ok()
            .filter(|size| *size > 0)
            .map(Self)
            .ok_or_else(|| InvalidPageSizeError(raw.to_string()))
    }

    pub const fn get(self) -> usize {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(DEFAULT_PAGE_SIZE)
    }
}

impl FromStr for PageSize {
    type Err = InvalidPageSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .trim()
            .parse::<i64>()
            .map_err(|_| InvalidPageSizeError(s.to_string()))?;
        Self::new(raw)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Page size must be a positive integer, got \"{0}\"")]
pub struct InvalidPageSizeError(pub String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub page_count: usize,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub const fn has_next(&self) -> bool {
        self.page < self.page_count
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_count: self.total_count,
            page_count: self.page_count,
        }
    }
}

/// Cuts the 1-indexed `page` out of `items`.
///
/// Pages below 1 are treated as page 1. A page past the end yields no items,
/// and `page_count` is at least 1 even for an empty input.
pub fn paginate<T: Clone>(items: &[T], page: i64, page_size: PageSize) -> Page<T> {
    let page = usize::try_from(page.max(1)).unwrap_or(usize::MAX);
    let size = page_size.get();
    let total_count = items.len();
    let page_count = total_count.div_ceil(size).max(1);

    let start = (page - 1).saturating_mul(size);
    let window = items
        .get(start..)
        .map(|rest| &rest[..rest.len().min(size)])
        .unwrap_or_default();

    Page {
        items: window.to_vec(),
        page,
        page_size: size,
        total_count,
        page_count,
    }
}
