use serde::Deserialize;
use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Paged query body: `{pageNum, pageSize, params}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest<T> {
    pub page_num: u32,
    pub page_size: u32,
    pub params: T,
}

impl<T> PageRequest<T> {
    /// `page_num` is 1-based; zero is clamped to the first page.
    pub fn new(page_num: u32, page_size: u32, params: T) -> Self {
        Self {
            page_num: page_num.max(1),
            page_size: page_size.max(1),
            params,
        }
    }

    pub fn first(params: T) -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE, params)
    }

    /// Same filters, following page.
    pub fn next_page(mut self) -> Self {
        self.page_num = self.page_num.saturating_add(1);
        self
    }
}

impl<T: Default> Default for PageRequest<T> {
    fn default() -> Self {
        Self::first(T::default())
    }
}

/// Page-number/size query parameters for `GET` listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub page: u32,
    pub size: u32,
}

impl Paging {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page: page.max(1),
            size: size.max(1),
        }
    }
}

impl Default for Paging {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// One page of results.
///
/// The backend answers with either its own page shape
/// (`records/total/size/current/pages`) or the pagination-plugin shape
/// (`list/pageNum/pageSize/totalPages`); both decode into this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    #[serde(default = "Vec::new", alias = "list")]
    pub records: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default, alias = "pageSize")]
    pub size: u64,
    #[serde(default, alias = "pageNum")]
    pub current: u64,
    #[serde(default, alias = "totalPages")]
    pub pages: u64,
}

impl<T> PageResult<T> {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_more(&self) -> bool {
        self.current < self.pages
    }
}

impl<T> Default for PageResult<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            total: 0,
            size: 0,
            current: 0,
            pages: 0,
        }
    }
}

impl<T> IntoIterator for PageResult<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

/// Decoding an integer status the backend does not define.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} code {code}")]
pub struct UnknownCode {
    pub kind: &'static str,
    pub code: i32,
}
