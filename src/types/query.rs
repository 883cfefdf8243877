use serde::{Deserialize, Serialize};

use crate::config::CatalogConfig;
use crate::db::models::Product;

pub const DEFAULT_PAGE_NUMBER: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    Price,
}

impl SortKey {
    /// Only the exact key `Price` selects price ordering; anything else,
    /// including absence, falls back to name.
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        match raw {
            Some("Price") => SortKey::Price,
            _ => SortKey::Name,
        }
    }
}

/// Request-scoped listing parameters, already coerced to usable values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    pub sort_by: SortKey,
    pub filter: Option<String>,
    pub page_number: u32,
    pub page_size: u32,
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self {
            sort_by: SortKey::Name,
            filter: None,
            page_number: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl QuerySpec {
    /// The filter to apply, if any. Whitespace-only text means no filter.
    pub fn filter_text(&self) -> Option<&str> {
        self.filter.as_deref().filter(|f| !f.trim().is_empty())
    }

    /// Zero-based index of the first item on the requested page.
    pub fn offset(&self) -> usize {
        (self.page_number.saturating_sub(1) as usize).saturating_mul(self.page_size as usize)
    }
}

/// Raw `GET /products` query string. Every field is kept as text so that
/// malformed values degrade to defaults instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsQuery {
    pub sort_by: Option<String>,
    pub filter: Option<String>,
    pub page_number: Option<String>,
    pub page_size: Option<String>,
}

impl ListProductsQuery {
    pub fn into_spec(self, paging: &CatalogConfig) -> QuerySpec {
        let page_number = parse_int(self.page_number.as_deref())
            .filter(|n| *n >= 1)
            .map(|n| n.min(u32::MAX as i64) as u32)
            .unwrap_or(DEFAULT_PAGE_NUMBER);

        let page_size = parse_int(self.page_size.as_deref())
            .filter(|n| *n >= 0)
            .map(|n| n.min(u32::MAX as i64) as u32)
            .unwrap_or(paging.default_page_size);

        QuerySpec {
            sort_by: SortKey::parse_lenient(self.sort_by.as_deref()),
            filter: self.filter,
            page_number,
            page_size,
        }
    }
}

fn parse_int(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
}

/// Envelope returned by the list endpoint.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult {
    pub products: Vec<Product>,
    pub page_number: u32,
    pub page_size: u32,
    /// Size of the filtered collection before pagination.
    pub total_items: usize,
}
