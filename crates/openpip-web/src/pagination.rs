//! Page-number pagination for list responses.

use openpip_common::ApiError;
use serde::Serialize;
use url::form_urlencoded;

use crate::config::ApiConfig;

pub const PAGE_PARAM: &str = "page";

/// Paginated list envelope.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// A resolved page: 1-based number and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub number: u64,
    pub size: u64,
    pub num_pages: u64,
}

impl PageWindow {
    pub fn offset(&self) -> u64 {
        (self.number - 1) * self.size
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }
}

/// Effective page size: a valid `page_size` parameter capped at
/// `max_page_size`, else the configured default. `None` when pagination is off.
pub fn page_size(api: &ApiConfig, requested: Option<&str>) -> Option<u64> {
    let default = api.page_size?.max(1);
    let size = requested
        .and_then(|raw| raw.trim().parse::<u64>().ok())
        .filter(|&n| n > 0)
        .map(|n| n.min(api.max_page_size.max(1)))
        .unwrap_or(default);
    Some(size)
}

/// Resolve the `page` parameter against `count` rows.
///
/// An empty result still has one (empty) first page. `last` selects the
/// final page. Anything else that is not a page in range is an error.
pub fn resolve_page(requested: Option<&str>, size: u64, count: u64) -> Result<PageWindow, ApiError> {
    let num_pages = count.div_ceil(size).max(1);
    let number = match requested.map(str::trim) {
        None | Some("") => 1,
        Some("last") => num_pages,
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|_| ApiError::InvalidPage(raw.to_string()))?,
    };

    if number == 0 || number > num_pages {
        return Err(ApiError::InvalidPage(number.to_string()));
    }
    Ok(PageWindow { number, size, num_pages })
}

/// Link to `page` of the same listing. The rest of the query string is kept;
/// page 1 drops the `page` parameter.
pub fn page_link(path: &str, query: Option<&str>, page: u64) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    if let Some(query) = query {
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if key != PAGE_PARAM {
                serializer.append_pair(&key, &value);
            }
        }
    }
    if page > 1 {
        serializer.append_pair(PAGE_PARAM, &page.to_string());
    }

    let query = serializer.finish();
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query)
    }
}
