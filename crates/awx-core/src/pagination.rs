//! Paginated list responses.
//!
//! Every AWX list endpoint answers with the same envelope:
//!
//! ```json
//! { "count": 42, "next": "/api/v2/...?page=3", "previous": "/api/v2/...?page=1", "results": [] }
//! ```
//!
//! [`Pagination`] carries the metadata and [`ListResponse`] adds the page of
//! results. Following `next` links is left to the caller; [`Pagination::next_page`]
//! extracts the page number to feed back into [`QueryParams::page`].
//!
//! [`QueryParams::page`]: crate::requester::QueryParams::page

use serde::{Deserialize, Serialize};
use url::Url;

/// Pagination metadata of a list response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Total number of items across all pages.
    #[serde(default)]
    pub count: u64,
    /// Link to the next page, if any.
    #[serde(default)]
    pub next: Option<String>,
    /// Link to the previous page, if any.
    #[serde(default)]
    pub previous: Option<String>,
}

impl Pagination {
    /// Returns true if there is a page after this one.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Returns the page number the `next` link points to.
    pub fn next_page(&self) -> Option<u32> {
        self.next.as_deref().and_then(page_from_link)
    }

    /// Returns the page number the `previous` link points to.
    ///
    /// AWX omits `page` from the link to the first page, so a link without it
    /// yields page 1.
    pub fn previous_page(&self) -> Option<u32> {
        self.previous.as_deref().and_then(page_from_link)
    }
}

fn page_from_link(link: &str) -> Option<u32> {
    // Links are usually server-relative.
    let base = Url::parse("http://localhost/").ok()?;
    let url = base.join(link).ok()?;

    match url.query_pairs().find(|(key, _)| key == "page") {
        Some((_, value)) => value.parse().ok(),
        None => Some(1),
    }
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    /// Pagination metadata.
    #[serde(flatten)]
    pub pagination: Pagination,
    /// Results on this page, in server order.
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> Default for ListResponse<T> {
    fn default() -> Self {
        Self {
            pagination: Pagination::default(),
            results: Vec::new(),
        }
    }
}

impl<T> ListResponse<T> {
    /// Total number of items across all pages.
    pub fn count(&self) -> u64 {
        self.pagination.count
    }

    /// Number of results on this page.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns true if this page holds no results.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Consumes the response, returning the results.
    pub fn into_results(self) -> Vec<T> {
        self.results
    }
}
