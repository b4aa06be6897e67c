//! Query parameters for one links retrieval.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::error::QueryError;
use super::record::Filter;

/// Direction in which the server sorts the requested column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    /// Smallest first; `"asc"` on the wire.
    #[serde(rename = "asc")]
    Ascending,
    /// Largest first; `"desc"` on the wire.
    #[serde(rename = "desc")]
    Descending,
}

impl SortOrder {
    /// Returns the wire label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a sort order label is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid sort order '{0}': expected asc, ascending, desc or descending")]
pub struct ParseSortOrderError(String);

impl FromStr for SortOrder {
    type Err = ParseSortOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(ParseSortOrderError(s.to_string())),
        }
    }
}

/// Parameters of a single `POST /api/links` call.
///
/// Serializes to the request body. Optional parts that were never set are
/// left out of the body entirely, so servers that only understand
/// `{ domain, page, limit }` keep working.
///
/// # Example
///
/// ```
/// use backlinks_core::{Filter, LinksQuery, SortOrder};
///
/// let query = LinksQuery::new("example.com", 1, 20)
///     .unwrap()
///     .with_sort("qty")
///     .with_order(SortOrder::Descending)
///     .with_filters(vec![Filter::new("no_follow", "0", "eq")]);
/// assert_eq!(query.page(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinksQuery {
    domain: String,
    page: u32,
    limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    order: Option<SortOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    filters: Option<Vec<Filter>>,
}

impl LinksQuery {
    /// Creates a query for one page of backlinks of `domain`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError`] when `page` or `limit` is zero.
    pub fn new(domain: impl Into<String>, page: u32, limit: u32) -> Result<Self, QueryError> {
        if page == 0 {
            return Err(QueryError::InvalidPage(page));
        }
        if limit == 0 {
            return Err(QueryError::InvalidLimit(limit));
        }
        Ok(Self {
            domain: domain.into(),
            page,
            limit,
            sort: None,
            order: None,
            filters: None,
        })
    }

    /// Sets the sort column, leaving the direction to the server unless
    /// [`with_order`](Self::with_order) is also called.
    #[must_use]
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Sets only the sort direction.
    #[must_use]
    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Attaches filters. An empty list is still sent as `[]`.
    #[must_use]
    pub fn with_filters(mut self, filters: Vec<Filter>) -> Self {
        self.filters = Some(filters);
        self
    }

    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
    }

    #[must_use]
    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    #[must_use]
    pub fn order(&self) -> Option<SortOrder> {
        self.order
    }

    #[must_use]
    pub fn filters(&self) -> Option<&[Filter]> {
        self.filters.as_deref()
    }
}
