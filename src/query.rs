//! Post listing queries: category filter, title search and pagination.

use crate::model::Post;
use crate::store::{Filter, Order, Range, RowSet, StoreError};

/// Category selector value that means "no category filter".
pub const ALL_CATEGORIES: &str = "All posts";

/// Posts shown per listing page.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Listing request as the view expresses it.
///
/// `page` and `page_size` are at least one; smaller values are clamped on
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    category: String,
    search_term: String,
    page: usize,
    page_size: usize,
}

impl QuerySpec {
    pub fn new(
        category: impl Into<String>,
        search_term: impl Into<String>,
        page: usize,
        page_size: usize,
    ) -> Self {
        Self {
            category: category.into(),
            search_term: search_term.into(),
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// One based page number.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Inclusive zero based row window for this page.
    ///
    /// Saturates at `usize::MAX`; a window past the last row selects nothing.
    pub fn range(&self) -> Range {
        let start = (self.page - 1).saturating_mul(self.page_size);
        Range {
            start,
            end: start.saturating_add(self.page_size - 1),
        }
    }
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self::new(ALL_CATEGORIES, "", 1, DEFAULT_PAGE_SIZE)
    }
}

/// Store instructions derived from a [`QuerySpec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostQuery {
    /// Exact category match, absent for the sentinel category.
    pub category: Option<String>,
    /// Trimmed title substring, absent when the term is blank.
    pub search: Option<String>,
    pub range_start: usize,
    pub range_end: usize,
}

impl PostQuery {
    /// Row filter for the posts table.
    pub fn filter(&self) -> Filter {
        let mut filter = Filter::new();
        if let Some(category) = &self.category {
            filter = filter.eq("category", category.as_str());
        }
        if let Some(search) = &self.search {
            filter = filter.ilike("title", search.as_str());
        }
        filter
    }

    /// Newest first. Not configurable.
    pub fn order(&self) -> Order {
        Order::desc("created_at")
    }

    pub fn range(&self) -> Range {
        Range {
            start: self.range_start,
            end: self.range_end,
        }
    }
}

/// Translates a listing request into store instructions.
pub fn build_query(spec: &QuerySpec) -> PostQuery {
    let category = (spec.category() != ALL_CATEGORIES).then(|| spec.category().to_string());

    let term = spec.search_term().trim();
    let search = (!term.is_empty()).then(|| term.to_string());

    let range = spec.range();
    PostQuery {
        category,
        search,
        range_start: range.start,
        range_end: range.end,
    }
}

/// One page of posts and the size of the whole filtered set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub items: Vec<Post>,
    pub total_count: usize,
}

impl QueryResult {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of pages needed to show every matching post.
    pub fn page_count(&self, page_size: usize) -> usize {
        page_count(self.total_count, page_size)
    }
}

/// `ceil(total / page_size)`, zero when there is nothing to show.
pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1))
}

/// Reshapes the store's reply into a [`QueryResult`].
///
/// A store error becomes an empty result and is logged; callers cannot tell
/// it apart from "no matching posts". Use [`interpret_result_checked`] to
/// keep the failure. Rows that do not decode as posts are skipped.
pub fn interpret_result(raw: Result<RowSet, StoreError>) -> QueryResult {
    interpret_result_checked(raw).unwrap_or_else(|e| {
        crate::log!("error"; "post query failed: {}", e);
        QueryResult::empty()
    })
}

/// Like [`interpret_result`], but a store error is returned to the caller.
///
/// # Errors
///
/// Returns the store's error unchanged.
pub fn interpret_result_checked(raw: Result<RowSet, StoreError>) -> Result<QueryResult, StoreError> {
    let set = raw?;
    let returned = set.rows.len();

    let items: Vec<Post> = set
        .rows
        .into_iter()
        .filter_map(|row| match serde_json::from_value(row.into()) {
            Ok(post) => Some(post),
            Err(e) => {
                crate::debug!("query"; "skipping malformed post row: {}", e);
                None
            }
        })
        .collect();

    Ok(QueryResult {
        items,
        total_count: set.count.unwrap_or(returned),
    })
}
