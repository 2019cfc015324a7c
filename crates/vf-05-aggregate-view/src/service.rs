//! Aggregate View - projections a list screen renders from the record set.

use crate::domain::{filter_records, summarize, Page, Paginator, Summary, DEFAULT_PAGE_SIZE};
use crate::error::ViewResult;
use shared_types::{Record, Timestamp};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewConfig {
    pub page_size: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Search term plus requested page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewQuery {
    pub term: String,
    pub page: usize,
}

impl Default for ViewQuery {
    fn default() -> Self {
        Self {
            term: String::new(),
            page: 1,
        }
    }
}

impl ViewQuery {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            page: 1,
        }
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AggregateView {
    paginator: Paginator,
}

impl AggregateView {
    pub fn new(config: &ViewConfig) -> ViewResult<Self> {
        Ok(Self {
            paginator: Paginator::new(config.page_size)?,
        })
    }

    pub fn page_size(&self) -> usize {
        self.paginator.page_size()
    }

    /// Statistics over every record, ignoring the search term.
    pub fn summary(&self, records: &[Record], now: Timestamp) -> Summary {
        summarize(records, now)
    }

    /// The requested page of records matching the query's term.
    pub fn page(&self, records: &[Record], query: &ViewQuery) -> Page<Record> {
        let hits = filter_records(records, &query.term)
            .into_iter()
            .cloned()
            .collect();
        self.paginator.page(hits, query.page)
    }
}

impl Default for AggregateView {
    fn default() -> Self {
        Self {
            paginator: Paginator::default(),
        }
    }
}
