//! # vf-05-aggregate-view
//!
//! Pure projections over a record set: summary statistics, a
//! case-insensitive search filter and fixed-size pagination. Nothing here
//! performs I/O or holds state between calls.

pub mod domain;
pub mod error;
pub mod service;

pub use domain::{filter_records, summarize, Page, Paginator, Summary, DEFAULT_PAGE_SIZE};
pub use error::{ViewError, ViewResult};
pub use service::{AggregateView, ViewConfig, ViewQuery};
