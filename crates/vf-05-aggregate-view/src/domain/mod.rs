pub mod filter;
pub mod page;
pub mod summary;

pub use filter::{filter_records, matches_term};
pub use page::{Page, Paginator, DEFAULT_PAGE_SIZE};
pub use summary::{summarize, Summary, RECENT_WINDOW_SECS};
