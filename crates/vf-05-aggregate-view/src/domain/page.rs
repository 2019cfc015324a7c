//! Fixed-size, 1-based pagination.

use crate::error::{ViewError, ViewResult};
use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: usize = 5;

/// One page of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Clamped, 1-based page number.
    pub number: usize,
    /// `ceil(total_items / page_size)`; 0 when there are no items.
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Paginator {
    pub fn new(page_size: usize) -> ViewResult<Self> {
        if page_size == 0 {
            return Err(ViewError::ZeroPageSize);
        }
        Ok(Self { page_size })
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self, total_items: usize) -> usize {
        total_items.div_ceil(self.page_size)
    }

    /// Clamp `requested` into `1..=total_pages` (page 1 when empty).
    pub fn clamp(&self, requested: usize, total_items: usize) -> usize {
        requested.clamp(1, self.total_pages(total_items).max(1))
    }

    pub fn page<T>(&self, items: Vec<T>, requested: usize) -> Page<T> {
        let total_items = items.len();
        let number = self.clamp(requested, total_items);
        let items = items
            .into_iter()
            .skip((number - 1) * self.page_size)
            .take(self.page_size)
            .collect();

        Page {
            items,
            number,
            total_pages: self.total_pages(total_items),
            total_items,
        }
    }
}
