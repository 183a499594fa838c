//! Page-number pagination for post listings.
//!
//! A [`Paginator`] turns `(total, requested page)` into a [`PageWindow`]
//! (the LIMIT/OFFSET to fetch) and wraps the fetched slice into a [`Page`].
//! Out-of-range requests are clamped instead of rejected.

use serde::{Deserialize, Serialize};

/// `?page=` query parameter, kept raw so garbage falls back to page 1.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    /// Requested page before clamping; non-integers and missing values mean 1.
    pub fn requested(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .unwrap_or(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub number: usize,
    pub num_pages: usize,
    pub count: usize,
    pub offset: usize,
    pub limit: usize,
}

impl PageWindow {
    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: usize,
    pub num_pages: usize,
    pub count: usize,
    pub has_next: bool,
    pub has_previous: bool,
    pub next_page_number: Option<usize>,
    pub previous_page_number: Option<usize>,
}

impl<T> Page<T> {
    pub fn new(window: PageWindow, items: Vec<T>) -> Self {
        Self {
            items,
            number: window.number,
            num_pages: window.num_pages,
            count: window.count,
            has_next: window.has_next(),
            has_previous: window.has_previous(),
            next_page_number: window.has_next().then(|| window.number + 1),
            previous_page_number: window.has_previous().then(|| window.number - 1),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    page_size: usize,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    /// An empty sequence still has one (empty) page.
    pub fn num_pages(&self, total: usize) -> usize {
        if total == 0 {
            1
        } else {
            total.div_ceil(self.page_size)
        }
    }

    pub fn window(&self, total: usize, requested: i64) -> PageWindow {
        let num_pages = self.num_pages(total);
        let number = requested.clamp(1, num_pages as i64) as usize;
        let offset = (number - 1) * self.page_size;

        PageWindow {
            number,
            num_pages,
            count: total,
            offset,
            limit: self.page_size.min(total.saturating_sub(offset)),
        }
    }

    /// Pure in-memory pagination of an already ordered sequence.
    pub fn page<T: Clone>(&self, items: &[T], requested: i64) -> Page<T> {
        let window = self.window(items.len(), requested);
        let slice = items[window.offset..window.offset + window.limit].to_vec();
        Page::new(window, slice)
    }
}
