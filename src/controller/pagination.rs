use crate::envelope::Page;
use std::collections::HashSet;

/// Infinite-scroll bookkeeping: which page to ask for next and whether the
/// server has anything left.
#[derive(Debug, Clone, PartialEq)]
pub struct Paginator {
    next_page: u32,
    limit: u32,
    exhausted: bool,
}

impl Paginator {
    pub fn new(limit: u32) -> Self {
        Self {
            next_page: 1,
            limit: limit.max(1),
            exhausted: false,
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn has_more(&self) -> bool {
        !self.exhausted
    }

    /// Page number to request, or `None` once the list is complete.
    pub fn next_request(&self) -> Option<u32> {
        (!self.exhausted).then_some(self.next_page)
    }

    pub fn reset(&mut self) {
        self.next_page = 1;
        self.exhausted = false;
    }

    /// Appends a page to `items`, skipping ids already present, and advances.
    /// A short page or reaching `total_pages` ends the list.
    pub fn absorb<T>(&mut self, items: &mut Vec<T>, page: Page<T>, id: impl Fn(&T) -> &str) {
        let received = page.items.len();
        let mut seen: HashSet<String> = items.iter().map(|item| id(item).to_string()).collect();
        for item in page.items {
            if seen.insert(id(&item).to_string()) {
                items.push(item);
            }
        }

        let last_by_count = received < self.limit as usize;
        let last_by_total = page.total_pages.is_some_and(|total| self.next_page >= total);
        self.exhausted = last_by_count || last_by_total;
        self.next_page += 1;
    }
}
