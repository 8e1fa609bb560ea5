//! Pagination state derived from the last successful report page.
//!
//! `PageInfo` answers the questions the pagination bar asks: whether the
//! previous and next buttons are live, which records are on screen, and
//! which page numbers to offer.

/// A slot in the page selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSlot {
    /// A selectable page number.
    Page(u32),
    /// A gap between non-adjacent page numbers.
    Ellipsis,
}

/// Number of page slots shown before the selector collapses into ellipses.
pub const DEFAULT_VISIBLE_PAGES: u32 = 5;

/// Current page state for a report.
///
/// # Example
///
/// ```
/// use reportero::report::PageInfo;
///
/// let info = PageInfo::new(2, 50).with_totals(120, 3);
/// assert!(info.has_prev());
/// assert!(info.has_next());
/// assert_eq!(info.first_item_index(), 51);
/// assert_eq!(info.last_item_index(), 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// Current page number (1-based).
    current_page: u32,
    /// Items per page.
    per_page: u32,
    /// Items across every page.
    total_items: u64,
    /// Number of pages.
    total_pages: u32,
}

impl PageInfo {
    /// Creates page info with no items.
    #[must_use]
    pub const fn new(current_page: u32, per_page: u32) -> Self {
        Self {
            current_page,
            per_page,
            total_items: 0,
            total_pages: 0,
        }
    }

    /// Sets the item and page totals.
    #[must_use]
    pub const fn with_totals(mut self, total_items: u64, total_pages: u32) -> Self {
        self.total_items = total_items;
        self.total_pages = total_pages;
        self
    }

    /// Returns the current page number (1-based).
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Returns the number of items per page.
    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Returns the number of items across all pages.
    #[must_use]
    pub const fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Returns the number of pages.
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Returns true if more pages exist after the current one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Returns true if pages exist before the current one.
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    /// Returns true if `page` is a page of this result.
    #[must_use]
    pub const fn can_navigate_to(&self, page: u32) -> bool {
        page >= 1 && page <= self.total_pages
    }

    /// Returns the 1-based index of the first record on the current page, or
    /// zero when there are no records.
    #[must_use]
    pub fn first_item_index(&self) -> u64 {
        if self.total_items == 0 {
            return 0;
        }
        let offset = u64::from(self.current_page.saturating_sub(1)) * u64::from(self.per_page);
        (offset + 1).min(self.total_items)
    }

    /// Returns the 1-based index of the last record on the current page.
    #[must_use]
    pub fn last_item_index(&self) -> u64 {
        (u64::from(self.current_page) * u64::from(self.per_page)).min(self.total_items)
    }

    /// Lists the page slots to display.
    ///
    /// Every page is listed when there are at most `max_visible` pages.
    /// Otherwise the first and last pages and the neighbours of the current
    /// page are listed, with [`PageSlot::Ellipsis`] marking gaps.
    #[must_use]
    pub fn visible_pages(&self, max_visible: u32) -> Vec<PageSlot> {
        let total = self.total_pages;
        if total <= max_visible {
            return (1..=total).map(PageSlot::Page).collect();
        }

        let left = self.current_page.saturating_sub(1).max(1);
        let right = self.current_page.saturating_add(1).min(total);

        let mut slots = vec![PageSlot::Page(1)];
        if left > 2 {
            slots.push(PageSlot::Ellipsis);
        }
        slots.extend(
            (left..=right)
                .filter(|page| *page != 1 && *page != total)
                .map(PageSlot::Page),
        );
        if right < total.saturating_sub(1) {
            slots.push(PageSlot::Ellipsis);
        }
        if total > 1 {
            slots.push(PageSlot::Page(total));
        }
        slots
    }
}

impl Default for PageInfo {
    fn default() -> Self {
        Self::new(1, super::query::DEFAULT_PER_PAGE)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{DEFAULT_VISIBLE_PAGES, PageInfo, PageSlot};

    use PageSlot::{Ellipsis, Page};

    #[rstest]
    #[case::first(1, false, true)]
    #[case::middle(2, true, true)]
    #[case::last(3, true, false)]
    fn navigation_predicates(#[case] page: u32, #[case] has_prev: bool, #[case] has_next: bool) {
        let info = PageInfo::new(page, 50).with_totals(120, 3);

        assert_eq!(info.has_prev(), has_prev, "unexpected has_prev");
        assert_eq!(info.has_next(), has_next, "unexpected has_next");
    }

    #[rstest]
    #[case::zero(0, false)]
    #[case::first(1, true)]
    #[case::last(3, true)]
    #[case::beyond(4, false)]
    fn navigation_bounds(#[case] page: u32, #[case] expected: bool) {
        let info = PageInfo::new(1, 50).with_totals(120, 3);
        assert_eq!(info.can_navigate_to(page), expected);
    }

    #[rstest]
    #[case::first_page(1, (1, 50))]
    #[case::partial_last_page(3, (101, 120))]
    fn displayed_range(#[case] page: u32, #[case] expected: (u64, u64)) {
        let info = PageInfo::new(page, 50).with_totals(120, 3);
        assert_eq!((info.first_item_index(), info.last_item_index()), expected);
    }

    #[rstest]
    fn empty_result_shows_zero_range() {
        let info = PageInfo::new(1, 50);
        assert_eq!((info.first_item_index(), info.last_item_index()), (0, 0));
        assert!(info.visible_pages(DEFAULT_VISIBLE_PAGES).is_empty());
    }

    #[rstest]
    #[case::few_pages(2, 4, vec![Page(1), Page(2), Page(3), Page(4)])]
    #[case::start(1, 10, vec![Page(1), Page(2), Ellipsis, Page(10)])]
    #[case::near_start(3, 10, vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(10)])]
    #[case::middle(5, 10, vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)])]
    #[case::near_end(8, 10, vec![Page(1), Ellipsis, Page(7), Page(8), Page(9), Page(10)])]
    #[case::end(10, 10, vec![Page(1), Ellipsis, Page(9), Page(10)])]
    fn page_window(#[case] current: u32, #[case] total: u32, #[case] expected: Vec<PageSlot>) {
        let info = PageInfo::new(current, 50).with_totals(u64::from(total) * 50, total);
        assert_eq!(info.visible_pages(DEFAULT_VISIBLE_PAGES), expected);
    }
}
