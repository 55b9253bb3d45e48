//! Headless pagination widget: which controls exist and which clicks are
//! allowed to navigate.

/// One control in the page strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSlot {
    /// Button for a page number.
    Page(u32),
    /// Non-interactive gap; the string keeps the two gaps distinct as keys.
    Ellipsis(&'static str),
}

/// A click on the page strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequest {
    /// The "previous" arrow.
    Previous,
    /// The "next" arrow.
    Next,
    /// A page number button.
    Page(u32),
}

/// Snapshot of the strip's inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationModel {
    current_page: u32,
    total_pages: u32,
    item_count: usize,
    loading: bool,
}

impl PaginationModel {
    /// `current_page` is floored at 1 but never clamped to `total_pages`: a
    /// list sitting past the last page keeps its real position.
    pub fn new(current_page: u32, total_pages: u32, item_count: usize, loading: bool) -> Self {
        Self {
            current_page: current_page.max(1),
            total_pages,
            item_count,
            loading,
        }
    }

    /// Page shown as active.
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Pages reported by the server.
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Records on the page being shown.
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Whether a read is in flight; every control is disabled while it is.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Nothing to paginate: the widget renders nothing.
    pub fn is_hidden(&self) -> bool {
        self.total_pages <= 1 || self.item_count == 0
    }

    fn is_inert(&self) -> bool {
        self.loading || self.total_pages == 0 || self.item_count == 0
    }

    /// "Previous" arrow enabled.
    pub fn can_go_previous(&self) -> bool {
        !self.is_inert() && self.current_page > 1
    }

    /// "Next" arrow enabled.
    pub fn can_go_next(&self) -> bool {
        !self.is_inert() && self.current_page < self.total_pages
    }

    /// Resolve a click into the page to navigate to, or `None` when the click
    /// must not reach the page-change callback.
    pub fn request(&self, request: PageRequest) -> Option<u32> {
        if self.is_inert() {
            return None;
        }
        let target = match request {
            PageRequest::Previous if self.can_go_previous() => self.current_page - 1,
            PageRequest::Next if self.can_go_next() => self.current_page + 1,
            PageRequest::Page(page) if (1..=self.total_pages).contains(&page) => page,
            _ => return None,
        };
        (target != self.current_page).then_some(target)
    }

    /// At most seven controls: first, last, the current page with its
    /// neighbours and an ellipsis for each gap. Near either end the window
    /// widens so the strip keeps its length.
    pub fn slots(&self) -> Vec<PageSlot> {
        let total = self.total_pages;
        if total == 0 {
            return Vec::new();
        }
        if total <= 7 {
            return (1..=total).map(PageSlot::Page).collect();
        }

        let current = self.current_page.min(total);
        let (start, end) = if current <= 4 {
            (2, 5)
        } else if current + 3 >= total {
            (total - 4, total - 1)
        } else {
            (current - 1, current + 1)
        };

        let mut slots = vec![PageSlot::Page(1)];
        if start > 2 {
            slots.push(PageSlot::Ellipsis("left"));
        }
        slots.extend((start..=end).map(PageSlot::Page));
        if end < total - 1 {
            slots.push(PageSlot::Ellipsis("right"));
        }
        slots.push(PageSlot::Page(total));
        slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(slots: &[PageSlot]) -> Vec<Option<u32>> {
        slots
            .iter()
            .map(|slot| match slot {
                PageSlot::Page(p) => Some(*p),
                PageSlot::Ellipsis(_) => None,
            })
            .collect()
    }

    #[test]
    fn zero_pages_never_navigates() {
        let model = PaginationModel::new(1, 0, 0, false);
        assert!(model.is_hidden());
        assert!(model.slots().is_empty());
        for request in [
            PageRequest::Previous,
            PageRequest::Next,
            PageRequest::Page(0),
            PageRequest::Page(1),
            PageRequest::Page(2),
        ] {
            assert_eq!(model.request(request), None);
        }
    }

    #[test]
    fn empty_page_never_navigates() {
        let model = PaginationModel::new(3, 2, 0, false);
        assert!(model.is_hidden());
        assert!(!model.can_go_previous());
        assert!(!model.can_go_next());
        for request in [
            PageRequest::Previous,
            PageRequest::Next,
            PageRequest::Page(1),
            PageRequest::Page(2),
        ] {
            assert_eq!(model.request(request), None);
        }
    }

    #[test]
    fn loading_blocks_every_click() {
        let model = PaginationModel::new(2, 5, 10, true);
        assert_eq!(model.request(PageRequest::Next), None);
        assert_eq!(model.request(PageRequest::Previous), None);
        assert_eq!(model.request(PageRequest::Page(4)), None);
        assert!(!model.can_go_next());
    }

    #[test]
    fn boundaries_are_disabled() {
        let first = PaginationModel::new(1, 3, 10, false);
        assert_eq!(first.request(PageRequest::Previous), None);
        assert_eq!(first.request(PageRequest::Next), Some(2));

        let last = PaginationModel::new(3, 3, 4, false);
        assert_eq!(last.request(PageRequest::Next), None);
        assert_eq!(last.request(PageRequest::Previous), Some(2));
        assert_eq!(last.request(PageRequest::Page(3)), None);
        assert_eq!(last.request(PageRequest::Page(9)), None);
        assert_eq!(last.request(PageRequest::Page(1)), Some(1));
    }

    #[test]
    fn current_page_keeps_its_real_position() {
        let past_end = PaginationModel::new(4, 3, 2, false);
        assert_eq!(past_end.current_page(), 4);
        assert_eq!(past_end.request(PageRequest::Previous), Some(3));
        assert_eq!(past_end.request(PageRequest::Page(3)), Some(3));
        assert_eq!(past_end.request(PageRequest::Next), None);
        assert_eq!(PaginationModel::new(0, 3, 8, false).current_page(), 1);
    }

    #[test]
    fn short_strips_list_every_page() {
        let model = PaginationModel::new(2, 3, 8, false);
        assert_eq!(pages(&model.slots()), vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn long_strips_use_ellipses() {
        let strip = |current| pages(&PaginationModel::new(current, 20, 10, false).slots());
        assert_eq!(strip(1), vec![Some(1), Some(2), Some(3), Some(4), Some(5), None, Some(20)]);
        assert_eq!(strip(4), vec![Some(1), Some(2), Some(3), Some(4), Some(5), None, Some(20)]);
        assert_eq!(strip(10), vec![Some(1), None, Some(9), Some(10), Some(11), None, Some(20)]);
        assert_eq!(strip(17), vec![Some(1), None, Some(16), Some(17), Some(18), Some(19), Some(20)]);
        assert_eq!(strip(20), vec![Some(1), None, Some(16), Some(17), Some(18), Some(19), Some(20)]);
    }

    #[test]
    fn strips_never_exceed_seven_controls() {
        for total in 0..=30 {
            for current in 1..=total.max(1) + 1 {
                let slots = PaginationModel::new(current, total, 5, false).slots();
                assert!(slots.len() <= 7, "{current}/{total}: {slots:?}");
            }
        }
    }
}
