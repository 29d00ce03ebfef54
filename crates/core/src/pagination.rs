//! Page-number pagination for public listings.
//!
//! Out-of-range requests are forgiving: a missing or non-numeric page
//! yields the first page, anything past either end yields the last page,
//! and an empty listing still has one (empty) page.

use serde::Serialize;

/// A resolved page of a listing with `total` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub num_pages: i64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl PageWindow {
    /// Resolve the `page` query value against a listing size.
    pub fn new(requested: Option<&str>, per_page: i64, total: i64) -> Self {
        let per_page = per_page.max(1);
        let total = total.max(0);
        let num_pages = ((total + per_page - 1) / per_page).max(1);

        let page = match requested.map(str::trim).map(str::parse::<i64>) {
            Some(Ok(n)) if (1..=num_pages).contains(&n) => n,
            Some(Ok(_)) => num_pages,
            _ => 1,
        };

        Self {
            page,
            per_page,
            total,
            num_pages,
            has_next: page < num_pages,
            has_previous: page > 1,
        }
    }

    /// Row offset of the first item on this page.
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.per_page
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_page_is_first() {
        let w = PageWindow::new(None, 12, 30);
        assert_eq!(w.page, 1);
        assert_eq!(w.num_pages, 3);
        assert_eq!(w.offset(), 0);
        assert!(w.has_next);
        assert!(!w.has_previous);
    }

    #[test]
    fn garbage_page_is_first() {
        assert_eq!(PageWindow::new(Some("abc"), 12, 30).page, 1);
        assert_eq!(PageWindow::new(Some("2.0"), 12, 30).page, 1);
    }

    #[test]
    fn out_of_range_page_is_last() {
        assert_eq!(PageWindow::new(Some("99"), 12, 30).page, 3);
        assert_eq!(PageWindow::new(Some("0"), 12, 30).page, 3);
        assert_eq!(PageWindow::new(Some("-4"), 12, 30).page, 3);
    }

    #[test]
    fn middle_page_offsets() {
        let w = PageWindow::new(Some("2"), 12, 30);
        assert_eq!(w.offset(), 12);
        assert_eq!(w.limit(), 12);
        assert!(w.has_next);
        assert!(w.has_previous);
    }

    #[test]
    fn empty_listing_has_one_page() {
        let w = PageWindow::new(Some("5"), 16, 0);
        assert_eq!(w.num_pages, 1);
        assert_eq!(w.page, 1);
        assert!(!w.has_next);
        assert!(!w.has_previous);
    }

    #[test]
    fn exact_multiple_has_no_trailing_page() {
        assert_eq!(PageWindow::new(None, 12, 24).num_pages, 2);
    }
}
