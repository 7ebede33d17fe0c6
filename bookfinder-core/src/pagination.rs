//! Page counts and the sliding window of page links

use serde::Serialize;

/// Number of pages needed for `total_found` results
pub fn total_pages(total_found: u64, page_size: u32) -> u32 {
    let page_size = u64::from(page_size.max(1));
    let pages = total_found.div_ceil(page_size);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// One control in the page-link strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageLink {
    Prev { enabled: bool },
    Page { number: u32, current: bool },
    Ellipsis,
    Next { enabled: bool },
}

impl PageLink {
    fn page(number: u32) -> Self {
        PageLink::Page {
            number,
            current: false,
        }
    }
}

/// Pagination state for one rendered page of results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,

    /// A request is in flight; every control is inert
    pub loading: bool,
}

impl Pagination {
    pub fn new(current_page: u32, total_pages: u32) -> Self {
        Self {
            current_page,
            total_pages,
            loading: false,
        }
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Whether the strip is shown at all
    pub fn is_visible(&self) -> bool {
        self.total_pages > 1
    }

    /// Build the link strip
    pub fn links(&self) -> Vec<PageLink> {
        if !self.is_visible() {
            return Vec::new();
        }

        let current = self.current_page;
        let total = self.total_pages;
        let mut links = Vec::with_capacity(9);

        links.push(PageLink::Prev {
            enabled: current > 1 && !self.loading,
        });

        if current > 2 {
            links.push(PageLink::page(1));
        }
        if current > 3 {
            links.push(PageLink::Ellipsis);
        }
        if current > 1 {
            links.push(PageLink::page(current - 1));
        }

        links.push(PageLink::Page {
            number: current,
            current: true,
        });

        if current < total {
            links.push(PageLink::page(current + 1));
        }
        if current.saturating_add(2) < total {
            links.push(PageLink::Ellipsis);
        }
        if current.saturating_add(1) < total {
            links.push(PageLink::page(total));
        }

        links.push(PageLink::Next {
            enabled: current < total && !self.loading,
        });

        links
    }

    /// Validate a page request
    ///
    /// Returns the page to navigate to, or `None` when the request is out of
    /// range or arrives while loading.
    pub fn request(&self, page: u32) -> Option<u32> {
        if self.loading || page < 1 || page > self.total_pages {
            return None;
        }
        Some(page)
    }

    /// Page behind the Prev control, if it is usable
    pub fn prev(&self) -> Option<u32> {
        self.current_page.checked_sub(1).and_then(|p| self.request(p))
    }

    /// Page behind the Next control, if it is usable
    pub fn next(&self) -> Option<u32> {
        self.current_page
            .checked_add(1)
            .and_then(|p| self.request(p))
    }
}

/// Link strip for `current_page` of `total_pages` when nothing is loading
pub fn window(current_page: u32, total_pages: u32) -> Vec<PageLink> {
    Pagination::new(current_page, total_pages).links()
}

/// Render a link strip as compact text, e.g. `< [1] 2 … 10 >`
pub fn render_links(links: &[PageLink]) -> String {
    links
        .iter()
        .map(|link| match link {
            PageLink::Prev { enabled: true } => "<".to_string(),
            PageLink::Prev { enabled: false } => "(<)".to_string(),
            PageLink::Page {
                number,
                current: true,
            } => format!("[{}]", number),
            PageLink::Page { number, .. } => number.to_string(),
            PageLink::Ellipsis => "…".to_string(),
            PageLink::Next { enabled: true } => ">".to_string(),
            PageLink::Next { enabled: false } => "(>)".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use PageLink::*;

    fn page(number: u32) -> PageLink {
        Page {
            number,
            current: false,
        }
    }

    fn current(number: u32) -> PageLink {
        Page {
            number,
            current: true,
        }
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(1, 20), 1);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
        assert_eq!(total_pages(2137, 20), 107);
    }

    #[test]
    fn test_hidden_for_single_page() {
        assert!(window(1, 0).is_empty());
        assert!(window(1, 1).is_empty());
    }

    #[test]
    fn test_first_page() {
        assert_eq!(
            window(1, 10),
            vec![
                Prev { enabled: false },
                current(1),
                page(2),
                Ellipsis,
                page(10),
                Next { enabled: true },
            ]
        );
    }

    #[test]
    fn test_middle_page() {
        assert_eq!(
            window(5, 10),
            vec![
                Prev { enabled: true },
                page(1),
                Ellipsis,
                page(4),
                current(5),
                page(6),
                Ellipsis,
                page(10),
                Next { enabled: true },
            ]
        );
    }

    #[test]
    fn test_last_page() {
        assert_eq!(
            window(10, 10),
            vec![
                Prev { enabled: true },
                page(1),
                Ellipsis,
                page(9),
                current(10),
                Next { enabled: false },
            ]
        );
    }

    #[test]
    fn test_adjacent_pages_have_no_ellipsis() {
        assert_eq!(
            window(3, 5),
            vec![
                Prev { enabled: true },
                page(1),
                page(2),
                current(3),
                page(4),
                page(5),
                Next { enabled: true },
            ]
        );
    }

    #[test]
    fn test_loading_disables_controls() {
        let pagination = Pagination::new(5, 10).loading(true);
        let links = pagination.links();
        assert_eq!(links.first(), Some(&Prev { enabled: false }));
        assert_eq!(links.last(), Some(&Next { enabled: false }));
        assert_eq!(pagination.request(6), None);
        assert_eq!(pagination.next(), None);
    }

    #[test]
    fn test_out_of_range_requests_are_ignored() {
        let pagination = Pagination::new(1, 3);
        assert_eq!(pagination.request(0), None);
        assert_eq!(pagination.request(4), None);
        assert_eq!(pagination.request(3), Some(3));
        assert_eq!(pagination.prev(), None);
        assert_eq!(pagination.next(), Some(2));
    }

    #[test]
    fn test_render_links() {
        insta::assert_snapshot!(render_links(&window(5, 10)), @"< 1 … 4 [5] 6 … 10 >");
    }

    proptest! {
        #[test]
        fn prop_total_pages_is_ceiling(total in 0u64..1_000_000, size in 1u32..500) {
            let pages = u64::from(total_pages(total, size));
            prop_assert!(pages * u64::from(size) >= total);
            prop_assert!(pages == 0 || (pages - 1) * u64::from(size) < total);
            prop_assert_eq!(window(1, pages as u32).is_empty(), pages <= 1);
        }

        #[test]
        fn prop_window_is_deterministic_and_well_formed(total in 2u32..500, seed in 0u32..500) {
            let current_page = seed % total + 1;
            let links = window(current_page, total);
            prop_assert_eq!(&links, &window(current_page, total));

            let starts_with_prev = matches!(links.first(), Some(Prev { .. }));
            prop_assert!(starts_with_prev, "first link is Prev");
            let ends_with_next = matches!(links.last(), Some(Next { .. }));
            prop_assert!(ends_with_next, "last link is Next");

            let active: Vec<_> = links
                .iter()
                .filter(|l| matches!(l, Page { current: true, .. }))
                .collect();
            prop_assert_eq!(active.len(), 1);
            prop_assert_eq!(*active[0], current(current_page));

            let numbers: Vec<u32> = links
                .iter()
                .filter_map(|l| match l {
                    Page { number, .. } => Some(*number),
                    _ => None,
                })
                .collect();
            prop_assert!(numbers.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(numbers.iter().all(|n| (1..=total).contains(n)));
        }
    }
}
