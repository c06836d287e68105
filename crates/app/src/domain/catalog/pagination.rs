//! Listing pagination.

/// Products shown per listing page.
pub const PRODUCTS_PER_PAGE: u32 = 12;

/// A resolved page of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// One-based page number.
    pub number: u32,
    pub num_pages: u32,
    pub per_page: u32,
    pub total_count: u64,
}

impl Page {
    /// Resolve a raw page parameter against the size of the result set.
    ///
    /// A missing or unparsable parameter gives the first page. A number below
    /// one or past the end gives the last page. An empty result set still has
    /// one (empty) page.
    #[must_use]
    pub fn resolve(requested: Option<&str>, total_count: u64, per_page: u32) -> Self {
        let per_page = per_page.max(1);
        let num_pages = num_pages(total_count, per_page);

        let number = match requested.and_then(parse_page_number) {
            None => 1,
            Some(number) if number < 1 || number > i64::from(num_pages) => num_pages,
            Some(number) => u32::try_from(number).unwrap_or(num_pages),
        };

        Self {
            number,
            num_pages,
            per_page,
            total_count,
        }
    }

    /// Rows to skip before this page.
    #[must_use]
    pub fn offset(&self) -> i64 {
        i64::from(self.number.saturating_sub(1)) * i64::from(self.per_page)
    }

    #[must_use]
    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }
}

fn num_pages(total_count: u64, per_page: u32) -> u32 {
    let pages = total_count.div_ceil(u64::from(per_page)).max(1);

    u32::try_from(pages).unwrap_or(u32::MAX)
}

fn parse_page_number(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}
