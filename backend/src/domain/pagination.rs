//! Offset pagination for list endpoints.

/// Default number of items returned when the caller does not ask for a limit.
pub const DEFAULT_PAGE_LIMIT: u32 = 20;
/// Upper bound on the number of items returned in one page.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Offset/limit window over an ordered listing.
///
/// ## Invariants
/// - `limit` never exceeds `MAX_PAGE_LIMIT`. A zero limit yields an empty
///   page.
///
/// # Examples
/// ```
/// use hotel_backend::domain::PageRequest;
///
/// let page = PageRequest::new(Some(40), Some(500));
/// assert_eq!(page.skip(), 40);
/// assert_eq!(page.limit(), 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    skip: u32,
    limit: u32,
}

impl PageRequest {
    /// Build a page, applying defaults and capping the limit.
    pub fn new(skip: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            skip: skip.unwrap_or(0),
            limit: limit
                .unwrap_or(DEFAULT_PAGE_LIMIT)
                .min(MAX_PAGE_LIMIT),
        }
    }

    /// Number of items to pass over.
    pub fn skip(&self) -> u32 {
        self.skip
    }

    /// Maximum number of items to return.
    pub fn limit(&self) -> u32 {
        self.limit
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, None, 0, DEFAULT_PAGE_LIMIT)]
    #[case(Some(10), Some(5), 10, 5)]
    #[case(Some(0), Some(0), 0, 0)]
    #[case(None, Some(1_000), 0, MAX_PAGE_LIMIT)]
    fn applies_defaults_and_bounds(
        #[case] skip: Option<u32>,
        #[case] limit: Option<u32>,
        #[case] expected_skip: u32,
        #[case] expected_limit: u32,
    ) {
        let page = PageRequest::new(skip, limit);
        assert_eq!(page.skip(), expected_skip);
        assert_eq!(page.limit(), expected_limit);
    }
}
