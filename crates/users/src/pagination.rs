//! Page/limit arithmetic shared by the player listing and the leaderboard.
//!
//! Pages are 1-based on the wire. Everything here is pure: a [`PageRequest`]
//! can only be built from a positive page and limit, and the offset it yields
//! is computed in `u64` so large pages never overflow.

use crate::types::PaginationError;

/// A validated 1-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Validate raw (possibly caller-supplied) page and limit values.
    ///
    /// ```
    /// use gamehub_users::pagination::PageRequest;
    ///
    /// let window = PageRequest::new(3, 25).unwrap();
    /// assert_eq!(window.offset(), 50);
    /// assert!(PageRequest::new(0, 25).is_err());
    /// ```
    pub fn new(page: i64, limit: i64) -> Result<Self, PaginationError> {
        let page = u32::try_from(page)
            .ok()
            .filter(|page| *page >= 1)
            .ok_or(PaginationError::InvalidPage(page))?;
        let limit = u32::try_from(limit)
            .ok()
            .filter(|limit| *limit >= 1)
            .ok_or(PaginationError::InvalidLimit(limit))?;

        Ok(Self { page, limit })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Zero-based number of records to skip.
    pub fn offset(&self) -> u64 {
        (u64::from(self.page) - 1) * u64::from(self.limit)
    }
}

/// Translate a 1-based `(page, limit)` pair into a zero-based offset.
pub fn to_offset(page: i64, limit: i64) -> Result<u64, PaginationError> {
    PageRequest::new(page, limit).map(|window| window.offset())
}

/// `ceil(total_count / limit)`, and zero for an empty collection.
pub fn compute_total_pages(total_count: u64, limit: u32) -> u64 {
    if total_count == 0 || limit == 0 {
        return 0;
    }
    total_count.div_ceil(u64::from(limit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_starts_at_zero() {
        assert_eq!(to_offset(1, 10), Ok(0));
        assert_eq!(to_offset(2, 10), Ok(10));
        assert_eq!(to_offset(5, 3), Ok(12));
    }

    #[test]
    fn non_positive_page_is_rejected() {
        assert_eq!(to_offset(0, 10), Err(PaginationError::InvalidPage(0)));
        assert_eq!(to_offset(-4, 10), Err(PaginationError::InvalidPage(-4)));
    }

    #[test]
    fn non_positive_limit_is_rejected() {
        assert_eq!(to_offset(1, 0), Err(PaginationError::InvalidLimit(0)));
        assert_eq!(to_offset(1, -1), Err(PaginationError::InvalidLimit(-1)));
    }

    #[test]
    fn oversized_values_are_rejected_instead_of_truncated() {
        let too_big = i64::from(u32::MAX) + 1;
        assert_eq!(to_offset(too_big, 10), Err(PaginationError::InvalidPage(too_big)));
        assert_eq!(to_offset(1, too_big), Err(PaginationError::InvalidLimit(too_big)));
    }

    #[test]
    fn offset_of_largest_window_does_not_overflow() {
        let max = i64::from(u32::MAX);
        let expected = (u64::from(u32::MAX) - 1) * u64::from(u32::MAX);
        assert_eq!(to_offset(max, max), Ok(expected));
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(compute_total_pages(0, 10), 0);
        assert_eq!(compute_total_pages(1, 10), 1);
        assert_eq!(compute_total_pages(10, 10), 1);
        assert_eq!(compute_total_pages(11, 10), 2);
        assert_eq!(compute_total_pages(3, 1), 3);
    }
}
