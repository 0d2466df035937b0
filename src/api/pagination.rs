use serde::Serialize;

/// Pagination block attached to every list view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let limit = limit.max(1);
        // ceil(total / limit), never below 1 so page math stays sane on
        // empty result sets
        let total_pages = ((total + limit - 1) / limit).max(1);

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

/// Normalize caller-supplied page/limit: page is 1-based, limit is clamped
/// between 1 and the configured cap.
pub fn page_params(page: Option<i64>, limit: Option<i64>, default_limit: i64, max_limit: i64) -> (i64, i64) {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(default_limit).clamp(1, max_limit);
    (page, limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_of_twenty_five() {
        let p = Pagination::new(1, 10, 25);
        assert_eq!(p.total_pages, 3);
        assert!(p.has_next);
        assert!(!p.has_prev);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn last_page_of_twenty_five() {
        let p = Pagination::new(3, 10, 25);
        assert_eq!(p.total_pages, 3);
        assert!(!p.has_next);
        assert!(p.has_prev);
        assert_eq!(p.offset(), 20);
    }

    #[test]
    fn empty_result_set_still_has_one_page() {
        let p = Pagination::new(1, 10, 0);
        assert_eq!(p.total_pages, 1);
        assert!(!p.has_next);
        assert!(!p.has_prev);
    }

    #[test]
    fn exact_multiple_has_no_phantom_page() {
        let p = Pagination::new(2, 10, 20);
        assert_eq!(p.total_pages, 2);
        assert!(!p.has_next);
    }

    #[test]
    fn params_clamp_to_bounds() {
        assert_eq!(page_params(None, None, 12, 100), (1, 12));
        assert_eq!(page_params(Some(0), Some(500), 12, 100), (1, 100));
        assert_eq!(page_params(Some(-3), Some(0), 12, 100), (1, 1));
    }
}
