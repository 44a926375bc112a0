use serde::{Deserialize, Serialize};

const DEFAULT_PAGE_SIZE: i64 = 10;
const MAX_PAGE_SIZE: i64 = 100;

/// Page-number pagination: `?page=2&page_size=25`, with `get_all=true`
/// bypassing pagination entirely.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub get_all: Option<bool>,
}

impl PageParams {
    /// LIMIT/OFFSET for the requested page, or `None` when the caller asked
    /// for everything.
    pub fn limit_offset(&self) -> Option<(i64, i64)> {
        if self.get_all.unwrap_or(false) {
            return None;
        }
        let page_size = self
            .page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        let page = self.page.unwrap_or(1).max(1);
        Some((page_size, (page - 1) * page_size))
    }
}

#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub count: i64,
    pub results: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page_of_ten() {
        let params = PageParams::default();
        assert_eq!(params.limit_offset(), Some((10, 0)));
    }

    #[test]
    fn computes_offset_from_page_number() {
        let params = PageParams {
            page: Some(3),
            page_size: Some(25),
            get_all: None,
        };
        assert_eq!(params.limit_offset(), Some((25, 50)));
    }

    #[test]
    fn clamps_page_size_and_page() {
        let params = PageParams {
            page: Some(0),
            page_size: Some(1000),
            get_all: None,
        };
        assert_eq!(params.limit_offset(), Some((100, 0)));
    }

    #[test]
    fn get_all_disables_pagination() {
        let params = PageParams {
            page: Some(5),
            page_size: Some(10),
            get_all: Some(true),
        };
        assert_eq!(params.limit_offset(), None);
    }
}
