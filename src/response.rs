use crate::serde::Serialize;

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
    pub has_more: bool,
}

impl Pagination {
    pub fn new(total: i64, page: i64, limit: i64) -> Self {
        let total_pages = if limit > 0 { (total + limit - 1) / limit } else { 0 };
        Pagination {
            total,
            page,
            limit,
            total_pages,
            has_more: page < total_pages,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct List<T> {
    list: Vec<T>,
    pagination: Pagination,
}

impl<T> List<T> {
    pub fn new(list: Vec<T>, pagination: Pagination) -> Self {
        List { list, pagination }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn pagination_math() {
        assert_eq!(Pagination::new(0, 1, 10).total_pages, 0);
        assert!(!Pagination::new(0, 1, 10).has_more);
        assert_eq!(Pagination::new(25, 1, 10).total_pages, 3);
        assert!(Pagination::new(25, 1, 10).has_more);
        assert!(Pagination::new(25, 2, 10).has_more);
        assert!(!Pagination::new(25, 3, 10).has_more);
        assert_eq!(Pagination::new(30, 3, 10).total_pages, 3);
        assert!(!Pagination::new(30, 3, 10).has_more);
    }

    #[test]
    fn pagination_serializes_camel_case() {
        let value = serde_json::to_value(Pagination::new(25, 1, 10)).unwrap();
        assert_eq!(value["totalPages"], 3);
        assert_eq!(value["hasMore"], true);
    }
}
