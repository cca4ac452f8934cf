use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::ItemType;

/// Normalized pagination window. Query structs carry `page`/`per_page`
/// inline (serde's flatten does not survive axum's query deserializer for
/// numeric fields) and build this helper from them.
#[derive(Debug)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;
        (page, per_page, offset)
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct MenuQuery {
    pub category_id: Option<Uuid>,
    pub item_type: Option<ItemType>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CategoryQuery {
    pub include_inactive: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AdminOrderQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    /// Window back from now; ignored when an explicit date range is given.
    pub hours_back: Option<i64>,
    /// Inclusive start date, `YYYY-MM-DD`.
    pub from_date: Option<String>,
    /// Inclusive end date, `YYYY-MM-DD`.
    pub to_date: Option<String>,
    pub include_served: Option<bool>,
    pub sort_order: Option<SortOrder>,
}

impl AdminOrderQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::Uri;

    #[test]
    fn pagination_normalizes_out_of_range_input() {
        let p = Pagination {
            page: Some(0),
            per_page: Some(1000),
        };
        assert_eq!(p.normalize(), (1, 100, 0));

        let p = Pagination {
            page: None,
            per_page: None,
        };
        assert_eq!(p.normalize(), (1, 20, 0));
    }

    #[test]
    fn admin_query_parses_explicit_pagination() {
        let uri: Uri = "/api/admin/orders?page=2&per_page=10&include_served=true"
            .parse()
            .unwrap();
        let Query(query) = Query::<AdminOrderQuery>::try_from_uri(&uri).unwrap();
        assert_eq!(query.pagination().normalize(), (2, 10, 10));
        assert_eq!(query.include_served, Some(true));
    }

    #[test]
    fn admin_query_defaults_when_params_omitted() {
        let uri: Uri = "/api/admin/orders".parse().unwrap();
        let Query(query) = Query::<AdminOrderQuery>::try_from_uri(&uri).unwrap();
        assert_eq!(query.pagination().normalize(), (1, 20, 0));
        assert!(query.hours_back.is_none());
    }
}
