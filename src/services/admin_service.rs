use chrono::{DateTime, Duration, NaiveDate, Utc};
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    dto::orders::OrderList,
    entity::orders::{Column as OrderCol, Entity as Orders},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::OrderStatus,
    response::{ApiResponse, Meta},
    routes::params::{AdminOrderQuery, SortOrder},
    services::order_service::order_from_entity,
    state::AppState,
};

/// Admin order history. Defaults to the last 24 hours without served
/// orders; an explicit date range takes precedence over `hours_back`.
pub async fn list_all_orders(
    state: &AppState,
    user: &AuthUser,
    query: AdminOrderQuery,
) -> AppResult<ApiResponse<OrderList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();

    let from = query.from_date.as_deref().map(parse_date).transpose()?;
    let to = query.to_date.as_deref().map(parse_date).transpose()?;
    if from.is_some() || to.is_some() {
        if let Some(from) = from {
            condition = condition.add(OrderCol::CreatedAt.gte(from));
        }
        if let Some(to) = to {
            // Upper bound is exclusive of the following midnight so the whole
            // end day is included.
            condition = condition.add(OrderCol::CreatedAt.lt(to + Duration::days(1)));
        }
    } else {
        let hours_back = query.hours_back.unwrap_or(24);
        condition = condition.add(OrderCol::CreatedAt.gte(Utc::now() - Duration::hours(hours_back)));
    }

    if !query.include_served.unwrap_or(false) {
        condition = condition.add(OrderCol::OverallStatus.ne(OrderStatus::Served));
    }

    let mut finder = Orders::find().filter(condition);
    finder = match query.sort_order.unwrap_or(SortOrder::Desc) {
        SortOrder::Asc => finder.order_by_asc(OrderCol::CreatedAt),
        SortOrder::Desc => finder.order_by_desc(OrderCol::CreatedAt),
    };

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Orders", OrderList { items }, Some(meta)))
}

fn parse_date(input: &str) -> AppResult<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| AppError::InvalidDateFormat(input.to_string()))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| AppError::InvalidDateFormat(input.to_string()))?;
    Ok(midnight.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates() {
        let parsed = parse_date("2024-03-01").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-03-01T00:00:00+00:00");
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(matches!(
            parse_date("03/01/2024"),
            Err(AppError::InvalidDateFormat(_))
        ));
        assert!(matches!(
            parse_date("2024-13-40"),
            Err(AppError::InvalidDateFormat(_))
        ));
    }
}
