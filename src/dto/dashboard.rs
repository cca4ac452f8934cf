use serde::Serialize;
use utoipa::ToSchema;

/// Live counters over actionable orders. `served` is deliberately excluded:
/// it represents completed, no-longer-actionable work. The `total_*` fields
/// are filled for administrators only.
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardStats {
    pub total_orders: i64,
    pub pending_orders: i64,
    pub confirmed_orders: i64,
    pub preparing_orders: i64,
    pub ready_orders: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_users: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_categories: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_menu_items: Option<i64>,
}
