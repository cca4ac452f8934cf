use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Order, OrderStatus};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub table_number: i32,
    pub items: Vec<CreateOrderItem>,
    pub special_notes: Option<String>,
}

/// One requested line: the menu item is resolved server-side and its name,
/// type and current price are snapshotted onto the order.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderItem {
    pub menu_item_id: Uuid,
    pub quantity: i32,
    pub special_instructions: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct OrderList {
    #[schema(value_type = Vec<Order>)]
    pub items: Vec<Order>,
}
