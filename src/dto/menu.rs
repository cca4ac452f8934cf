use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{ItemType, MenuItemView};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateMenuItemRequest {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category_id: Uuid,
    /// Defaults to the category department's item type when omitted.
    pub item_type: Option<ItemType>,
    pub available: Option<bool>,
    pub on_stop_list: Option<bool>,
    pub bottle_available: Option<bool>,
    pub bottle_price: Option<Decimal>,
}

/// Partial update; omitted fields keep their stored value.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateMenuItemRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category_id: Option<Uuid>,
    pub item_type: Option<ItemType>,
    pub available: Option<bool>,
    pub on_stop_list: Option<bool>,
    pub bottle_available: Option<bool>,
    /// Omitting this keeps the stored bottle price. It cannot be cleared on
    /// its own: send `bottle_available: false`, which drops the price with
    /// the option.
    pub bottle_price: Option<Decimal>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AvailabilityRequest {
    pub available: Option<bool>,
    pub on_stop_list: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct MenuList {
    #[schema(value_type = Vec<MenuItemView>)]
    pub items: Vec<MenuItemView>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MenuStats {
    pub total_items: i64,
    pub available_items: i64,
    pub hidden_items: i64,
    pub by_category: BTreeMap<String, i64>,
}
