use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::StringLen;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Closed role set. Unknown role strings fail deserialization instead of
/// being carried around as free-form text.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[sea_orm(string_value = "waitress")]
    Waitress,
    #[sea_orm(string_value = "kitchen")]
    Kitchen,
    #[sea_orm(string_value = "bartender")]
    Bartender,
    #[sea_orm(string_value = "administrator")]
    Administrator,
}

impl Role {
    /// The department a staff role reports status for, if any.
    pub fn department(&self) -> Option<Department> {
        match self {
            Role::Kitchen => Some(Department::Kitchen),
            Role::Bartender => Some(Department::Bar),
            Role::Waitress | Role::Administrator => None,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum Department {
    #[sea_orm(string_value = "kitchen")]
    Kitchen,
    #[sea_orm(string_value = "bar")]
    Bar,
}

impl Department {
    /// The line-item type this department prepares.
    pub fn item_type(&self) -> ItemType {
        match self {
            Department::Kitchen => ItemType::Food,
            Department::Bar => ItemType::Drink,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    #[sea_orm(string_value = "food")]
    Food,
    #[sea_orm(string_value = "drink")]
    Drink,
}

/// Order progress markers. `SentToKitchen`/`SentToBar` are per-department
/// intermediate values used on the sub-statuses; the overall status is
/// derived by the reconciliation logic in `status.rs`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    #[sea_orm(string_value = "sent_to_kitchen")]
    SentToKitchen,
    #[sea_orm(string_value = "sent_to_bar")]
    SentToBar,
    #[sea_orm(string_value = "preparing")]
    Preparing,
    #[sea_orm(string_value = "ready")]
    Ready,
    #[sea_orm(string_value = "served")]
    Served,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub display_name: String,
    pub emoji: String,
    pub department: Department,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MenuItem {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category_id: Uuid,
    pub item_type: ItemType,
    pub available: bool,
    pub on_stop_list: bool,
    pub bottle_available: bool,
    pub bottle_price: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Menu item joined with its category's display fields, as returned to
/// ordering staff and the management UI.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MenuItemView {
    #[serde(flatten)]
    pub item: MenuItem,
    pub category_name: String,
    pub category_display_name: String,
    pub category_emoji: String,
}

/// Denormalized snapshot of a menu item embedded in an order at creation
/// time. Later catalog edits never change these values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderLineItem {
    pub menu_item_id: Uuid,
    pub menu_item_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub item_type: ItemType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub table_number: i32,
    pub waitress_id: Uuid,
    pub waitress_name: String,
    pub items: Vec<OrderLineItem>,
    pub total_amount: Decimal,
    pub overall_status: OrderStatus,
    pub kitchen_status: OrderStatus,
    pub bar_status: OrderStatus,
    pub has_food_items: bool,
    pub has_drink_items: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_is_rejected() {
        assert!(serde_json::from_str::<OrderStatus>("\"shipped\"").is_err());
        assert!(serde_json::from_str::<Role>("\"manager\"").is_err());
    }

    #[test]
    fn statuses_round_trip_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::SentToKitchen).unwrap(),
            "\"sent_to_kitchen\""
        );
        assert_eq!(
            serde_json::from_str::<Role>("\"administrator\"").unwrap(),
            Role::Administrator
        );
    }

    #[test]
    fn role_departments() {
        assert_eq!(Role::Kitchen.department(), Some(Department::Kitchen));
        assert_eq!(Role::Bartender.department(), Some(Department::Bar));
        assert_eq!(Role::Waitress.department(), None);
        assert_eq!(Department::Bar.item_type(), ItemType::Drink);
    }
}
