use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{OrderLineItem, OrderStatus};

/// Line item snapshots stored as one JSON column, so the whole order is a
/// single document written in one atomic insert.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct LineItems(pub Vec<OrderLineItem>);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub table_number: i32,
    pub waitress_id: Uuid,
    pub waitress_name: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub items: LineItems,
    pub total_amount: Decimal,
    pub overall_status: OrderStatus,
    pub kitchen_status: OrderStatus,
    pub bar_status: OrderStatus,
    pub has_food_items: bool,
    pub has_drink_items: bool,
    pub special_notes: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::WaitressId",
        to = "super::users::Column::Id"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemType;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    // The items column is stored as a plain JSON array of line items.
    #[test]
    fn line_items_round_trip_through_json() {
        let items = LineItems(vec![OrderLineItem {
            menu_item_id: Uuid::new_v4(),
            menu_item_name: "Mojito".into(),
            quantity: 2,
            unit_price: dec!(7.50),
            item_type: ItemType::Drink,
            special_instructions: None,
        }]);

        let json = serde_json::to_value(&items).unwrap();
        assert!(json.is_array());
        let back: LineItems = serde_json::from_value(json).unwrap();
        assert_eq!(back, items);
    }
}
