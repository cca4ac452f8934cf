use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::orders::{CreateOrderRequest, OrderList, UpdateOrderStatusRequest},
    entity::{
        menu_items::Entity as MenuItems,
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, LineItems,
                 Model as OrderModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, authorize},
    models::{Department, ItemType, Order, OrderLineItem, OrderStatus, Role},
    response::{ApiResponse, Meta},
    state::AppState,
    status,
};

/// Overall statuses a department queue cares about. Orders past `preparing`
/// have left the queue.
const ACTIVE_STATUSES: [OrderStatus; 3] = [
    OrderStatus::Pending,
    OrderStatus::Confirmed,
    OrderStatus::Preparing,
];

pub async fn create_order(
    state: &AppState,
    user: &AuthUser,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<Order>> {
    authorize(user, &[Role::Waitress, Role::Administrator])?;

    if payload.items.is_empty() {
        return Err(AppError::BadRequest(
            "Order must contain at least one item".into(),
        ));
    }

    // Snapshot name, type and the current price of every referenced menu
    // item. A missing menu item rejects the whole order: all items or none.
    let mut line_items: Vec<OrderLineItem> = Vec::with_capacity(payload.items.len());
    for requested in &payload.items {
        if requested.quantity < 1 {
            return Err(AppError::BadRequest("Quantity must be at least 1".into()));
        }
        let menu_item = MenuItems::find_by_id(requested.menu_item_id)
            .one(&state.orm)
            .await?
            .ok_or(AppError::NotFound("Menu item"))?;

        line_items.push(OrderLineItem {
            menu_item_id: menu_item.id,
            menu_item_name: menu_item.name,
            quantity: requested.quantity,
            unit_price: menu_item.price,
            item_type: menu_item.item_type,
            special_instructions: requested.special_instructions.clone(),
        });
    }

    let total_amount: Decimal = line_items
        .iter()
        .map(|item| item.unit_price * Decimal::from(item.quantity))
        .sum();
    let has_food_items = line_items.iter().any(|i| i.item_type == ItemType::Food);
    let has_drink_items = line_items.iter().any(|i| i.item_type == ItemType::Drink);

    let now = Utc::now();
    let active = OrderActive {
        id: Set(Uuid::new_v4()),
        table_number: Set(payload.table_number),
        waitress_id: Set(user.user_id),
        waitress_name: Set(user.full_name.clone()),
        items: Set(LineItems(line_items)),
        total_amount: Set(total_amount),
        overall_status: Set(OrderStatus::Pending),
        kitchen_status: Set(status::initial_sub_status(has_food_items)),
        bar_status: Set(status::initial_sub_status(has_drink_items)),
        has_food_items: Set(has_food_items),
        has_drink_items: Set(has_drink_items),
        special_notes: Set(payload.special_notes),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };
    let order = active.insert(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "order_create",
        Some("orders"),
        Some(serde_json::json!({ "order_id": order.id, "table": order.table_number })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Order created",
        order_from_entity(order),
        Some(Meta::empty()),
    ))
}

/// Waitresses see their own orders; kitchen, bar and administrators see all.
/// Newest first.
pub async fn list_orders(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<OrderList>> {
    let mut finder = Orders::find();
    if user.role == Role::Waitress {
        finder = finder.filter(OrderCol::WaitressId.eq(user.user_id));
    }

    let items = finder
        .order_by_desc(OrderCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Orders",
        OrderList { items },
        Some(Meta::empty()),
    ))
}

pub async fn get_order(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Order>> {
    let order = Orders::find_by_id(id).one(&state.orm).await?;
    match order {
        Some(o) => Ok(ApiResponse::success(
            "Order",
            order_from_entity(o),
            Some(Meta::empty()),
        )),
        None => Err(AppError::NotFound("Order")),
    }
}

pub async fn list_by_table(
    state: &AppState,
    table_number: i32,
) -> AppResult<ApiResponse<OrderList>> {
    let items = Orders::find()
        .filter(OrderCol::TableNumber.eq(table_number))
        .order_by_desc(OrderCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Orders",
        OrderList { items },
        Some(Meta::empty()),
    ))
}

/// Department work queue: active orders projected down to the items this
/// department prepares. Orders with nothing for the department are dropped
/// entirely. Oldest first, so the queue is served FIFO.
pub async fn list_for_department(
    state: &AppState,
    user: &AuthUser,
    department: Department,
) -> AppResult<ApiResponse<OrderList>> {
    match department {
        Department::Kitchen => authorize(user, &[Role::Kitchen, Role::Administrator])?,
        Department::Bar => authorize(user, &[Role::Bartender, Role::Administrator])?,
    }

    let wanted = department.item_type();
    let items = Orders::find()
        .filter(OrderCol::OverallStatus.is_in(ACTIVE_STATUSES))
        .order_by_asc(OrderCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_from_entity)
        .filter_map(|mut order| {
            order.items.retain(|item| item.item_type == wanted);
            if order.items.is_empty() {
                None
            } else {
                Some(order)
            }
        })
        .collect();

    Ok(ApiResponse::success(
        "Orders",
        OrderList { items },
        Some(Meta::empty()),
    ))
}

/// Status report. Kitchen and bar each mutate only their own sub-status and
/// the overall status is re-derived; an administrator sets the overall
/// status directly, bypassing reconciliation and leaving sub-statuses
/// untouched.
pub async fn update_status(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<Order>> {
    authorize(
        user,
        &[Role::Kitchen, Role::Bartender, Role::Administrator],
    )?;

    let existing = Orders::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(o) => o,
        None => return Err(AppError::NotFound("Order")),
    };

    let mut active: OrderActive = existing.clone().into();
    match user.role.department() {
        None => {
            // Administrator override.
            active.overall_status = Set(payload.status);
        }
        Some(department) => {
            let (kitchen_status, bar_status, overall) = status::apply_department_update(
                department,
                payload.status,
                existing.has_food_items,
                existing.has_drink_items,
                existing.kitchen_status,
                existing.bar_status,
            );
            active.kitchen_status = Set(kitchen_status);
            active.bar_status = Set(bar_status);
            active.overall_status = Set(overall);
        }
    }
    active.updated_at = Set(Utc::now().into());
    let order = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "order_status_update",
        Some("orders"),
        Some(serde_json::json!({
            "order_id": order.id,
            "status": payload.status,
            "overall_status": order.overall_status,
        })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Order status updated",
        order_from_entity(order),
        Some(Meta::empty()),
    ))
}

pub(crate) fn order_from_entity(model: OrderModel) -> Order {
    Order {
        id: model.id,
        table_number: model.table_number,
        waitress_id: model.waitress_id,
        waitress_name: model.waitress_name,
        items: model.items.0,
        total_amount: model.total_amount,
        overall_status: model.overall_status,
        kitchen_status: model.kitchen_status,
        bar_status: model.bar_status,
        has_food_items: model.has_food_items,
        has_drink_items: model.has_drink_items,
        special_notes: model.special_notes,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
