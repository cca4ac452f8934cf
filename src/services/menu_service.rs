use std::collections::BTreeMap;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::menu::{
        AvailabilityRequest, CreateMenuItemRequest, MenuList, MenuStats, UpdateMenuItemRequest,
    },
    entity::{
        categories::{Column as CategoryCol, Entity as Categories, Model as CategoryModel},
        menu_items::{ActiveModel as MenuItemActive, Column as MenuItemCol, Entity as MenuItems,
                     Model as MenuItemModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{ItemType, MenuItem, MenuItemView},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Optional filters for the staff-facing menu view.
#[derive(Debug, Default)]
pub struct MenuFilter {
    pub category_id: Option<Uuid>,
    pub item_type: Option<ItemType>,
}

pub async fn list_available(
    state: &AppState,
    filter: MenuFilter,
) -> AppResult<ApiResponse<MenuList>> {
    let mut finder = MenuItems::find()
        .find_also_related(Categories)
        .filter(MenuItemCol::Available.eq(true))
        .filter(MenuItemCol::OnStopList.eq(false))
        .filter(CategoryCol::IsActive.eq(true));

    if let Some(category_id) = filter.category_id {
        finder = finder.filter(MenuItemCol::CategoryId.eq(category_id));
    }
    if let Some(item_type) = filter.item_type {
        finder = finder.filter(MenuItemCol::ItemType.eq(item_type));
    }

    let items = finder
        .order_by_asc(CategoryCol::SortOrder)
        .order_by_asc(MenuItemCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .filter_map(|(item, category)| category.map(|c| view_from_entities(item, c)))
        .collect();

    Ok(ApiResponse::success(
        "Menu",
        MenuList { items },
        Some(Meta::empty()),
    ))
}

/// Unfiltered joined listing for the management UI.
pub async fn list_all(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<MenuList>> {
    ensure_admin(user)?;

    let items = MenuItems::find()
        .find_also_related(Categories)
        .order_by_asc(CategoryCol::SortOrder)
        .order_by_asc(MenuItemCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .filter_map(|(item, category)| category.map(|c| view_from_entities(item, c)))
        .collect();

    Ok(ApiResponse::success(
        "Menu (all items)",
        MenuList { items },
        Some(Meta::empty()),
    ))
}

pub async fn get_menu_item(state: &AppState, id: Uuid) -> AppResult<ApiResponse<MenuItemView>> {
    let found = MenuItems::find_by_id(id)
        .find_also_related(Categories)
        .one(&state.orm)
        .await?;

    match found {
        Some((item, Some(category))) => Ok(ApiResponse::success(
            "Menu item",
            view_from_entities(item, category),
            Some(Meta::empty()),
        )),
        _ => Err(AppError::NotFound("Menu item")),
    }
}

pub async fn menu_stats(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<MenuStats>> {
    ensure_admin(user)?;

    let rows = MenuItems::find()
        .find_also_related(Categories)
        .all(&state.orm)
        .await?;

    let total_items = rows.len() as i64;
    let available_items = rows
        .iter()
        .filter(|(item, _)| item.available && !item.on_stop_list)
        .count() as i64;

    let mut by_category: BTreeMap<String, i64> = BTreeMap::new();
    for (_, category) in &rows {
        if let Some(category) = category {
            *by_category.entry(category.name.clone()).or_default() += 1;
        }
    }

    let stats = MenuStats {
        total_items,
        available_items,
        hidden_items: total_items - available_items,
        by_category,
    };

    Ok(ApiResponse::success("Menu stats", stats, Some(Meta::empty())))
}

pub async fn create_menu_item(
    state: &AppState,
    user: &AuthUser,
    payload: CreateMenuItemRequest,
) -> AppResult<ApiResponse<MenuItem>> {
    ensure_admin(user)?;

    if payload.price <= Decimal::ZERO {
        return Err(AppError::BadRequest("Price must be positive".into()));
    }

    let category = Categories::find_by_id(payload.category_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::CategoryNotFound)?;

    let item_type = payload
        .item_type
        .unwrap_or_else(|| category.department.item_type());
    let (bottle_available, bottle_price) = normalize_bottle_fields(
        item_type,
        payload.bottle_available.unwrap_or(false),
        payload.bottle_price,
    )?;

    let now = Utc::now();
    let active = MenuItemActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        description: Set(payload.description),
        price: Set(payload.price),
        category_id: Set(category.id),
        item_type: Set(item_type),
        available: Set(payload.available.unwrap_or(true)),
        on_stop_list: Set(payload.on_stop_list.unwrap_or(false)),
        bottle_available: Set(bottle_available),
        bottle_price: Set(bottle_price),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };
    let item = active.insert(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "menu_item_create",
        Some("menu_items"),
        Some(serde_json::json!({ "menu_item_id": item.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Menu item created",
        menu_item_from_entity(item),
        Some(Meta::empty()),
    ))
}

pub async fn update_menu_item(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateMenuItemRequest,
) -> AppResult<ApiResponse<MenuItem>> {
    ensure_admin(user)?;

    let existing = MenuItems::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(i) => i,
        None => return Err(AppError::NotFound("Menu item")),
    };

    if let Some(category_id) = payload.category_id {
        let exists = Categories::find_by_id(category_id).one(&state.orm).await?;
        if exists.is_none() {
            return Err(AppError::CategoryNotFound);
        }
    }
    if let Some(price) = payload.price {
        if price <= Decimal::ZERO {
            return Err(AppError::BadRequest("Price must be positive".into()));
        }
    }

    let item_type = payload.item_type.unwrap_or(existing.item_type);
    let (bottle_available, bottle_price) = normalize_bottle_fields(
        item_type,
        payload.bottle_available.unwrap_or(existing.bottle_available),
        payload.bottle_price.or(existing.bottle_price),
    )?;

    let mut active: MenuItemActive = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    if let Some(price) = payload.price {
        active.price = Set(price);
    }
    if let Some(category_id) = payload.category_id {
        active.category_id = Set(category_id);
    }
    if let Some(available) = payload.available {
        active.available = Set(available);
    }
    if let Some(on_stop_list) = payload.on_stop_list {
        active.on_stop_list = Set(on_stop_list);
    }
    active.item_type = Set(item_type);
    active.bottle_available = Set(bottle_available);
    active.bottle_price = Set(bottle_price);
    active.updated_at = Set(Utc::now().into());

    let item = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "menu_item_update",
        Some("menu_items"),
        Some(serde_json::json!({ "menu_item_id": item.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Menu item updated",
        menu_item_from_entity(item),
        Some(Meta::empty()),
    ))
}

/// Toggle visibility flags (stop list, availability) without touching the
/// rest of the item.
pub async fn set_availability(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: AvailabilityRequest,
) -> AppResult<ApiResponse<MenuItem>> {
    ensure_admin(user)?;

    let existing = MenuItems::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(i) => i,
        None => return Err(AppError::NotFound("Menu item")),
    };

    let mut active: MenuItemActive = existing.into();
    if let Some(available) = payload.available {
        active.available = Set(available);
    }
    if let Some(on_stop_list) = payload.on_stop_list {
        active.on_stop_list = Set(on_stop_list);
    }
    active.updated_at = Set(Utc::now().into());
    let item = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "menu_item_availability",
        Some("menu_items"),
        Some(serde_json::json!({
            "menu_item_id": item.id,
            "available": item.available,
            "on_stop_list": item.on_stop_list,
        })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Availability updated",
        menu_item_from_entity(item),
        Some(Meta::empty()),
    ))
}

pub async fn delete_menu_item(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;

    let result = MenuItems::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Menu item"));
    }

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "menu_item_delete",
        Some("menu_items"),
        Some(serde_json::json!({ "menu_item_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Menu item deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

/// Bottle options only make sense for drinks. Food items get them silently
/// zeroed regardless of input; drinks marked bottle-available must carry a
/// positive bottle price.
fn normalize_bottle_fields(
    item_type: ItemType,
    bottle_available: bool,
    bottle_price: Option<Decimal>,
) -> AppResult<(bool, Option<Decimal>)> {
    match item_type {
        ItemType::Food => Ok((false, None)),
        ItemType::Drink => {
            if !bottle_available {
                return Ok((false, None));
            }
            match bottle_price {
                Some(price) if price > Decimal::ZERO => Ok((true, Some(price))),
                _ => Err(AppError::BadRequest(
                    "bottle_price must be positive when bottle_available is set".into(),
                )),
            }
        }
    }
}

pub(crate) fn menu_item_from_entity(model: MenuItemModel) -> MenuItem {
    MenuItem {
        id: model.id,
        name: model.name,
        description: model.description,
        price: model.price,
        category_id: model.category_id,
        item_type: model.item_type,
        available: model.available,
        on_stop_list: model.on_stop_list,
        bottle_available: model.bottle_available,
        bottle_price: model.bottle_price,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

fn view_from_entities(item: MenuItemModel, category: CategoryModel) -> MenuItemView {
    MenuItemView {
        item: menu_item_from_entity(item),
        category_name: category.name,
        category_display_name: category.display_name,
        category_emoji: category.emoji,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn food_items_have_bottle_fields_zeroed() {
        let (available, price) =
            normalize_bottle_fields(ItemType::Food, true, Some(dec!(50.00))).unwrap();
        assert!(!available);
        assert_eq!(price, None);
    }

    #[test]
    fn drink_without_bottle_option_drops_price() {
        let (available, price) =
            normalize_bottle_fields(ItemType::Drink, false, Some(dec!(85.00))).unwrap();
        assert!(!available);
        assert_eq!(price, None);
    }

    // Update merges fall back to the stored bottle pair; the only way to
    // clear a price is to switch the bottle option off.
    #[test]
    fn turning_bottle_option_off_clears_stored_price() {
        let stored_price = Some(dec!(120.00));

        let (available, price) =
            normalize_bottle_fields(ItemType::Drink, true, stored_price).unwrap();
        assert!(available);
        assert_eq!(price, stored_price);

        let (available, price) =
            normalize_bottle_fields(ItemType::Drink, false, stored_price).unwrap();
        assert!(!available);
        assert_eq!(price, None);
    }

    #[test]
    fn bottle_drink_requires_positive_price() {
        assert!(normalize_bottle_fields(ItemType::Drink, true, None).is_err());
        assert!(normalize_bottle_fields(ItemType::Drink, true, Some(dec!(0))).is_err());

        let (available, price) =
            normalize_bottle_fields(ItemType::Drink, true, Some(dec!(180.00))).unwrap();
        assert!(available);
        assert_eq!(price, Some(dec!(180.00)));
    }
}
