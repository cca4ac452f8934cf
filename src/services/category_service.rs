use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::categories::{CategoryList, CreateCategoryRequest, UpdateCategoryRequest},
    entity::{
        categories::{ActiveModel as CategoryActive, Column as CategoryCol, Entity as Categories,
                     Model as CategoryModel},
        menu_items::{Column as MenuItemCol, Entity as MenuItems},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Category, Department},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_categories(
    state: &AppState,
    user: &AuthUser,
    include_inactive: bool,
) -> AppResult<ApiResponse<CategoryList>> {
    // Inactive categories are a management-only concern.
    if include_inactive {
        ensure_admin(user)?;
    }

    let mut finder = Categories::find();
    if !include_inactive {
        finder = finder.filter(CategoryCol::IsActive.eq(true));
    }

    let items = finder
        .order_by_asc(CategoryCol::SortOrder)
        .order_by_asc(CategoryCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(category_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Categories",
        CategoryList { items },
        Some(Meta::empty()),
    ))
}

pub async fn create_category(
    state: &AppState,
    user: &AuthUser,
    payload: CreateCategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    ensure_admin(user)?;

    ensure_name_free(state, &payload.name, None).await?;

    let active = CategoryActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        display_name: Set(payload.display_name),
        emoji: Set(payload.emoji.unwrap_or_default()),
        department: Set(payload.department.unwrap_or(Department::Kitchen)),
        sort_order: Set(payload.sort_order.unwrap_or(0)),
        is_active: Set(payload.is_active.unwrap_or(true)),
        created_at: Set(Utc::now().into()),
    };
    let category = active.insert(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "category_create",
        Some("categories"),
        Some(serde_json::json!({ "category_id": category.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Category created",
        category_from_entity(category),
        Some(Meta::empty()),
    ))
}

pub async fn update_category(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateCategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    ensure_admin(user)?;

    let existing = Categories::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(c) => c,
        None => return Err(AppError::NotFound("Category")),
    };

    if let Some(name) = payload.name.as_ref() {
        if *name != existing.name {
            ensure_name_free(state, name, Some(id)).await?;
        }
    }

    let mut active: CategoryActive = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(display_name) = payload.display_name {
        active.display_name = Set(display_name);
    }
    if let Some(emoji) = payload.emoji {
        active.emoji = Set(emoji);
    }
    if let Some(department) = payload.department {
        active.department = Set(department);
    }
    if let Some(sort_order) = payload.sort_order {
        active.sort_order = Set(sort_order);
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }
    let category = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "category_update",
        Some("categories"),
        Some(serde_json::json!({ "category_id": category.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Category updated",
        category_from_entity(category),
        Some(Meta::empty()),
    ))
}

pub async fn delete_category(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;

    let dependents = MenuItems::find()
        .filter(MenuItemCol::CategoryId.eq(id))
        .count(&state.orm)
        .await?;
    if dependents > 0 {
        return Err(AppError::HasDependents("Category"));
    }

    let result = Categories::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Category"));
    }

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "category_delete",
        Some("categories"),
        Some(serde_json::json!({ "category_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Category deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

async fn ensure_name_free(state: &AppState, name: &str, exclude: Option<Uuid>) -> AppResult<()> {
    let mut finder = Categories::find().filter(CategoryCol::Name.eq(name));
    if let Some(id) = exclude {
        finder = finder.filter(CategoryCol::Id.ne(id));
    }
    if finder.count(&state.orm).await? > 0 {
        return Err(AppError::DuplicateName(name.to_string()));
    }
    Ok(())
}

pub(crate) fn category_from_entity(model: CategoryModel) -> Category {
    Category {
        id: model.id,
        name: model.name,
        display_name: model.display_name,
        emoji: model.emoji,
        department: model.department,
        sort_order: model.sort_order,
        is_active: model.is_active,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
