use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{delete, get, patch, post, put},
};
use uuid::Uuid;

use crate::{
    dto::menu::{
        AvailabilityRequest, CreateMenuItemRequest, MenuList, MenuStats, UpdateMenuItemRequest,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::{MenuItem, MenuItemView},
    response::ApiResponse,
    routes::params::MenuQuery,
    services::menu_service::{self, MenuFilter},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_menu))
        .route("/", post(create_menu_item))
        .route("/all", get(list_menu_all))
        .route("/stats", get(menu_stats))
        .route("/{id}", get(get_menu_item))
        .route("/{id}", put(update_menu_item))
        .route("/{id}", delete(delete_menu_item))
        .route("/{id}/availability", patch(set_availability))
}

#[utoipa::path(
    get,
    path = "/api/menu",
    params(
        ("category_id" = Option<Uuid>, Query, description = "Filter by category"),
        ("item_type" = Option<String>, Query, description = "Filter by item type: food, drink"),
    ),
    responses(
        (status = 200, description = "Orderable menu items with category display fields", body = ApiResponse<MenuList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Menu"
)]
pub async fn list_menu(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<MenuQuery>,
) -> AppResult<Json<ApiResponse<MenuList>>> {
    let filter = MenuFilter {
        category_id: query.category_id,
        item_type: query.item_type,
    };
    let resp = menu_service::list_available(&state, filter).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/menu/all",
    responses(
        (status = 200, description = "All menu items, including hidden ones (admin only)", body = ApiResponse<MenuList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Menu"
)]
pub async fn list_menu_all(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<MenuList>>> {
    let resp = menu_service::list_all(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/menu/stats",
    responses(
        (status = 200, description = "Menu statistics (admin only)", body = ApiResponse<MenuStats>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Menu"
)]
pub async fn menu_stats(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<MenuStats>>> {
    let resp = menu_service::menu_stats(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/menu/{id}",
    params(("id" = Uuid, Path, description = "Menu item ID")),
    responses(
        (status = 200, description = "Menu item", body = ApiResponse<MenuItemView>),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Menu"
)]
pub async fn get_menu_item(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<MenuItemView>>> {
    let resp = menu_service::get_menu_item(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/menu",
    request_body = CreateMenuItemRequest,
    responses(
        (status = 200, description = "Create menu item (admin only)", body = ApiResponse<MenuItem>),
        (status = 400, description = "Category not found or invalid price"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Menu"
)]
pub async fn create_menu_item(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateMenuItemRequest>,
) -> AppResult<Json<ApiResponse<MenuItem>>> {
    let resp = menu_service::create_menu_item(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/menu/{id}",
    params(("id" = Uuid, Path, description = "Menu item ID")),
    request_body = UpdateMenuItemRequest,
    responses(
        (status = 200, description = "Update menu item (admin only)", body = ApiResponse<MenuItem>),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Menu"
)]
pub async fn update_menu_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateMenuItemRequest>,
) -> AppResult<Json<ApiResponse<MenuItem>>> {
    let resp = menu_service::update_menu_item(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/menu/{id}/availability",
    params(("id" = Uuid, Path, description = "Menu item ID")),
    request_body = AvailabilityRequest,
    responses(
        (status = 200, description = "Toggle availability / stop list (admin only)", body = ApiResponse<MenuItem>),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Menu"
)]
pub async fn set_availability(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AvailabilityRequest>,
) -> AppResult<Json<ApiResponse<MenuItem>>> {
    let resp = menu_service::set_availability(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/menu/{id}",
    params(("id" = Uuid, Path, description = "Menu item ID")),
    responses(
        (status = 200, description = "Delete menu item (admin only)"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Menu"
)]
pub async fn delete_menu_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = menu_service::delete_menu_item(&state, &user, id).await?;
    Ok(Json(resp))
}
