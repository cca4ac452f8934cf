use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    middleware::auth::AuthUser,
    response::{ApiResponse, Meta},
    state::AppState,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct TableList {
    pub tables: Vec<i32>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_tables))
}

#[utoipa::path(
    get,
    path = "/api/tables",
    responses(
        (status = 200, description = "Available table numbers", body = ApiResponse<TableList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Tables"
)]
pub async fn list_tables(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<TableList>>> {
    let data = TableList {
        tables: (1..=state.table_count).collect(),
    };
    Ok(Json(ApiResponse::success("Tables", data, Some(Meta::empty()))))
}
