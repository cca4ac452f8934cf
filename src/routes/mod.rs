use axum::Router;

use crate::state::AppState;

pub mod admin;
pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod doc;
pub mod health;
pub mod menu;
pub mod orders;
pub mod params;
pub mod tables;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/categories", categories::router())
        .nest("/menu", menu::router())
        .nest("/orders", orders::router())
        .nest("/admin", admin::router())
        .nest("/dashboard", dashboard::router())
        .nest("/tables", tables::router())
}
