pub mod admin_service;
pub mod auth_service;
pub mod category_service;
pub mod dashboard_service;
pub mod menu_service;
pub mod order_service;
pub mod user_service;
