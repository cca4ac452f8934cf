use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse},
        categories::{CategoryList, CreateCategoryRequest, UpdateCategoryRequest},
        dashboard::DashboardStats,
        menu::{
            AvailabilityRequest, CreateMenuItemRequest, MenuList, MenuStats, UpdateMenuItemRequest,
        },
        orders::{CreateOrderItem, CreateOrderRequest, OrderList, UpdateOrderStatusRequest},
        users::{CreateUserRequest, UpdateUserRequest, UserList},
    },
    models::{Category, MenuItem, MenuItemView, Order, OrderLineItem, User},
    response::{ApiResponse, Meta},
    routes::{admin, auth, categories, dashboard, health, menu, orders, tables},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        categories::list_categories,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        menu::list_menu,
        menu::list_menu_all,
        menu::menu_stats,
        menu::get_menu_item,
        menu::create_menu_item,
        menu::update_menu_item,
        menu::set_availability,
        menu::delete_menu_item,
        orders::create_order,
        orders::list_orders,
        orders::kitchen_orders,
        orders::bar_orders,
        orders::orders_by_table,
        orders::get_order,
        orders::update_order_status,
        admin::list_all_orders,
        admin::list_users,
        admin::create_user,
        admin::update_user,
        admin::delete_user,
        dashboard::stats,
        tables::list_tables
    ),
    components(
        schemas(
            User,
            Category,
            MenuItem,
            MenuItemView,
            Order,
            OrderLineItem,
            LoginRequest,
            LoginResponse,
            CreateCategoryRequest,
            UpdateCategoryRequest,
            CategoryList,
            CreateMenuItemRequest,
            UpdateMenuItemRequest,
            AvailabilityRequest,
            MenuList,
            MenuStats,
            CreateOrderRequest,
            CreateOrderItem,
            UpdateOrderStatusRequest,
            OrderList,
            CreateUserRequest,
            UpdateUserRequest,
            UserList,
            DashboardStats,
            tables::TableList,
            Meta,
            ApiResponse<Order>,
            ApiResponse<OrderList>,
            ApiResponse<MenuList>,
            ApiResponse<CategoryList>,
            ApiResponse<DashboardStats>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Categories", description = "Menu category endpoints"),
        (name = "Menu", description = "Menu item endpoints"),
        (name = "Orders", description = "Order lifecycle endpoints"),
        (name = "Admin", description = "Administrator endpoints"),
        (name = "Dashboard", description = "Role-aware statistics"),
        (name = "Tables", description = "Table picker endpoint"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
