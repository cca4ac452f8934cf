use sea_orm::{ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter};

use crate::{
    dto::dashboard::DashboardStats,
    entity::{
        categories::{Column as CategoryCol, Entity as Categories},
        menu_items::{Column as MenuItemCol, Entity as MenuItems},
        orders::{Column as OrderCol, Entity as Orders},
        users::Entity as Users,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::{OrderStatus, Role},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn get_stats(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<DashboardStats>> {
    // Waitresses only see their own workload; every other role sees the room.
    let base = if user.role == Role::Waitress {
        Condition::all().add(OrderCol::WaitressId.eq(user.user_id))
    } else {
        Condition::all()
    };

    let total_orders = Orders::find()
        .filter(base.clone())
        .count(&state.orm)
        .await? as i64;

    let mut by_status = [0i64; 4];
    for (slot, status) in by_status.iter_mut().zip([
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
    ]) {
        *slot = Orders::find()
            .filter(base.clone().add(OrderCol::OverallStatus.eq(status)))
            .count(&state.orm)
            .await? as i64;
    }

    let mut stats = DashboardStats {
        total_orders,
        pending_orders: by_status[0],
        confirmed_orders: by_status[1],
        preparing_orders: by_status[2],
        ready_orders: by_status[3],
        total_users: None,
        total_categories: None,
        total_menu_items: None,
    };

    if user.role == Role::Administrator {
        stats.total_users = Some(Users::find().count(&state.orm).await? as i64);
        stats.total_categories = Some(
            Categories::find()
                .filter(CategoryCol::IsActive.eq(true))
                .count(&state.orm)
                .await? as i64,
        );
        stats.total_menu_items = Some(
            MenuItems::find()
                .filter(MenuItemCol::Available.eq(true))
                .count(&state.orm)
                .await? as i64,
        );
    }

    Ok(ApiResponse::success(
        "Dashboard stats",
        stats,
        Some(Meta::empty()),
    ))
}
