use axum_restaurant_api::{
    db::{create_orm_conn, create_pool, run_migrations},
    dto::{
        categories::CreateCategoryRequest,
        menu::{AvailabilityRequest, CreateMenuItemRequest},
        orders::{CreateOrderItem, CreateOrderRequest, UpdateOrderStatusRequest},
    },
    entity::users::ActiveModel as UserActive,
    error::AppError,
    middleware::auth::AuthUser,
    models::{Department, OrderStatus, Role},
    routes::params::AdminOrderQuery,
    services::{
        admin_service, category_service, dashboard_service, menu_service, order_service,
    },
    state::AppState,
};
use chrono::Utc;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set, Statement};
use uuid::Uuid;

// Full lifecycle: admin builds the menu, a waitress places orders, kitchen
// and bar report independently and the overall status is reconciled.
#[tokio::test]
async fn menu_and_order_lifecycle() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let state = setup_state(&database_url).await?;

    let admin = create_user(&state, "admin", "Admin", Role::Administrator).await?;
    let waitress = create_user(&state, "waitress", "Waitress", Role::Waitress).await?;
    let kitchen = create_user(&state, "kitchen", "Kitchen", Role::Kitchen).await?;
    let bartender = create_user(&state, "bartender", "Bartender", Role::Bartender).await?;

    // Admin builds the catalog: a kitchen and a bar category with one item each.
    let food_category = category_service::create_category(
        &state,
        &admin,
        CreateCategoryRequest {
            name: "main_dishes".into(),
            display_name: "Main Dishes".into(),
            emoji: None,
            department: Some(Department::Kitchen),
            sort_order: Some(1),
            is_active: None,
        },
    )
    .await?
    .data
    .unwrap();

    let bar_category = category_service::create_category(
        &state,
        &admin,
        CreateCategoryRequest {
            name: "beverages".into(),
            display_name: "Beverages".into(),
            emoji: Some("🍹".into()),
            department: Some(Department::Bar),
            sort_order: Some(2),
            is_active: None,
        },
    )
    .await?
    .data
    .unwrap();

    let steak = menu_service::create_menu_item(
        &state,
        &admin,
        CreateMenuItemRequest {
            name: "Steak".into(),
            description: None,
            price: dec!(12.99),
            category_id: food_category.id,
            item_type: None,
            available: None,
            on_stop_list: None,
            bottle_available: None,
            bottle_price: None,
        },
    )
    .await?
    .data
    .unwrap();

    let mojito = menu_service::create_menu_item(
        &state,
        &admin,
        CreateMenuItemRequest {
            name: "Mojito".into(),
            description: None,
            price: dec!(5.00),
            category_id: bar_category.id,
            item_type: None,
            available: None,
            on_stop_list: None,
            bottle_available: None,
            bottle_price: None,
        },
    )
    .await?
    .data
    .unwrap();

    // Item type is inherited from the category's department.
    assert_eq!(steak.item_type, Department::Kitchen.item_type());
    assert_eq!(mojito.item_type, Department::Bar.item_type());

    // A category with menu items cannot be deleted.
    let err = category_service::delete_category(&state, &admin, food_category.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::HasDependents(_)));

    // Mixed order: 2x steak + 1x mojito.
    let order = order_service::create_order(
        &state,
        &waitress,
        CreateOrderRequest {
            table_number: 5,
            items: vec![
                CreateOrderItem {
                    menu_item_id: steak.id,
                    quantity: 2,
                    special_instructions: Some("medium rare".into()),
                },
                CreateOrderItem {
                    menu_item_id: mojito.id,
                    quantity: 1,
                    special_instructions: None,
                },
            ],
            special_notes: None,
        },
    )
    .await?
    .data
    .unwrap();

    assert_eq!(order.total_amount, dec!(30.98));
    assert!(order.has_food_items);
    assert!(order.has_drink_items);
    assert_eq!(order.overall_status, OrderStatus::Pending);
    assert_eq!(order.kitchen_status, OrderStatus::Pending);
    assert_eq!(order.bar_status, OrderStatus::Pending);

    // An unknown menu item rejects the whole order.
    let err = order_service::create_order(
        &state,
        &waitress,
        CreateOrderRequest {
            table_number: 5,
            items: vec![CreateOrderItem {
                menu_item_id: Uuid::new_v4(),
                quantity: 1,
                special_instructions: None,
            }],
            special_notes: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound("Menu item")));

    // Each department queue sees only its own items.
    let kitchen_view = order_service::list_for_department(&state, &kitchen, Department::Kitchen)
        .await?
        .data
        .unwrap();
    assert_eq!(kitchen_view.items.len(), 1);
    assert!(
        kitchen_view.items[0]
            .items
            .iter()
            .all(|i| i.menu_item_name == "Steak")
    );

    let bar_view = order_service::list_for_department(&state, &bartender, Department::Bar)
        .await?
        .data
        .unwrap();
    assert_eq!(bar_view.items.len(), 1);
    assert!(
        bar_view.items[0]
            .items
            .iter()
            .all(|i| i.menu_item_name == "Mojito")
    );

    // A waitress cannot work a department queue.
    let err = order_service::list_for_department(&state, &waitress, Department::Kitchen)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    // Bar finishes first: overall stays preparing until the kitchen catches up.
    let updated = order_service::update_status(
        &state,
        &bartender,
        order.id,
        UpdateOrderStatusRequest {
            status: OrderStatus::Ready,
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(updated.bar_status, OrderStatus::Ready);
    assert_eq!(updated.kitchen_status, OrderStatus::Pending);
    assert_eq!(updated.overall_status, OrderStatus::Preparing);

    let updated = order_service::update_status(
        &state,
        &kitchen,
        order.id,
        UpdateOrderStatusRequest {
            status: OrderStatus::Ready,
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(updated.overall_status, OrderStatus::Ready);

    // Both departments serve; overall follows.
    for dept_user in [&kitchen, &bartender] {
        order_service::update_status(
            &state,
            dept_user,
            order.id,
            UpdateOrderStatusRequest {
                status: OrderStatus::Served,
            },
        )
        .await?;
    }
    let served = order_service::get_order(&state, order.id)
        .await?
        .data
        .unwrap();
    assert_eq!(served.overall_status, OrderStatus::Served);

    // Drink-only order: the kitchen sub-status starts ready and the bar
    // drives the overall status directly.
    let drink_order = order_service::create_order(
        &state,
        &waitress,
        CreateOrderRequest {
            table_number: 7,
            items: vec![CreateOrderItem {
                menu_item_id: mojito.id,
                quantity: 2,
                special_instructions: None,
            }],
            special_notes: Some("birthday".into()),
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(drink_order.kitchen_status, OrderStatus::Ready);
    assert_eq!(drink_order.bar_status, OrderStatus::Pending);
    assert!(!drink_order.has_food_items);

    let updated = order_service::update_status(
        &state,
        &bartender,
        drink_order.id,
        UpdateOrderStatusRequest {
            status: OrderStatus::Preparing,
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(updated.overall_status, OrderStatus::Preparing);

    // Administrator override sets the overall status directly and leaves
    // sub-statuses alone.
    let overridden = order_service::update_status(
        &state,
        &admin,
        drink_order.id,
        UpdateOrderStatusRequest {
            status: OrderStatus::Served,
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(overridden.overall_status, OrderStatus::Served);
    assert_eq!(overridden.bar_status, OrderStatus::Preparing);

    // Table view shows both orders, newest first.
    let table_orders = order_service::list_by_table(&state, 5).await?.data.unwrap();
    assert_eq!(table_orders.items.len(), 1);
    let own_orders = order_service::list_orders(&state, &waitress)
        .await?
        .data
        .unwrap();
    assert_eq!(own_orders.items.len(), 2);

    // Hiding the mojito removes it from the staff menu.
    menu_service::set_availability(
        &state,
        &admin,
        mojito.id,
        AvailabilityRequest {
            available: None,
            on_stop_list: Some(true),
        },
    )
    .await?;
    let menu = menu_service::list_available(&state, Default::default())
        .await?
        .data
        .unwrap();
    assert!(menu.items.iter().all(|i| i.item.name != "Mojito"));

    let stats = menu_service::menu_stats(&state, &admin).await?.data.unwrap();
    assert_eq!(stats.total_items, 2);
    assert_eq!(stats.available_items, 1);
    assert_eq!(stats.hidden_items, 1);

    // Admin order history excludes served orders unless asked.
    let history = admin_service::list_all_orders(
        &state,
        &admin,
        AdminOrderQuery {
            page: Some(1),
            per_page: Some(20),
            hours_back: None,
            from_date: None,
            to_date: None,
            include_served: None,
            sort_order: None,
        },
    )
    .await?
    .data
    .unwrap();
    assert!(history.items.is_empty());

    let history = admin_service::list_all_orders(
        &state,
        &admin,
        AdminOrderQuery {
            page: Some(1),
            per_page: Some(20),
            hours_back: None,
            from_date: None,
            to_date: None,
            include_served: Some(true),
            sort_order: None,
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(history.items.len(), 2);

    // Dashboard: the waitress sees her own totals, the admin also gets
    // catalog counters.
    let stats = dashboard_service::get_stats(&state, &waitress)
        .await?
        .data
        .unwrap();
    assert_eq!(stats.total_orders, 2);
    assert!(stats.total_users.is_none());

    let stats = dashboard_service::get_stats(&state, &admin).await?.data.unwrap();
    assert_eq!(stats.total_orders, 2);
    assert_eq!(stats.total_users, Some(4));
    assert_eq!(stats.total_categories, Some(2));
    assert_eq!(stats.total_menu_items, Some(2));

    Ok(())
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let pool = create_pool(database_url).await?;
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;

    // Clean tables between runs
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE orders, menu_items, categories, audit_logs, users RESTART IDENTITY CASCADE",
    ))
    .await?;

    Ok(AppState {
        pool,
        orm,
        table_count: 20,
    })
}

async fn create_user(
    state: &AppState,
    username: &str,
    full_name: &str,
    role: Role,
) -> anyhow::Result<AuthUser> {
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        username: Set(username.to_string()),
        full_name: Set(full_name.to_string()),
        role: Set(role),
        password_hash: Set("dummy".into()),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;

    Ok(AuthUser {
        user_id: user.id,
        role: user.role,
        full_name: user.full_name,
    })
}
