//! Idempotent startup seed. A fresh install gets one user per role, the
//! default category set, and optionally a small demo menu. Existing rows are
//! never modified, so re-running on a populated database is a no-op.

use anyhow::Result;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use uuid::Uuid;

use crate::{
    config::BootstrapConfig,
    entity::{
        categories::{ActiveModel as CategoryActive, Column as CategoryCol, Entity as Categories},
        menu_items::{ActiveModel as MenuItemActive, Entity as MenuItems},
        users::{ActiveModel as UserActive, Column as UserCol, Entity as Users},
    },
    models::{Department, Role},
    services::user_service::hash_password,
    state::AppState,
};

pub async fn run(state: &AppState, config: &BootstrapConfig) -> Result<()> {
    seed_users(state, &config.default_password).await?;
    let categories = seed_categories(state).await?;
    if config.seed_demo_menu {
        seed_demo_menu(state, &categories).await?;
    }
    Ok(())
}

async fn seed_users(state: &AppState, default_password: &str) -> Result<()> {
    let defaults = [
        ("admin1", "Default Administrator", Role::Administrator),
        ("waitress1", "Default Waitress", Role::Waitress),
        ("kitchen1", "Default Kitchen", Role::Kitchen),
        ("bartender1", "Default Bartender", Role::Bartender),
    ];

    for (username, full_name, role) in defaults {
        let exists = Users::find()
            .filter(UserCol::Username.eq(username))
            .count(&state.orm)
            .await?
            > 0;
        if exists {
            continue;
        }

        let active = UserActive {
            id: Set(Uuid::new_v4()),
            username: Set(username.to_string()),
            full_name: Set(full_name.to_string()),
            role: Set(role),
            password_hash: Set(hash_password(default_password)
                .map_err(|e| anyhow::anyhow!("hash seed password: {e}"))?),
            created_at: Set(Utc::now().into()),
        };
        active.insert(&state.orm).await?;
        tracing::info!(username, ?role, "seeded default user");
    }

    Ok(())
}

struct SeedCategory {
    name: &'static str,
    display_name: &'static str,
    emoji: &'static str,
    department: Department,
    sort_order: i32,
}

const DEFAULT_CATEGORIES: [SeedCategory; 4] = [
    SeedCategory {
        name: "appetizers",
        display_name: "Appetizers",
        emoji: "🥗",
        department: Department::Kitchen,
        sort_order: 1,
    },
    SeedCategory {
        name: "main_dishes",
        display_name: "Main Dishes",
        emoji: "🍖",
        department: Department::Kitchen,
        sort_order: 2,
    },
    SeedCategory {
        name: "desserts",
        display_name: "Desserts",
        emoji: "🍰",
        department: Department::Kitchen,
        sort_order: 3,
    },
    SeedCategory {
        name: "beverages",
        display_name: "Beverages",
        emoji: "🍹",
        department: Department::Bar,
        sort_order: 4,
    },
];

/// Returns every default category, whether it already existed or was just
/// created.
async fn seed_categories(state: &AppState) -> Result<Vec<(String, Uuid, Department)>> {
    let mut seeded = Vec::with_capacity(DEFAULT_CATEGORIES.len());

    for seed in &DEFAULT_CATEGORIES {
        let existing = Categories::find()
            .filter(CategoryCol::Name.eq(seed.name))
            .one(&state.orm)
            .await?;
        if let Some(category) = existing {
            seeded.push((category.name, category.id, category.department));
            continue;
        }

        let active = CategoryActive {
            id: Set(Uuid::new_v4()),
            name: Set(seed.name.to_string()),
            display_name: Set(seed.display_name.to_string()),
            emoji: Set(seed.emoji.to_string()),
            department: Set(seed.department),
            sort_order: Set(seed.sort_order),
            is_active: Set(true),
            created_at: Set(Utc::now().into()),
        };
        let created = active.insert(&state.orm).await?;
        tracing::info!(name = seed.name, "seeded category");
        seeded.push((created.name, created.id, created.department));
    }

    Ok(seeded)
}

/// Only fires when the menu is completely empty, so operator edits are never
/// overwritten.
async fn seed_demo_menu(state: &AppState, categories: &[(String, Uuid, Department)]) -> Result<()> {
    if MenuItems::find().count(&state.orm).await? > 0 {
        return Ok(());
    }

    let demo: [(&str, i64, &str); 5] = [
        ("Caesar Salad", 899, "appetizers"),
        ("Grilled Steak", 2499, "main_dishes"),
        ("Cheesecake", 650, "desserts"),
        ("Mojito", 750, "beverages"),
        ("House Red Wine", 600, "beverages"),
    ];

    for (name, cents, category_name) in demo {
        let Some((_, category_id, department)) =
            categories.iter().find(|(n, _, _)| n == category_name)
        else {
            continue;
        };
        let item_type = department.item_type();
        let now = Utc::now();
        let active = MenuItemActive {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            description: Set(None),
            price: Set(Decimal::new(cents, 2)),
            category_id: Set(*category_id),
            item_type: Set(item_type),
            available: Set(true),
            on_stop_list: Set(false),
            bottle_available: Set(false),
            bottle_price: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        active.insert(&state.orm).await?;
    }
    tracing::info!("seeded demo menu");

    Ok(())
}
