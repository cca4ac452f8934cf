use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::users::{CreateUserRequest, UpdateUserRequest, UserList},
    entity::users::{ActiveModel as UserActive, Column as UserCol, Entity as Users,
                    Model as UserModel},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::User,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_users(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<UserList>> {
    ensure_admin(user)?;

    let items = Users::find()
        .order_by_asc(UserCol::Username)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(user_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Users",
        UserList { items },
        Some(Meta::empty()),
    ))
}

pub async fn create_user(
    state: &AppState,
    user: &AuthUser,
    payload: CreateUserRequest,
) -> AppResult<ApiResponse<User>> {
    ensure_admin(user)?;

    ensure_username_free(state, &payload.username, None).await?;

    let active = UserActive {
        id: Set(Uuid::new_v4()),
        username: Set(payload.username),
        full_name: Set(payload.full_name),
        role: Set(payload.role),
        password_hash: Set(hash_password(&payload.password)?),
        created_at: Set(Utc::now().into()),
    };
    let created = active.insert(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "user_create",
        Some("users"),
        Some(serde_json::json!({ "user_id": created.id, "role": created.role })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "User created",
        user_from_entity(created),
        Some(Meta::empty()),
    ))
}

pub async fn update_user(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateUserRequest,
) -> AppResult<ApiResponse<User>> {
    ensure_admin(user)?;

    let existing = Users::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(u) => u,
        None => return Err(AppError::NotFound("User")),
    };

    if let Some(username) = payload.username.as_ref() {
        if *username != existing.username {
            ensure_username_free(state, username, Some(id)).await?;
        }
    }

    let mut active: UserActive = existing.into();
    if let Some(username) = payload.username {
        active.username = Set(username);
    }
    if let Some(full_name) = payload.full_name {
        active.full_name = Set(full_name);
    }
    if let Some(role) = payload.role {
        active.role = Set(role);
    }
    if let Some(password) = payload.password {
        active.password_hash = Set(hash_password(&password)?);
    }
    let updated = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "user_update",
        Some("users"),
        Some(serde_json::json!({ "user_id": updated.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "User updated",
        user_from_entity(updated),
        Some(Meta::empty()),
    ))
}

pub async fn delete_user(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;

    if id == user.user_id {
        return Err(AppError::BadRequest("Cannot delete your own account".into()));
    }

    let result = Users::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("User"));
    }

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "user_delete",
        Some("users"),
        Some(serde_json::json!({ "user_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "User deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

async fn ensure_username_free(
    state: &AppState,
    username: &str,
    exclude: Option<Uuid>,
) -> AppResult<()> {
    let mut finder = Users::find().filter(UserCol::Username.eq(username));
    if let Some(id) = exclude {
        finder = finder.filter(UserCol::Id.ne(id));
    }
    if finder.count(&state.orm).await? > 0 {
        return Err(AppError::DuplicateName(username.to_string()));
    }
    Ok(())
}

pub(crate) fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

pub(crate) fn user_from_entity(model: UserModel) -> User {
    User {
        id: model.id,
        username: model.username,
        full_name: model.full_name,
        role: model.role,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
