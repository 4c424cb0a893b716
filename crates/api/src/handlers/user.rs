//! Handlers for the `/user` resource (regular accounts).

use axum::extract::{Path, State};
use axum::Json;
use quickcart_core::access::check_self_or_admin;
use quickcart_core::error::CoreError;
use quickcart_core::roles::AccountKind;
use quickcart_core::types::DbId;
use quickcart_core::validation::validate_name;
use quickcart_db::models::user::{UpdateUser, UserResponse};
use quickcart_db::repositories::UserRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireRegular};
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DeletedUser {
    pub deleted_user_id: DbId,
}

fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound { entity: "User", id }
}

/// GET /api/user/profile
pub async fn profile(
    State(state): State<AppState>,
    RequireRegular(user): RequireRegular,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let found = UserRepo::find_by_id(&state.pool, user.account_id)
        .await?
        .ok_or_else(|| not_found(user.account_id))?;
    Ok(Json(ApiResponse::data(found.into())))
}

/// GET /api/user
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<ApiResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(ApiResponse::data(
        users.into_iter().map(UserResponse::from).collect(),
    )))
}

/// GET /api/user/{id}
pub async fn get_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    check_self_or_admin(&user.actor(), AccountKind::Regular, id)?;
    let found = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(ApiResponse::data(found.into())))
}

/// PATCH /api/user/{id}
///
/// Email, password, role, and id are not editable.
pub async fn update_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    check_self_or_admin(&user.actor(), AccountKind::Regular, id)?;
    if let Some(username) = &input.username {
        validate_name("username", username)?;
    }

    let updated = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(user_id = id, account_id = user.account_id, role = %user.role, "User updated");

    Ok(Json(ApiResponse::with_message(
        "User updated successfully",
        updated.into(),
    )))
}

/// DELETE /api/user/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<DeletedUser>>> {
    check_self_or_admin(&user.actor(), AccountKind::Regular, id)?;

    if !UserRepo::delete(&state.pool, id).await? {
        return Err(not_found(id).into());
    }

    tracing::info!(user_id = id, account_id = user.account_id, role = %user.role, "User deleted");

    Ok(Json(ApiResponse::with_message(
        "User deleted successfully",
        DeletedUser {
            deleted_user_id: id,
        },
    )))
}
