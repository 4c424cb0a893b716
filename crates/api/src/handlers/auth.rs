//! Handlers for the `/auth` resource.
//!
//! Signup and login resolve the target table and session role from the email
//! and the `?role=` hint before touching the database. The session token is
//! returned in the body and set as the `authToken` cookie.

use axum::extract::{Query, State};
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use quickcart_core::error::CoreError;
use quickcart_core::identity::{require_password, resolve_identity};
use quickcart_core::roles::{AccountKind, Role};
use quickcart_core::validation::{validate_email, validate_name};
use quickcart_db::models::account::{Account, AccountResponse};
use quickcart_db::models::seller::CreateSeller;
use quickcart_db::models::user::CreateUser;
use quickcart_db::repositories::{AccountDirectory, SellerRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::cookie::{clear_session_cookie, session_cookie};
use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password_async, validate_password_strength, verify_password_async};
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::RoleParam;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup`.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    /// Required for sellers, ignored otherwise.
    pub brand_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChangeEmailRequest {
    pub new_email: Option<String>,
    pub password: Option<String>,
}

/// Body of a successful signup or login.
#[derive(Debug, Serialize)]
pub struct SessionPayload {
    pub account: AccountResponse,
    pub role: Role,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct MePayload {
    pub account: AccountResponse,
    pub role: Role,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Issue a token and build the `(status, Set-Cookie, body)` response.
fn start_session(
    state: &AppState,
    status: StatusCode,
    message: String,
    account: Account,
    role: Role,
) -> AppResult<impl IntoResponse> {
    let token = generate_token(account.id(), role, &state.config.jwt)?;
    let cookie = session_cookie(
        &token,
        state.config.jwt.expiry_secs(),
        state.config.secure_cookies,
    );

    let payload = SessionPayload {
        account: account.into(),
        role,
        token,
    };

    Ok((
        status,
        [(SET_COOKIE, cookie)],
        Json(ApiResponse::with_message(message, payload)),
    ))
}

async fn load_session_account(state: &AppState, user: &AuthUser) -> AppResult<Account> {
    let kind = user.kind();
    let account = AccountDirectory::find_by_id(&state.pool, kind, user.account_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: kind.entity_name(),
            id: user.account_id,
        })?;
    Ok(account)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/signup?role=user|seller
///
/// Creates an account in the table the resolved role implies. The email must
/// be unused in both tables.
pub async fn signup(
    State(state): State<AppState>,
    Query(params): Query<RoleParam>,
    Json(input): Json<SignupRequest>,
) -> AppResult<impl IntoResponse> {
    let email = non_blank(input.email).unwrap_or_default();
    let resolved = resolve_identity(&email, params.role.as_deref(), &state.config.admin)?;
    let password = require_password(input.password.as_deref())?.to_string();

    validate_email(&email)?;
    let username = input.username.unwrap_or_default();
    validate_name("username", &username)?;
    validate_password_strength(&password)?;

    AccountDirectory::find_by_email(&state.pool, &email)
        .await?
        .ensure_available(&email)?;

    let brand_name = if resolved.kind == AccountKind::Seller {
        let brand_name = non_blank(input.brand_name).ok_or_else(|| {
            CoreError::Validation("brand_name is required for seller accounts".into())
        })?;
        validate_name("brand_name", &brand_name)?;
        if SellerRepo::find_by_brand_name(&state.pool, &brand_name)
            .await?
            .is_some()
        {
            return Err(CoreError::Conflict("Brand name already exists".into()).into());
        }
        Some(brand_name)
    } else {
        None
    };

    let password_hash = hash_password_async(password).await?;

    let account = match brand_name {
        Some(brand_name) => {
            let input = CreateSeller {
                username: username.trim().to_string(),
                first_name: input.first_name,
                last_name: input.last_name,
                email,
                password_hash,
                brand_name,
                address: input.address,
                phone: input.phone,
                birth_date: input.birth_date,
            };
            Account::Seller(SellerRepo::create(&state.pool, &input).await?)
        }
        None => {
            let input = CreateUser {
                username: username.trim().to_string(),
                first_name: input.first_name,
                last_name: input.last_name,
                email,
                password_hash,
                role: resolved.role,
                address: input.address,
                phone: input.phone,
                birth_date: input.birth_date,
            };
            Account::Regular(UserRepo::create(&state.pool, &input).await?)
        }
    };

    tracing::info!(account_id = account.id(), role = %resolved.role, "Account created");

    start_session(
        &state,
        StatusCode::CREATED,
        format!("{} account created successfully", resolved.role),
        account,
        resolved.role,
    )
}

/// POST /api/auth/login?role=user|seller
pub async fn login(
    State(state): State<AppState>,
    Query(params): Query<RoleParam>,
    Json(input): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let password = input.password.filter(|p| !p.is_empty());
    let (Some(email), Some(password)) = (non_blank(input.email), password) else {
        return Err(CoreError::Validation("Email and password are required".into()).into());
    };

    let resolved = resolve_identity(&email, params.role.as_deref(), &state.config.admin)?;

    let account = AccountDirectory::find_in(&state.pool, resolved.kind, &email)
        .await?
        .ok_or(CoreError::AccountNotFound {
            role: resolved.role,
        })?;

    if !verify_password_async(password, account.password_hash().to_string()).await? {
        tracing::warn!(
            account_id = account.id(),
            role = %resolved.role,
            "Login rejected: wrong password"
        );
        return Err(CoreError::InvalidCredentials.into());
    }

    tracing::info!(account_id = account.id(), role = %resolved.role, "Logged in");

    start_session(
        &state,
        StatusCode::OK,
        format!("{} logged in successfully", resolved.role),
        account,
        resolved.role,
    )
}

/// POST /api/auth/logout
///
/// Clears the cookie. Tokens are stateless, so a copied token stays valid
/// until it expires.
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(SET_COOKIE, clear_session_cookie(state.config.secure_cookies))],
        Json(ApiResponse::message("Logged out successfully")),
    )
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<MePayload>>> {
    let account = load_session_account(&state, &user).await?;
    Ok(Json(ApiResponse::data(MePayload {
        account: account.into(),
        role: user.role,
    })))
}

/// PATCH /api/auth/change-password
pub async fn change_password(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let (Some(current), Some(new)) = (
        input.current_password.filter(|p| !p.is_empty()),
        input.new_password.filter(|p| !p.is_empty()),
    ) else {
        return Err(CoreError::Validation(
            "Current password and new password are required".into(),
        )
        .into());
    };
    validate_password_strength(&new)?;

    let account = load_session_account(&state, &user).await?;
    if !verify_password_async(current, account.password_hash().to_string()).await? {
        tracing::warn!(account_id = user.account_id, role = %user.role, "Password change rejected");
        return Err(CoreError::Unauthorized("Current password is incorrect".into()).into());
    }

    let password_hash = hash_password_async(new).await?;
    AccountDirectory::update_password(&state.pool, user.kind(), user.account_id, &password_hash)
        .await?;

    tracing::info!(account_id = user.account_id, role = %user.role, "Password changed");

    Ok(Json(ApiResponse::message("Password changed successfully")))
}

/// PATCH /api/auth/change-email
///
/// The new address must be unused in both tables and may not be the
/// administrator address.
pub async fn change_email(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<ChangeEmailRequest>,
) -> AppResult<Json<ApiResponse<AccountResponse>>> {
    let (Some(new_email), Some(password)) = (
        non_blank(input.new_email),
        input.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(CoreError::Validation("New email and password are required".into()).into());
    };
    validate_email(&new_email)?;

    if state.config.admin.is_admin_email(&new_email) {
        return Err(CoreError::Forbidden("This email address is reserved".into()).into());
    }

    let account = load_session_account(&state, &user).await?;
    if !verify_password_async(password, account.password_hash().to_string()).await? {
        tracing::warn!(account_id = user.account_id, role = %user.role, "Email change rejected");
        return Err(CoreError::Unauthorized("Password is incorrect".into()).into());
    }

    AccountDirectory::find_by_email(&state.pool, &new_email)
        .await?
        .ensure_available(&new_email)?;

    let updated =
        AccountDirectory::update_email(&state.pool, user.kind(), user.account_id, &new_email)
            .await?
            .ok_or(CoreError::NotFound {
                entity: user.kind().entity_name(),
                id: user.account_id,
            })?;

    tracing::info!(account_id = user.account_id, role = %user.role, "Email changed");

    Ok(Json(ApiResponse::with_message(
        "Email changed successfully",
        updated.into(),
    )))
}
