//! Role-gated extractors.
//!
//! Each wraps [`AuthUser`] and rejects with 403 when the session role is not
//! in the allowed set. Authentication failures surface first as 401.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use quickcart_core::access::require_role;
use quickcart_core::roles::Role;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

async fn authorize(
    parts: &mut Parts,
    state: &AppState,
    allowed: &[Role],
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    require_role(&user.actor(), allowed)?;
    Ok(user)
}

macro_rules! role_extractor {
    ($(#[$doc:meta])* $name:ident, [$($role:expr),+]) => {
        $(#[$doc])*
        pub struct $name(pub AuthUser);

        impl FromRequestParts<AppState> for $name {
            type Rejection = AppError;

            async fn from_request_parts(
                parts: &mut Parts,
                state: &AppState,
            ) -> Result<Self, Self::Rejection> {
                authorize(parts, state, &[$($role),+]).await.map($name)
            }
        }
    };
}

role_extractor!(
    /// Requires the `admin` role.
    RequireAdmin,
    [Role::Admin]
);

role_extractor!(
    /// Requires the `seller` role.
    RequireSeller,
    [Role::Seller]
);

role_extractor!(
    /// Requires the `user` role. Only buyers purchase.
    RequireBuyer,
    [Role::User]
);

role_extractor!(
    /// Requires `seller` or `admin`.
    RequireSellerOrAdmin,
    [Role::Seller, Role::Admin]
);

role_extractor!(
    /// Requires an account from the regular table (`user` or `admin`).
    RequireRegular,
    [Role::User, Role::Admin]
);
