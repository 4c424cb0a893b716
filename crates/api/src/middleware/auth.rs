//! Session authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use quickcart_core::access::Actor;
use quickcart_core::error::CoreError;
use quickcart_core::roles::{AccountKind, Role};
use quickcart_core::types::DbId;
use quickcart_db::repositories::AccountDirectory;

use crate::auth::cookie::{read_cookie, AUTH_COOKIE};
use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The authenticated account behind a request.
///
/// The token is taken from the `authToken` cookie, falling back to an
/// `Authorization: Bearer` header. After signature and expiry checks the
/// account is looked up again, so a token outliving its account is rejected
/// with [`CoreError::AccountGone`].
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(account_id = user.account_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    /// Id within the table implied by `role`.
    pub account_id: DbId,
    pub role: Role,
}

impl AuthUser {
    pub fn actor(&self) -> Actor {
        Actor::new(self.account_id, self.role)
    }

    pub fn kind(&self) -> AccountKind {
        self.role.account_kind()
    }
}

/// Cookie first, then bearer header.
fn extract_token(headers: &HeaderMap) -> Option<String> {
    read_cookie(headers, AUTH_COOKIE).or_else(|| {
        headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(&parts.headers).ok_or(CoreError::TokenMissing)?;
        let claims = validate_token(&token, &state.config.jwt)?;

        let kind = claims.role.account_kind();
        if !AccountDirectory::exists(&state.pool, kind, claims.sub).await? {
            tracing::debug!(
                account_id = claims.sub,
                role = %claims.role,
                "Token for deleted account"
            );
            return Err(CoreError::AccountGone.into());
        }

        Ok(AuthUser {
            account_id: claims.sub,
            role: claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use axum::http::header::COOKIE;
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn cookie_wins_over_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("authToken=from-cookie"));
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));
        assert_eq!(extract_token(&headers).as_deref(), Some("from-cookie"));
    }

    #[test]
    fn bearer_used_without_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(extract_token(&headers).as_deref(), Some("abc"));
    }

    #[test]
    fn other_schemes_are_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwdw=="));
        assert_eq!(extract_token(&headers), None);
        assert_eq!(extract_token(&HeaderMap::new()), None);
    }
}
