//! Identity resolution for signup and login.
//!
//! Decides which account collection a credential-bearing request targets and
//! which role the resulting session carries. The configured administrator
//! address always wins over the client's role hint.

use crate::error::CoreError;
use crate::roles::{AccountKind, Role, ROLE_SELLER, ROLE_USER};

/// Default administrator address when none is configured.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@email.com";

/// The single administrator bootstrap address.
///
/// Exactly one address is honoured. It is compared byte-for-byte against the
/// submitted email; no case folding or trimming is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminPolicy {
    admin_email: String,
}

impl AdminPolicy {
    pub fn new(admin_email: impl Into<String>) -> Self {
        Self {
            admin_email: admin_email.into(),
        }
    }

    pub fn admin_email(&self) -> &str {
        &self.admin_email
    }

    pub fn is_admin_email(&self, email: &str) -> bool {
        email == self.admin_email
    }
}

impl Default for AdminPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_ADMIN_EMAIL)
    }
}

/// Outcome of identity resolution: target collection plus effective role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedIdentity {
    pub kind: AccountKind,
    pub role: Role,
}

/// Resolve the target collection and effective role for `email`.
///
/// Rules, first match wins:
/// 1. the admin address -> regular collection, `admin`, whatever the hint;
/// 2. hint `seller` -> seller collection, `seller`;
/// 3. hint `user` -> regular collection, `user`;
/// 4. anything else -> [`CoreError::InvalidRole`].
pub fn resolve_identity(
    email: &str,
    role_hint: Option<&str>,
    policy: &AdminPolicy,
) -> Result<ResolvedIdentity, CoreError> {
    if policy.is_admin_email(email) {
        return Ok(ResolvedIdentity {
            kind: AccountKind::Regular,
            role: Role::Admin,
        });
    }

    match role_hint {
        Some(ROLE_SELLER) => Ok(ResolvedIdentity {
            kind: AccountKind::Seller,
            role: Role::Seller,
        }),
        Some(ROLE_USER) => Ok(ResolvedIdentity {
            kind: AccountKind::Regular,
            role: Role::User,
        }),
        other => Err(CoreError::InvalidRole(other.map(str::to_string))),
    }
}

/// Require a non-empty plaintext password.
pub fn require_password(password: Option<&str>) -> Result<&str, CoreError> {
    match password {
        Some(p) if !p.is_empty() => Ok(p),
        _ => Err(CoreError::MissingPassword),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn policy() -> AdminPolicy {
        AdminPolicy::default()
    }

    #[test]
    fn admin_email_overrides_seller_hint() {
        let resolved = resolve_identity("admin@email.com", Some("seller"), &policy()).unwrap();
        assert_eq!(resolved.role, Role::Admin);
        assert_eq!(resolved.kind, AccountKind::Regular);
    }

    #[test]
    fn admin_email_needs_no_hint() {
        let resolved = resolve_identity("admin@email.com", None, &policy()).unwrap();
        assert_eq!(resolved.role, Role::Admin);
    }

    #[test]
    fn admin_email_overrides_garbage_hint() {
        let resolved = resolve_identity("admin@email.com", Some("root"), &policy()).unwrap();
        assert_eq!(resolved.role, Role::Admin);
    }

    #[test]
    fn admin_match_is_exact() {
        let result = resolve_identity("Admin@email.com", None, &policy());
        assert_matches!(result, Err(CoreError::InvalidRole(None)));
    }

    #[test]
    fn configured_admin_address_is_honoured() {
        let custom = AdminPolicy::new("boss@shop.test");
        let resolved = resolve_identity("boss@shop.test", Some("user"), &custom).unwrap();
        assert_eq!(resolved.role, Role::Admin);

        let resolved = resolve_identity("admin@email.com", Some("user"), &custom).unwrap();
        assert_eq!(resolved.role, Role::User);
    }

    #[test]
    fn seller_hint_targets_seller_collection() {
        let resolved = resolve_identity("a@x.com", Some("seller"), &policy()).unwrap();
        assert_eq!(resolved.kind, AccountKind::Seller);
        assert_eq!(resolved.role, Role::Seller);
    }

    #[test]
    fn user_hint_targets_regular_collection() {
        let resolved = resolve_identity("a@x.com", Some("user"), &policy()).unwrap();
        assert_eq!(resolved.kind, AccountKind::Regular);
        assert_eq!(resolved.role, Role::User);
    }

    #[test]
    fn admin_hint_is_not_a_valid_role() {
        let result = resolve_identity("a@x.com", Some("admin"), &policy());
        assert_matches!(result, Err(CoreError::InvalidRole(Some(hint))) if hint == "admin");
    }

    #[test]
    fn missing_hint_is_invalid() {
        assert_matches!(
            resolve_identity("a@x.com", None, &policy()),
            Err(CoreError::InvalidRole(None))
        );
    }

    #[test]
    fn password_must_be_present_and_non_empty() {
        assert_matches!(require_password(None), Err(CoreError::MissingPassword));
        assert_matches!(require_password(Some("")), Err(CoreError::MissingPassword));
        assert_eq!(require_password(Some("pw123456")).unwrap(), "pw123456");
    }
}
