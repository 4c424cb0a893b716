//! Authorization predicates applied after session validation.
//!
//! Each check is independent and returns `Ok(())` or
//! [`CoreError::Forbidden`]. Loading the targeted resource (and turning
//! absence into `NotFound`) is the caller's job; these functions only see
//! the ids that matter.
//!
//! Account ids are per-table sequences, so a regular account and a seller can
//! share a numeric id. Every identity comparison here therefore matches the
//! account kind as well as the id.

use crate::error::CoreError;
use crate::roles::{AccountKind, Role};
use crate::types::DbId;

/// The authenticated party behind a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub account_id: DbId,
    pub role: Role,
}

impl Actor {
    pub fn new(account_id: DbId, role: Role) -> Self {
        Self { account_id, role }
    }

    pub fn kind(&self) -> AccountKind {
        self.role.account_kind()
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Whether this actor is the account `(kind, id)`.
    pub fn is_account(&self, kind: AccountKind, id: DbId) -> bool {
        self.kind() == kind && self.account_id == id
    }
}

/// Pass iff the actor's role is in `allowed`.
pub fn require_role(actor: &Actor, allowed: &[Role]) -> Result<(), CoreError> {
    if allowed.contains(&actor.role) {
        Ok(())
    } else {
        Err(CoreError::Forbidden("Insufficient permissions".into()))
    }
}

/// Pass iff the actor is the target account or an admin.
pub fn check_self_or_admin(
    actor: &Actor,
    target_kind: AccountKind,
    target_id: DbId,
) -> Result<(), CoreError> {
    if actor.is_admin() || actor.is_account(target_kind, target_id) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "Access denied: You can only access your own resources".into(),
        ))
    }
}

/// Pass iff the actor is the seller owning the product, or an admin.
pub fn check_product_owner(actor: &Actor, product_seller_id: DbId) -> Result<(), CoreError> {
    if actor.is_admin() || actor.is_account(AccountKind::Seller, product_seller_id) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "Access denied: You can only modify your own products".into(),
        ))
    }
}

/// Pass iff the actor is the sale's buyer or seller, or an admin.
pub fn check_sale_party(
    actor: &Actor,
    buyer_id: DbId,
    seller_id: DbId,
) -> Result<(), CoreError> {
    if actor.is_admin()
        || actor.is_account(AccountKind::Regular, buyer_id)
        || actor.is_account(AccountKind::Seller, seller_id)
    {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "Access denied: You can only access sales you are involved in".into(),
        ))
    }
}

/// Pass iff the actor is the sale's seller, or an admin. Buyers cannot
/// move a sale through its status lifecycle.
pub fn check_sale_seller(actor: &Actor, seller_id: DbId) -> Result<(), CoreError> {
    if actor.is_admin() || actor.is_account(AccountKind::Seller, seller_id) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "Access denied: You can only update your own sales".into(),
        ))
    }
}
