//! Domain rules for the QuickCart marketplace.
//!
//! Nothing in this crate performs I/O. The db and api crates feed it rows and
//! request data; it decides roles, ownership, sale math and field validity.

pub mod access;
pub mod error;
pub mod identity;
pub mod listing;
pub mod roles;
pub mod sales;
pub mod types;
pub mod validation;
