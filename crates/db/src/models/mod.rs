//! Row models and input DTOs, one module per table.

pub mod account;
pub mod product;
pub mod sale;
pub mod seller;
pub mod user;
