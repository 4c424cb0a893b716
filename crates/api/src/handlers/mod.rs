pub mod auth;
pub mod product;
pub mod sales;
pub mod seller;
pub mod user;
