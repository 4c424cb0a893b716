//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that take
//! `&PgPool` as the first argument.

pub mod account_directory;
pub mod product_repo;
pub mod sale_repo;
pub mod seller_repo;
pub mod user_repo;

pub use account_directory::AccountDirectory;
pub use product_repo::ProductRepo;
pub use sale_repo::SaleRepo;
pub use seller_repo::SellerRepo;
pub use user_repo::UserRepo;
