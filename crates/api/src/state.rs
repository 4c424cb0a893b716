use std::sync::Arc;

use quickcart_media::ImageStore;

use crate::config::ServerConfig;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheap to clone: everything is behind `Arc` or is itself a handle.
#[derive(Clone)]
pub struct AppState {
    pub pool: quickcart_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Where product images are uploaded.
    pub images: Arc<dyn ImageStore>,
}
