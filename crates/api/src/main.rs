use std::net::SocketAddr;
use std::sync::Arc;

use quickcart_api::config::ServerConfig;
use quickcart_api::router::build_app_router;
use quickcart_api::state::AppState;
use quickcart_media::cloudinary::CloudinaryStore;
use quickcart_media::{DisabledImageStore, ImageStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quickcart_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = config.port,
        admin_email = config.admin.admin_email(),
        "Loaded server configuration"
    );

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = quickcart_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    quickcart_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    quickcart_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Image store ---
    let images: Arc<dyn ImageStore> = match config.cloudinary.clone() {
        Some(cloudinary) => {
            tracing::info!(cloud_name = %cloudinary.cloud_name, "Image uploads go to Cloudinary");
            Arc::new(CloudinaryStore::new(cloudinary).expect("Failed to build image store client"))
        }
        None => {
            tracing::warn!("Cloudinary credentials not set, product image uploads will fail");
            Arc::new(DisabledImageStore)
        }
    };

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        images,
    };
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Resolve on SIGINT, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received SIGINT, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
