use quickcart_core::identity::{AdminPolicy, DEFAULT_ADMIN_EMAIL};
use quickcart_media::cloudinary::CloudinaryConfig;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub jwt: JwtConfig,
    /// The single administrator address.
    pub admin: AdminPolicy,
    /// Set the `Secure` flag on the session cookie. On when `APP_ENV=production`.
    pub secure_cookies: bool,
    /// Asset host credentials. `None` disables image uploads.
    pub cloudinary: Option<CloudinaryConfig>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `HOST`                  | `0.0.0.0`               |
    /// | `PORT`                  | `3000`                  |
    /// | `CORS_ORIGINS`          | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                    |
    /// | `APP_ENV`               | `development`           |
    /// | `ADMIN_EMAIL`           | `admin@email.com`       |
    /// | `CLOUDINARY_CLOUD_NAME` | unset                   |
    /// | `CLOUDINARY_API_KEY`    | unset                   |
    /// | `CLOUDINARY_API_SECRET` | unset                   |
    /// | `CLOUDINARY_FOLDER`     | `product-images`        |
    ///
    /// JWT settings are read by [`JwtConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let secure_cookies = std::env::var("APP_ENV")
            .map(|env| env.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        let admin_email = std::env::var("ADMIN_EMAIL")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.to_string());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            admin: AdminPolicy::new(admin_email),
            secure_cookies,
            cloudinary: cloudinary_from_env(),
        }
    }
}

/// Asset host settings, present only when all three credentials are set.
fn cloudinary_from_env() -> Option<CloudinaryConfig> {
    let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

    Some(CloudinaryConfig {
        cloud_name: var("CLOUDINARY_CLOUD_NAME")?,
        api_key: var("CLOUDINARY_API_KEY")?,
        api_secret: var("CLOUDINARY_API_SECRET")?,
        folder: var("CLOUDINARY_FOLDER").unwrap_or_else(|| "product-images".to_string()),
    })
}
