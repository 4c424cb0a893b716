//! Signed uploads to a Cloudinary-compatible image host.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::{is_image_content_type, ImageStore, ImageStoreError, ImageUpload};

const DEFAULT_API_BASE: &str = "https://api.cloudinary.com/v1_1";

/// HTTP request timeout for a single upload.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Credentials and destination for uploads.
#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// Folder the images are filed under.
    pub folder: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
}

pub struct CloudinaryStore {
    client: reqwest::Client,
    config: CloudinaryConfig,
    api_base: String,
}

impl CloudinaryStore {
    pub fn new(config: CloudinaryConfig) -> Result<Self, ImageStoreError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            config,
            api_base: DEFAULT_API_BASE.to_string(),
        })
    }

    /// Point the store at a different API root (e.g. a local mock).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn upload_url(&self) -> String {
        format!("{}/{}/image/upload", self.api_base, self.config.cloud_name)
    }
}

/// Hex SHA-256 of the alphabetically sorted `key=value` pairs joined with
/// `&`, followed directly by the API secret.
pub fn sign_params(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted: Vec<_> = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    let joined = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(joined.as_bytes());
    hasher.update(api_secret.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[async_trait]
impl ImageStore for CloudinaryStore {
    async fn upload(&self, image: ImageUpload) -> Result<String, ImageStoreError> {
        if !is_image_content_type(&image.content_type) {
            return Err(ImageStoreError::UnsupportedContentType(image.content_type));
        }

        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = sign_params(
            &[("folder", &self.config.folder), ("timestamp", &timestamp)],
            &self.config.api_secret,
        );

        let size = image.bytes.len();
        let file = reqwest::multipart::Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&image.content_type)?;
        let form = reqwest::multipart::Form::new()
            .part("file", file)
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", self.config.folder.clone())
            .text("signature_algorithm", "sha256")
            .text("signature", signature);

        let response = self.client.post(self.upload_url()).multipart(form).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), %body, "Image upload rejected");
            return Err(ImageStoreError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: UploadResponse = response.json().await?;
        let url = parsed.secure_url.ok_or(ImageStoreError::MissingUrl)?;
        tracing::info!(bytes = size, %url, "Image uploaded");
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn config() -> CloudinaryConfig {
        CloudinaryConfig {
            cloud_name: "demo".into(),
            api_key: "key".into(),
            api_secret: "secret".into(),
            folder: "product-images".into(),
        }
    }

    #[test]
    fn signature_is_order_independent() {
        let a = sign_params(&[("timestamp", "1"), ("folder", "f")], "s");
        let b = sign_params(&[("folder", "f"), ("timestamp", "1")], "s");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn signature_matches_known_digest() {
        // sha256("folder=f&timestamp=1s")
        let expected = {
            let mut h = Sha256::new();
            h.update(b"folder=f&timestamp=1s");
            format!("{:x}", h.finalize())
        };
        assert_eq!(sign_params(&[("timestamp", "1"), ("folder", "f")], "s"), expected);
    }

    #[test]
    fn signature_depends_on_secret() {
        let params = [("folder", "f"), ("timestamp", "1")];
        assert_ne!(sign_params(&params, "a"), sign_params(&params, "b"));
    }

    #[test]
    fn upload_url_includes_cloud_name() {
        let store = CloudinaryStore::new(config()).unwrap();
        assert_eq!(
            store.upload_url(),
            "https://api.cloudinary.com/v1_1/demo/image/upload"
        );
        let store = store.with_api_base("http://localhost:9000");
        assert_eq!(store.upload_url(), "http://localhost:9000/demo/image/upload");
    }

    #[tokio::test]
    async fn non_image_is_rejected_before_any_request() {
        let store = CloudinaryStore::new(config())
            .unwrap()
            .with_api_base("http://127.0.0.1:9");
        let upload = ImageUpload {
            file_name: "notes.txt".into(),
            content_type: "text/plain".into(),
            bytes: b"hello".to_vec(),
        };
        assert_matches!(
            store.upload(upload).await,
            Err(ImageStoreError::UnsupportedContentType(ct)) if ct == "text/plain"
        );
    }
}
