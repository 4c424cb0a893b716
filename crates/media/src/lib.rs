//! Product image hosting.
//!
//! Handlers only see [`ImageStore`]: bytes in, durable public URL out.
//! [`cloudinary::CloudinaryStore`] is the production implementation;
//! [`DisabledImageStore`] stands in when no asset host is configured.

use async_trait::async_trait;

pub mod cloudinary;

/// An uploaded file as received from a multipart form.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum ImageStoreError {
    #[error("Image uploads are not configured")]
    NotConfigured,

    /// The file is not an image.
    #[error("Only image files are allowed, got '{0}'")]
    UnsupportedContentType(String),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Asset host returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Asset host response did not include a URL")]
    MissingUrl,
}

/// Whether a MIME type names an image (`image/*`).
pub fn is_image_content_type(content_type: &str) -> bool {
    content_type
        .split_once('/')
        .is_some_and(|(kind, sub)| {
            kind.trim().eq_ignore_ascii_case("image") && !sub.trim().is_empty()
        })
}

/// Stores product images and hands back their public URL.
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn upload(&self, image: ImageUpload) -> Result<String, ImageStoreError>;
}

/// Rejects every upload. Used when the asset host credentials are absent.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledImageStore;

#[async_trait]
impl ImageStore for DisabledImageStore {
    async fn upload(&self, _image: ImageUpload) -> Result<String, ImageStoreError> {
        Err(ImageStoreError::NotConfigured)
    }
}
