//! Image upload endpoints backed by the API's object storage.

use std::path::{Path, PathBuf};

use futures::future::try_join_all;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::ShopfrontClient;
use crate::error::ClientError;

/// A stored image as returned by the upload endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    pub url: String,
    pub public_id: String,
    #[serde(default)]
    pub secure_url: Option<String>,
}

impl UploadedImage {
    /// The HTTPS URL when the store returned one.
    #[must_use]
    pub fn best_url(&self) -> &str {
        self.secure_url.as_deref().unwrap_or(&self.url)
    }
}

#[derive(Deserialize)]
struct UploadEnvelope {
    images: Vec<UploadedImage>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteUpload<'a> {
    public_id: &'a str,
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("jpg" | "jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

async fn file_part(path: PathBuf) -> Result<Part, ClientError> {
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|source| ClientError::Io {
            path: path.clone(),
            source,
        })?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_owned();
    Ok(Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(mime_for(&path))?)
}

impl ShopfrontClient {
    /// Uploads one image as multipart field `image`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Io`] if the file cannot be read, otherwise any
    /// request or response error.
    pub async fn upload_image(&self, path: &Path) -> Result<UploadedImage, ClientError> {
        let form = Form::new().part("image", file_part(path.to_path_buf()).await?);
        self.post_multipart("/upload/single", form).await
    }

    /// Uploads several images as repeated multipart field `images`. Files are
    /// read concurrently and sent in a single request.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Io`] if any file cannot be read, otherwise any
    /// request or response error.
    pub async fn upload_images(&self, paths: &[PathBuf]) -> Result<Vec<UploadedImage>, ClientError> {
        let parts = try_join_all(paths.iter().cloned().map(file_part)).await?;
        let form = parts
            .into_iter()
            .fold(Form::new(), |form, part| form.part("images", part));
        let envelope: UploadEnvelope = self.post_multipart("/upload/multiple", form).await?;
        Ok(envelope.images)
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] if the API refuses the deletion.
    pub async fn delete_image(&self, public_id: &str) -> Result<(), ClientError> {
        self.send_discarding(Method::DELETE, "/upload", Some(&DeleteUpload { public_id }))
            .await
    }
}
