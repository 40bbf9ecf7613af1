//! Object storage client for uploaded images.
//!
//! Talks to a Supabase-compatible storage REST API:
//!
//! - Upload: `POST {url}/storage/v1/object/{bucket}/{name}`
//! - Public URL: `{url}/storage/v1/object/public/{bucket}/{name}`
//! - Delete: `DELETE {url}/storage/v1/object/{bucket}` with `{"prefixes": [name]}`
//!
//! Objects are named `<uuid>.<ext>` so uploads never collide.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::config::StorageConfig;

/// Uploads above this size are logged; they still go through.
pub const LARGE_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Seconds browsers and CDNs may cache an object.
const CACHE_SECONDS: &str = "3600";

/// Errors that can occur when talking to object storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Storage returned an error response.
    #[error("storage error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The service key cannot be used as a header value.
    #[error("invalid service key format")]
    InvalidKey,
}

#[derive(Serialize)]
struct DeleteRequest<'a> {
    prefixes: [&'a str; 1],
}

/// Object storage client.
#[derive(Clone)]
pub struct StorageClient {
    inner: Arc<StorageClientInner>,
}

struct StorageClientInner {
    client: reqwest::Client,
    base_url: String,
    bucket: String,
}

impl StorageClient {
    /// Create a new storage client.
    ///
    /// # Errors
    ///
    /// Returns error if the key is not a valid header value or the HTTP
    /// client fails to build.
    pub fn new(config: &StorageConfig) -> Result<Self, StorageError> {
        let key = config.service_key.expose_secret();
        let mut headers = HeaderMap::new();

        let mut bearer =
            HeaderValue::from_str(&format!("Bearer {key}")).map_err(|_| StorageError::InvalidKey)?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);

        let mut api_key = HeaderValue::from_str(key).map_err(|_| StorageError::InvalidKey)?;
        api_key.set_sensitive(true);
        headers.insert("apikey", api_key);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(StorageClientInner {
                client,
                base_url: config.url.trim_end_matches('/').to_owned(),
                bucket: config.bucket.clone(),
            }),
        })
    }

    /// Public URL of an object.
    #[must_use]
    pub fn public_url(&self, name: &str) -> String {
        format!("{}{name}", self.public_prefix())
    }

    /// The object name behind a public URL, if it points into our bucket.
    #[must_use]
    pub fn object_name(&self, url: &str) -> Option<String> {
        url.strip_prefix(&self.public_prefix())
            .filter(|name| !name.is_empty() && !name.contains('/'))
            .map(ToOwned::to_owned)
    }

    fn public_prefix(&self) -> String {
        format!(
            "{}/storage/v1/object/public/{}/",
            self.inner.base_url, self.inner.bucket
        )
    }

    /// Upload a file and return its public URL.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the request fails or storage rejects it.
    #[tracing::instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload(
        &self,
        file_name: &str,
        content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<String, StorageError> {
        if bytes.len() > LARGE_UPLOAD_BYTES {
            tracing::warn!(file_name, size = bytes.len(), "Uploading a large image");
        }

        let name = object_name_for(file_name, Uuid::new_v4());
        let url = format!(
            "{}/storage/v1/object/{}/{name}",
            self.inner.base_url, self.inner.bucket
        );

        let response = self
            .inner
            .client
            .post(&url)
            .header(CACHE_CONTROL, format!("max-age={CACHE_SECONDS}"))
            .header("x-upsert", "false")
            .header(
                CONTENT_TYPE,
                content_type.unwrap_or("application/octet-stream"),
            )
            .body(bytes)
            .send()
            .await?;

        check(response).await?;

        tracing::info!(object = %name, "Image uploaded");
        Ok(self.public_url(&name))
    }

    /// Delete an object by name.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the request fails or storage rejects it.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, name: &str) -> Result<(), StorageError> {
        let url = format!(
            "{}/storage/v1/object/{}",
            self.inner.base_url, self.inner.bucket
        );

        let response = self
            .inner
            .client
            .delete(&url)
            .json(&DeleteRequest { prefixes: [name] })
            .send()
            .await?;

        check(response).await
    }

    /// Remove the object behind a deleted record's image, if it is ours.
    ///
    /// Failures are logged and swallowed; the record is already gone.
    pub async fn remove_image(&self, image_url: Option<&str>) {
        let Some(name) = image_url.and_then(|url| self.object_name(url)) else {
            return;
        };

        if let Err(e) = self.delete(&name).await {
            tracing::warn!(error = %e, object = %name, "Failed to delete image from storage");
        }
    }
}

/// Fail on a non-success response, keeping the body as the message.
async fn check(response: reqwest::Response) -> Result<(), StorageError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    let message = response.text().await.unwrap_or_default();
    Err(StorageError::Api {
        status: status.as_u16(),
        message,
    })
}

/// `<id>.<ext>`, with the extension taken from the uploaded file name.
fn object_name_for(file_name: &str, id: Uuid) -> String {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()));

    match extension {
        Some(ext) => format!("{id}.{ext}"),
        None => id.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    fn client() -> StorageClient {
        StorageClient::new(&StorageConfig {
            url: "https://abc.supabase.co/".to_owned(),
            service_key: SecretString::from("sb-service-key-4f9a8c2e71d3"),
            bucket: "Images".to_owned(),
        })
        .unwrap()
    }

    #[test]
    fn test_object_name_keeps_extension() {
        let id = Uuid::from_u128(1);
        assert_eq!(object_name_for("Café Latte.JPG", id), format!("{id}.jpg"));
        assert_eq!(object_name_for("foto", id), id.to_string());
        assert_eq!(object_name_for("foto.", id), id.to_string());
        assert_eq!(object_name_for("../../x.p/ng", id), id.to_string());
    }

    #[test]
    fn test_public_url() {
        assert_eq!(
            client().public_url("a.png"),
            "https://abc.supabase.co/storage/v1/object/public/Images/a.png"
        );
    }

    #[test]
    fn test_object_name_only_for_own_bucket() {
        let client = client();
        assert_eq!(
            client
                .object_name("https://abc.supabase.co/storage/v1/object/public/Images/a.png")
                .as_deref(),
            Some("a.png")
        );
        assert_eq!(client.object_name("https://images.unsplash.com/photo.jpg"), None);
        assert_eq!(
            client.object_name("https://abc.supabase.co/storage/v1/object/public/Other/a.png"),
            None
        );
    }
}
