use std::fmt;
use std::future::Future;

use consts::{firebase, FIREBASE_STORAGE_BASE};
use gloo::net::http::Request;
use leptos::web_sys::File;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StorageError {
    #[error("storage request failed with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("network error: {0}")]
    Network(String),
}

impl From<gloo::net::Error> for StorageError {
    fn from(e: gloo::net::Error) -> Self {
        Self::Network(e.to_string())
    }
}

/// Extension of a file name, the text after its last `.`
///
/// A name without any dot yields the whole name.
pub fn file_extension(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or_default()
}

/// Logical key of one object in the storage bucket, `<folder>/<id>.<ext>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoragePath(String);

impl StoragePath {
    pub fn new(folder: &str, id: &Uuid, file_name: &str) -> Self {
        Self(format!("{folder}/{id}.{}", file_extension(file_name)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn folder(&self) -> &str {
        self.0.split('/').next().unwrap_or_default()
    }
}

impl fmt::Display for StoragePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Anything with a file name that can be written to storage
pub trait UploadFile {
    fn file_name(&self) -> String;
}

impl UploadFile for File {
    fn file_name(&self) -> String {
        self.name()
    }
}

/// Write access to the external object store
pub trait StorageBackend {
    type File: UploadFile;

    fn put(
        &self,
        path: &StoragePath,
        file: &Self::File,
    ) -> impl Future<Output = Result<(), StorageError>>;

    fn delete(&self, path: &StoragePath) -> impl Future<Output = Result<(), StorageError>>;
}

/// Firebase Cloud Storage over its REST API, authorized with a user's id token
#[derive(Clone)]
pub struct FirebaseStorage {
    bucket: String,
    id_token: String,
}

impl FirebaseStorage {
    pub fn new(id_token: impl Into<String>) -> Self {
        Self::with_bucket(firebase::STORAGE_BUCKET, id_token)
    }

    pub fn with_bucket(bucket: impl Into<String>, id_token: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            id_token: id_token.into(),
        }
    }

    fn bucket_url(&self) -> String {
        format!("{}b/{}/o", FIREBASE_STORAGE_BASE.as_str(), self.bucket)
    }

    fn upload_url(&self, path: &StoragePath) -> String {
        format!(
            "{}?uploadType=media&name={}",
            self.bucket_url(),
            urlencoding::encode(path.as_str())
        )
    }

    fn object_url(&self, path: &StoragePath) -> String {
        format!("{}/{}", self.bucket_url(), urlencoding::encode(path.as_str()))
    }

    fn authorization(&self) -> String {
        format!("Firebase {}", self.id_token)
    }
}

async fn check_status(res: gloo::net::http::Response) -> Result<(), StorageError> {
    if res.ok() {
        return Ok(());
    }
    let status = res.status();
    let message = res
        .text()
        .await
        .unwrap_or_else(|_| res.status_text());
    Err(StorageError::Status { status, message })
}

impl StorageBackend for FirebaseStorage {
    type File = File;

    async fn put(&self, path: &StoragePath, file: &File) -> Result<(), StorageError> {
        let content_type = match file.type_() {
            mime if mime.is_empty() => "application/octet-stream".to_string(),
            mime => mime,
        };

        log::debug!("uploading {} ({} bytes)", path, file.size());
        let res = Request::post(&self.upload_url(path))
            .header("Authorization", &self.authorization())
            .header("Content-Type", &content_type)
            .body(file.clone())?
            .send()
            .await?;

        check_status(res).await
    }

    async fn delete(&self, path: &StoragePath) -> Result<(), StorageError> {
        let res = Request::delete(&self.object_url(path))
            .header("Authorization", &self.authorization())
            .send()
            .await?;

        check_status(res).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_taken_after_last_dot() {
        assert_eq!(file_extension("clip.final.mp4"), "mp4");
        assert_eq!(file_extension("thumb.jpg"), "jpg");
        assert_eq!(file_extension("noext"), "noext");
        assert_eq!(file_extension("trailing."), "");
    }

    #[test]
    fn path_joins_folder_id_and_extension() {
        let id = Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        let path = StoragePath::new("videos", &id, "holiday.MOV");
        assert_eq!(
            path.as_str(),
            "videos/67e55044-10b1-426f-9247-bb680e5fe0c8.MOV"
        );
        assert_eq!(path.folder(), "videos");
    }

    #[test]
    fn object_urls_escape_the_path() {
        let storage = FirebaseStorage::with_bucket("demo.appspot.com", "token");
        let id = Uuid::nil();
        let path = StoragePath::new("thumbnails", &id, "thumb.jpg");

        assert_eq!(
            storage.upload_url(&path),
            "https://firebasestorage.googleapis.com/v0/b/demo.appspot.com/o\
             ?uploadType=media&name=thumbnails%2F00000000-0000-0000-0000-000000000000.jpg"
        );
        assert!(storage
            .object_url(&path)
            .ends_with("/o/thumbnails%2F00000000-0000-0000-0000-000000000000.jpg"));
        assert_eq!(storage.authorization(), "Firebase token");
    }
}
