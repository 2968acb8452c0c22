use std::time::Duration;

use once_cell::sync::Lazy;
use reqwest::Url;

pub const APP_NAME: &str = "VideoShare";
pub const HOME_PATH: &str = "/upload";
pub const LOGIN_PATH: &str = "/login";

pub const SESSION_STORE: &str = "video-share-session";
pub const SESSION_MAX_AGE: Duration = Duration::from_secs(60 * 60 * 24 * 30);

/// Folder that receives uploaded video files
pub const VIDEO_FOLDER: &str = "videos";
/// Folder that receives uploaded thumbnail images
pub const THUMBNAIL_FOLDER: &str = "thumbnails";

pub const UPLOAD_FAILED_MESSAGE: &str = "An error occurred. Please start over.";

pub mod thumbnail {
    /// Frames sampled from a selected video
    pub const SAMPLE_COUNT: f64 = 3.0;
    pub const MIME_TYPE: &str = "image/jpeg";
    pub const FILE_NAME: &str = "thumb.jpg";
}

pub mod limits {
    pub const MIN_PASSWORD_LEN: usize = 6;
    pub const MAX_NAME_LEN: usize = 30;
    pub const MAX_TITLE_LEN: usize = 100;
    pub const MAX_DESCRIPTION_LEN: usize = 5000;
}

pub mod firebase {
    /// Web API key of the Firebase project, baked in at build time
    pub const API_KEY: &str = match option_env!("FIREBASE_API_KEY") {
        Some(key) => key,
        None => "local-dev-api-key",
    };

    pub const STORAGE_BUCKET: &str = match option_env!("FIREBASE_STORAGE_BUCKET") {
        Some(bucket) => bucket,
        None => "video-share-dev.appspot.com",
    };
}

pub static FIREBASE_AUTH_BASE: Lazy<Url> =
    Lazy::new(|| Url::parse("https://identitytoolkit.googleapis.com/v1/").unwrap());

pub static FIREBASE_STORAGE_BASE: Lazy<Url> =
    Lazy::new(|| Url::parse("https://firebasestorage.googleapis.com/v0/").unwrap());

pub static FIREBASE_TOKEN_BASE: Lazy<Url> =
    Lazy::new(|| Url::parse("https://securetoken.googleapis.com/v1/").unwrap());
