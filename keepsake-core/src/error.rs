//! Error types for the gallery engine.

use std::path::PathBuf;
use thiserror::Error;

pub type GalleryResult<T> = Result<T, GalleryError>;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed gallery data in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// `data.js` exists but does not assign the gallery array.
    #[error("no embedded gallery data found in {path}")]
    EmbeddedDataMissing { path: PathBuf },

    #[error("could not decode image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("state store error: {0}")]
    Storage(String),
}
