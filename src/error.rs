use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid settings in {path}: {source}")]
    Settings {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("unknown sketch `{0}`, expected one of murmuration, lichen, waves, moon")]
    UnknownSketch(String),
    #[error("invalid colour `{0}`")]
    Colour(String),
    #[error("could not encode image: {0}")]
    Image(#[from] image::ImageError),
}
