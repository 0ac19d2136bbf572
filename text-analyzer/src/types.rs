use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File error: '{0}'")]
    Io(#[from] std::io::Error),
    #[error("Font file could not be parsed: '{0}'")]
    Font(PathBuf),
    #[error("Image error: '{0}'")]
    Image(#[from] image::ImageError),
    #[error("No words left to draw")]
    EmptyText,
}
