use std::path::PathBuf;

use crate::types::Result;

/// Turns raw text into a word cloud image stored on disk
pub trait CloudRenderer {
    /// Render `text` for the job title `title`, returns the written file
    fn render(&self, title: &str, text: &str) -> Result<PathBuf>;
}
