pub mod api;
pub mod keywords;
pub mod tfidf;
pub mod types;
pub mod wordcloud;

pub use api::CloudRenderer;
pub use types::{Error, Result};
