use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Scraping failed: {0}")]
    Scraper(#[from] job_scraper::Error),
    #[error("Persistence failed: {0}")]
    Persistence(#[from] persistence::Error),
    #[error("Analysis failed: {0}")]
    Analyzer(#[from] text_analyzer::Error),
}
