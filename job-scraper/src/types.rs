use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("WebDriver error: '{0}'")]
    WebDriver(#[from] thirtyfour::error::WebDriverError),
    #[error("Failed to navigate to: '{0}'")]
    Navigation(String),
    #[error("Element '{selector}' not found after {attempts} attempts")]
    ElementNotFound { selector: String, attempts: u32 },
    #[error("Invalid selector: '{0}'")]
    InvalidSelector(String),
    #[error("Content not found in page: '{0}'")]
    Extraction(String),
    #[error("{failed} of {total} description fetches failed")]
    TooManyFailures { failed: usize, total: usize },
    #[error("A session pool needs at least one session")]
    EmptyPool,
}
