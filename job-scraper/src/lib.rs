pub mod browser;
pub mod config;
pub mod html;
pub mod types;
pub mod wait;
pub mod zhipin;

pub use browser::{Browser, SessionPool, WebDriverSession};
pub use config::{BrowserOptions, ScrapeSettings, Timing};
pub use types::{Error, Result};
pub use zhipin::description::{collect_descriptions, fetch_description, Collected};
pub use zhipin::listing::{fetch_listings, scrape_page, ListingRow, ListingTable};
