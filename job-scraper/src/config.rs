use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Launch flags for the WebDriver sessions
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct BrowserOptions {
    pub webdriver_url: String,
    pub start_maximized: bool,
    pub disable_infobars: bool,
    pub disable_extensions: bool,
    pub window_size: Option<(u32, u32)>,
    pub headless: bool,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:9515".to_owned(),
            start_maximized: true,
            disable_infobars: true,
            disable_extensions: true,
            window_size: Some((1920, 1080)),
            headless: false,
        }
    }
}

impl BrowserOptions {
    /// Command line arguments passed to the browser binary
    pub fn args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if self.start_maximized {
            args.push("--start-maximized".to_owned());
        }
        if self.disable_infobars {
            args.push("--disable-infobars".to_owned());
        }
        if self.disable_extensions {
            args.push("--disable-extensions".to_owned());
        }
        if let Some((width, height)) = self.window_size {
            args.push(format!("--window-size={},{}", width, height));
        }
        args
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Timing {
    pub element_timeout_ms: u64,
    pub poll_interval_ms: u64,
    pub retry_backoff_ms: u64,
    pub load_timeout_ms: u64,
    pub settle_delay_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            element_timeout_ms: 10_000,
            poll_interval_ms: 500,
            retry_backoff_ms: 3_000,
            load_timeout_ms: 10_000,
            settle_delay_ms: 0,
        }
    }
}

impl Timing {
    pub fn element_timeout(&self) -> Duration {
        Duration::from_millis(self.element_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    pub fn load_timeout(&self) -> Duration {
        Duration::from_millis(self.load_timeout_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

/// Everything the scraping side needs to know, built once at startup
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ScrapeSettings {
    pub base_url: String,
    pub max_retries: u32,
    pub page_count: u32,
    /// width of the description worker pool, one browser session each
    pub workers: usize,
    /// share of description fetches that must not fail for a collection to succeed
    pub min_success_ratio: f64,
    pub timing: Timing,
}

impl Default for ScrapeSettings {
    fn default() -> Self {
        Self {
            base_url: "https://www.zhipin.com".to_owned(),
            max_retries: 5,
            page_count: 3,
            workers: 5,
            min_success_ratio: 0.8,
            timing: Timing::default(),
        }
    }
}
