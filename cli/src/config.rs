use std::path::{Path, PathBuf};

use job_scraper::{BrowserOptions, ScrapeSettings};
use serde::{Deserialize, Serialize};
use text_analyzer::wordcloud::WordCloudOptions;

use crate::types::{Error, Result};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct City {
    /// site specific city code used in search URLs
    pub code: String,
    /// human readable name, used in file names
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
    pub jobs: Vec<String>,
    pub cities: Vec<City>,
    pub browser: BrowserOptions,
    pub scrape: ScrapeSettings,
    /// longest keyword kept for the word cloud, `null` keeps every word
    pub max_keyword_length: Option<usize>,
    pub word_cloud: WordCloudOptions,
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            jobs: vec!["后端开发".to_owned(), "软件测试".to_owned()],
            cities: vec![City {
                code: "101200100".to_owned(),
                name: "武汉".to_owned(),
            }],
            browser: BrowserOptions::default(),
            scrape: ScrapeSettings::default(),
            max_keyword_length: Some(7),
            word_cloud: WordCloudOptions::default(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Read the configuration file if one is given, apply the environment and validate
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let data = std::fs::read_to_string(path).map_err(|e| {
                    Error::Config(format!("cannot read {}: {}", path.display(), e))
                })?;
                Self::from_json(&data)?
            }
            None => Self::default(),
        };
        config.apply_env(std::env::var("WEBDRIVER_URL").ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(data: &str) -> Result<Self> {
        serde_json::from_str(data).map_err(|e| Error::Config(e.to_string()))
    }

    fn apply_env(&mut self, webdriver_url: Option<String>) {
        if let Some(url) = webdriver_url.filter(|url| !url.is_empty()) {
            log::debug!("WebDriver URL taken from environment: {}", url);
            self.browser.webdriver_url = url;
        }
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(Error::Config(msg.to_owned()));
        if self.jobs.is_empty() {
            return invalid("no jobs configured");
        }
        if self.cities.is_empty() {
            return invalid("no cities configured");
        }
        if self.scrape.max_retries == 0 {
            return invalid("scrape.max_retries must be at least 1");
        }
        if self.scrape.page_count == 0 {
            return invalid("scrape.page_count must be at least 1");
        }
        if self.scrape.workers == 0 {
            return invalid("scrape.workers must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.scrape.min_success_ratio) {
            return invalid("scrape.min_success_ratio must be between 0 and 1");
        }
        if self.max_keyword_length == Some(0) {
            return invalid("max_keyword_length must be at least 1");
        }
        if self.word_cloud.min_font_size > self.word_cloud.max_font_size {
            return invalid("word_cloud.min_font_size exceeds max_font_size");
        }
        if self.word_cloud.width == 0 || self.word_cloud.height == 0 {
            return invalid("word_cloud canvas must not be empty");
        }
        Ok(())
    }
}
