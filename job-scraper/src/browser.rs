use std::time::Duration;

use async_trait::async_trait;
use thirtyfour::prelude::*;

use crate::config::BrowserOptions;
use crate::types::{Error, Result};

/// The few browser capabilities the scrapers rely on.
/// Selectors are CSS selectors.
#[async_trait]
pub trait Browser: Send + Sync {
    async fn goto(&self, url: &str) -> Result<()>;

    /// Wait until the current document finished loading, best effort
    async fn wait_loaded(&self, _timeout: Duration) -> Result<()> {
        Ok(())
    }

    /// Poll for `selector` until it is present or `timeout` elapsed.
    /// `Ok(false)` means the wait timed out.
    async fn wait_for(&self, selector: &str, timeout: Duration, interval: Duration)
        -> Result<bool>;

    async fn texts(&self, selector: &str) -> Result<Vec<String>>;

    async fn attributes(&self, selector: &str, name: &str) -> Result<Vec<Option<String>>>;

    /// Text of the first element matching `selector`
    async fn text(&self, selector: &str) -> Result<String>;

    async fn close(self) -> Result<()>
    where
        Self: Sized;
}

/// A live WebDriver session, e.g. chromedriver or msedgedriver
pub struct WebDriverSession {
    driver: WebDriver,
}

impl WebDriverSession {
    pub async fn connect(options: &BrowserOptions) -> Result<Self> {
        let mut caps = DesiredCapabilities::chrome();
        for arg in options.args() {
            caps.add_chrome_arg(&arg)?;
        }
        if options.headless {
            caps.set_headless()?;
        }
        log::info!("connecting to webdriver at {}", options.webdriver_url);
        let driver = WebDriver::new(&options.webdriver_url, caps).await?;
        Ok(Self { driver })
    }
}

#[async_trait]
impl Browser for WebDriverSession {
    async fn goto(&self, url: &str) -> Result<()> {
        log::debug!("GET {}", url);
        self.driver.goto(url).await.map_err(|e| {
            log::error!("navigation to {} failed: {}", url, e);
            Error::Navigation(url.to_owned())
        })
    }

    async fn wait_loaded(&self, timeout: Duration) -> Result<()> {
        let poll = async {
            loop {
                let ret = self
                    .driver
                    .execute("return document.readyState;", Vec::new())
                    .await?;
                if ret.json().as_str() == Some("complete") {
                    return Ok::<_, Error>(());
                }
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
        };
        match tokio::time::timeout(timeout, poll).await {
            Ok(result) => result,
            Err(_) => {
                log::warn!("document did not finish loading within {:?}", timeout);
                Ok(())
            }
        }
    }

    async fn wait_for(
        &self,
        selector: &str,
        timeout: Duration,
        interval: Duration,
    ) -> Result<bool> {
        let found = self
            .driver
            .query(By::Css(selector))
            .wait(timeout, interval)
            .exists()
            .await?;
        Ok(found)
    }

    async fn texts(&self, selector: &str) -> Result<Vec<String>> {
        let elements = self.driver.find_all(By::Css(selector)).await?;
        let mut texts = Vec::with_capacity(elements.len());
        for element in elements {
            texts.push(element.text().await?);
        }
        Ok(texts)
    }

    async fn attributes(&self, selector: &str, name: &str) -> Result<Vec<Option<String>>> {
        let elements = self.driver.find_all(By::Css(selector)).await?;
        let mut values = Vec::with_capacity(elements.len());
        for element in elements {
            values.push(element.attr(name).await?);
        }
        Ok(values)
    }

    async fn text(&self, selector: &str) -> Result<String> {
        let element = self.driver.find(By::Css(selector)).await?;
        Ok(element.text().await?)
    }

    async fn close(self) -> Result<()> {
        self.driver.quit().await?;
        Ok(())
    }
}

/// One session per description worker. The first session also serves
/// the listing pages.
pub struct SessionPool<B> {
    sessions: Vec<B>,
}

impl<B: Browser> SessionPool<B> {
    pub fn new(sessions: Vec<B>) -> Result<Self> {
        if sessions.is_empty() {
            return Err(Error::EmptyPool);
        }
        Ok(Self { sessions })
    }

    pub fn primary(&self) -> &B {
        &self.sessions[0]
    }

    pub fn sessions(&self) -> &[B] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Close every session; the first error is returned after all were tried
    pub async fn close(self) -> Result<()> {
        let mut first_error = None;
        for (i, session) in self.sessions.into_iter().enumerate() {
            if let Err(e) = session.close().await {
                log::error!("failed to close browser session {}: {}", i, e);
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl SessionPool<WebDriverSession> {
    pub async fn connect(options: &BrowserOptions, size: usize) -> Result<Self> {
        if size == 0 {
            return Err(Error::EmptyPool);
        }
        let mut sessions = Vec::with_capacity(size);
        for i in 0..size {
            match WebDriverSession::connect(options).await {
                Ok(session) => sessions.push(session),
                Err(e) => {
                    log::error!("failed to open browser session {}: {}", i, e);
                    if let Ok(opened) = SessionPool::new(sessions) {
                        let _ = opened.close().await;
                    }
                    return Err(e);
                }
            }
        }
        log::info!("opened {} browser sessions", size);
        Self::new(sessions)
    }
}
