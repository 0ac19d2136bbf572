use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use scraper::{Html, Selector};

use crate::browser::Browser;
use crate::types::{Error, Result};

/// Serves a fixed set of HTML documents by URL, for offline scraping and tests.
/// Cloning shares the documents but not the current page.
#[derive(Default)]
pub struct HtmlPages {
    pages: Arc<HashMap<String, String>>,
    current: Mutex<Option<String>>,
}

impl HtmlPages {
    pub fn new(pages: HashMap<String, String>) -> Self {
        Self {
            pages: Arc::new(pages),
            current: Mutex::new(None),
        }
    }

    fn with_document<T>(&self, f: impl FnOnce(&Html) -> Result<T>) -> Result<T> {
        let current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        let url = current
            .as_ref()
            .ok_or_else(|| Error::Extraction("no page loaded".to_owned()))?;
        let body = self
            .pages
            .get(url)
            .ok_or_else(|| Error::Navigation(url.clone()))?;
        let doc = Html::parse_document(body);
        f(&doc)
    }
}

impl Clone for HtmlPages {
    fn clone(&self) -> Self {
        Self {
            pages: self.pages.clone(),
            current: Mutex::new(None),
        }
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|_| Error::InvalidSelector(selector.to_owned()))
}

fn element_text(el: scraper::ElementRef) -> String {
    el.text().collect::<String>().trim().to_owned()
}

#[async_trait]
impl Browser for HtmlPages {
    async fn goto(&self, url: &str) -> Result<()> {
        if !self.pages.contains_key(url) {
            return Err(Error::Navigation(url.to_owned()));
        }
        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = Some(url.to_owned());
        Ok(())
    }

    async fn wait_for(
        &self,
        selector: &str,
        _timeout: Duration,
        _interval: Duration,
    ) -> Result<bool> {
        let selector = parse_selector(selector)?;
        self.with_document(|doc| Ok(doc.select(&selector).next().is_some()))
    }

    async fn texts(&self, selector: &str) -> Result<Vec<String>> {
        let selector = parse_selector(selector)?;
        self.with_document(|doc| Ok(doc.select(&selector).map(element_text).collect()))
    }

    async fn attributes(&self, selector: &str, name: &str) -> Result<Vec<Option<String>>> {
        let selector = parse_selector(selector)?;
        self.with_document(|doc| {
            Ok(doc
                .select(&selector)
                .map(|el| el.value().attr(name).map(String::from))
                .collect())
        })
    }

    async fn text(&self, selector: &str) -> Result<String> {
        let parsed = parse_selector(selector)?;
        self.with_document(|doc| {
            doc.select(&parsed)
                .next()
                .map(element_text)
                .ok_or_else(|| Error::Extraction(selector.to_owned()))
        })
    }

    async fn close(self) -> Result<()> {
        Ok(())
    }
}
