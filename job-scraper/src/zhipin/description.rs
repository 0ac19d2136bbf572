use futures::future::join_all;

use super::{open, JOB_DESCRIPTION};
use crate::browser::{Browser, SessionPool};
use crate::config::ScrapeSettings;
use crate::types::{Error, Result};
use crate::wait::await_selector;

/// Fetch the description text of a single job posting.
/// `Ok(None)` means the page loaded but had no usable description.
pub async fn fetch_description<B: Browser>(
    browser: &B,
    url: &str,
    settings: &ScrapeSettings,
) -> Result<Option<String>> {
    open(browser, url, &settings.timing).await?;
    await_selector(browser, JOB_DESCRIPTION, settings.max_retries, &settings.timing).await?;

    match browser.text(JOB_DESCRIPTION).await {
        Ok(text) if !text.trim().is_empty() => Ok(Some(text)),
        Ok(_) => {
            log::warn!("empty job description, url: {}", url);
            Ok(None)
        }
        Err(e) => {
            log::error!("failed to read job description, url: {}, error: {}", url, e);
            Ok(None)
        }
    }
}

#[derive(Debug)]
pub enum Outcome {
    Found(String),
    Absent,
    Failed(Error),
}

/// Descriptions of a batch of links, in link order
#[derive(Debug, Default)]
pub struct Collected {
    pub descriptions: Vec<String>,
    pub absent: usize,
    pub failures: Vec<(String, Error)>,
}

impl Collected {
    fn from_outcomes(links: &[String], outcomes: Vec<(usize, Outcome)>) -> Self {
        let mut collected = Collected::default();
        for (i, outcome) in outcomes {
            match outcome {
                Outcome::Found(text) => collected.descriptions.push(text),
                Outcome::Absent => collected.absent += 1,
                Outcome::Failed(e) => collected.failures.push((links[i].clone(), e)),
            }
        }
        collected
    }
}

/// Fetch descriptions for `links` with one worker per pooled session.
/// Links are dealt round-robin; each worker walks its share in order.
pub async fn collect_descriptions<B: Browser>(
    pool: &SessionPool<B>,
    links: &[String],
    settings: &ScrapeSettings,
) -> Result<Collected> {
    let width = pool.len();
    let workers = pool.sessions().iter().enumerate().map(|(w, session)| async move {
        let mut outcomes = Vec::new();
        for i in (w..links.len()).step_by(width) {
            let link = &links[i];
            log::debug!("[worker {}] fetching {}", w, link);
            let outcome = match fetch_description(session, link, settings).await {
                Ok(Some(text)) => Outcome::Found(text),
                Ok(None) => Outcome::Absent,
                Err(e) => {
                    log::error!("[worker {}] description fetch failed for {}: {}", w, link, e);
                    Outcome::Failed(e)
                }
            };
            outcomes.push((i, outcome));
        }
        outcomes
    });

    let mut outcomes = join_all(workers)
        .await
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();
    outcomes.sort_by_key(|(i, _)| *i);
    let collected = Collected::from_outcomes(links, outcomes);

    let total = links.len();
    let failed = collected.failures.len();
    log::info!(
        "collected {} descriptions from {} links ({} absent, {} failed)",
        collected.descriptions.len(),
        total,
        collected.absent,
        failed
    );
    if total > 0 && ((total - failed) as f64 / total as f64) < settings.min_success_ratio {
        return Err(Error::TooManyFailures { failed, total });
    }
    Ok(collected)
}
