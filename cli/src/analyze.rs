use std::path::{Path, PathBuf};

use job_scraper::{collect_descriptions, Browser, SessionPool};
use text_analyzer::keywords::shorten_keywords;
use text_analyzer::tfidf::TfIdf;
use text_analyzer::CloudRenderer;

use crate::config::Config;
use crate::types::Result;

const TOP_TERMS: usize = 20;

/// Read the links of a listing file back and fetch every description
pub async fn job_descriptions<B: Browser>(
    pool: &SessionPool<B>,
    listing: &Path,
    config: &Config,
) -> Result<Vec<String>> {
    let links = persistence::read_links(listing)?;
    log::info!("{} links read from {}", links.len(), listing.display());
    let collected = collect_descriptions(pool, &links, &config.scrape).await?;
    for (link, e) in &collected.failures {
        log::warn!("no description for {}: {}", link, e);
    }
    Ok(collected.descriptions)
}

/// TF-IDF summary and word cloud for all descriptions of one job
pub fn analyze<R: CloudRenderer>(
    job: &str,
    descriptions: &[String],
    renderer: &R,
    config: &Config,
) -> Result<PathBuf> {
    let tfidf = TfIdf::fit(descriptions);
    log::info!(
        "'{}': {} descriptions, {} distinct terms",
        job,
        tfidf.rows.len(),
        tfidf.vocabulary.len()
    );
    let top = tfidf
        .top_terms(TOP_TERMS)
        .iter()
        .map(|(term, weight)| format!("{}={:.3}", term, weight))
        .collect::<Vec<_>>();
    log::info!("'{}' top terms: {}", job, top.join(", "));

    let text = descriptions.join(" ");
    let text = match config.max_keyword_length {
        Some(max_length) => shorten_keywords(&text, max_length),
        None => text,
    };
    Ok(renderer.render(job, &text)?)
}
