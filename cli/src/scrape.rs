use std::path::PathBuf;

use futures::{stream, StreamExt, TryStreamExt};
use job_scraper::{fetch_listings, Browser};
use persistence::{listing_filename, write_table};

use crate::config::{City, Config};
use crate::types::Result;

/// Scrape every result page of `job` in `city` and store the rows as
/// `{output_dir}/{job}_{city}.csv`. Nothing is written if a page fails.
pub async fn fetch_job_info<B: Browser>(
    browser: &B,
    job: &str,
    city: &City,
    config: &Config,
) -> Result<PathBuf> {
    log::info!("scraping '{}' in {} ({})", job, city.name, city.code);
    let table = fetch_listings(browser, job, &city.code, &config.scrape).await?;
    let path = listing_path(job, city, config);
    write_table(&path, &table)?;
    Ok(path)
}

pub fn listing_path(job: &str, city: &City, config: &Config) -> PathBuf {
    config.output_dir.join(listing_filename(job, &city.name))
}

/// Listing files for every configured job and city, one after another
pub async fn scrape<B: Browser>(browser: &B, config: &Config) -> Result<Vec<PathBuf>> {
    let pairs = config
        .jobs
        .iter()
        .flat_map(|job| config.cities.iter().map(move |city| (job, city)));
    stream::iter(pairs)
        .then(|(job, city)| fetch_job_info(browser, job, city, config))
        .try_collect()
        .await
}
