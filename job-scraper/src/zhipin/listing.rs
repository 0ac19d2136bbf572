use async_stream::stream;
use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use url::Url;

use super::{open, search_url, COMPANY_NAME, JOB_AREA, JOB_LINK, JOB_NAME, SALARY};
use crate::browser::Browser;
use crate::config::ScrapeSettings;
use crate::types::{Error, Result};
use crate::wait::await_selector;

/// One job card of a search result page
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    #[serde(rename = "职位名称")]
    pub title: String,
    #[serde(rename = "公司名称")]
    pub company: String,
    #[serde(rename = "位置")]
    pub location: String,
    #[serde(rename = "工资")]
    pub salary: String,
    #[serde(rename = "职位链接")]
    pub link: String,
}

pub type ListingTable = Vec<ListingRow>;

/// Scrape the job cards of one search page.
/// Extraction problems are logged and yield an empty table, only navigation
/// and the element wait can fail.
pub async fn scrape_page<B: Browser>(
    browser: &B,
    url: &str,
    settings: &ScrapeSettings,
) -> Result<ListingTable> {
    open(browser, url, &settings.timing).await?;
    await_selector(browser, JOB_NAME, settings.max_retries, &settings.timing).await?;

    match extract_listings(browser, url).await {
        Ok(table) => {
            log::info!("found {} jobs on {}", table.len(), url);
            Ok(table)
        }
        Err(e) => {
            log::error!("failed to scrape {}: {}", url, e);
            Ok(ListingTable::new())
        }
    }
}

async fn extract_listings<B: Browser>(browser: &B, page_url: &str) -> Result<ListingTable> {
    let page_url = Url::parse(page_url).map_err(|e| Error::Extraction(e.to_string()))?;
    let titles = browser.texts(JOB_NAME).await?;
    let companies = browser.texts(COMPANY_NAME).await?;
    let locations = browser.texts(JOB_AREA).await?;
    let salaries = browser.texts(SALARY).await?;
    let links = browser.attributes(JOB_LINK, "href").await?;

    let counts = [
        titles.len(),
        companies.len(),
        locations.len(),
        salaries.len(),
        links.len(),
    ];
    let rows = counts.iter().copied().min().unwrap_or(0);
    if counts.iter().any(|&c| c != rows) {
        log::warn!(
            "column counts differ (titles, companies, locations, salaries, links) = {:?}, keeping {} rows",
            counts,
            rows
        );
    }

    let table = titles
        .into_iter()
        .zip(companies)
        .zip(locations)
        .zip(salaries)
        .zip(links)
        .map(|((((title, company), location), salary), link)| ListingRow {
            title,
            company,
            location,
            salary,
            link: link.map(|href| absolute_link(&page_url, &href)).unwrap_or_default(),
        })
        .collect();
    Ok(table)
}

/// Job cards link relative to the site, resolve them against the page
fn absolute_link(page_url: &Url, href: &str) -> String {
    match page_url.join(href) {
        Ok(link) => link.into(),
        Err(e) => {
            log::warn!("cannot resolve link '{}': {}", href, e);
            href.to_owned()
        }
    }
}

/// Result pages `1..=page_count` of one job search, in page order
pub fn listing_pages<'a, B: Browser>(
    browser: &'a B,
    job: &'a str,
    city_code: &'a str,
    settings: &'a ScrapeSettings,
) -> impl Stream<Item = Result<ListingTable>> + 'a {
    stream! {
        for page in 1..=settings.page_count {
            let url = search_url(&settings.base_url, job, city_code, page);
            log::info!("GET {}", url);
            yield scrape_page(browser, &url, settings).await;
        }
    }
}

/// All listings of one job search in one city, pages concatenated in order
pub async fn fetch_listings<B: Browser>(
    browser: &B,
    job: &str,
    city_code: &str,
    settings: &ScrapeSettings,
) -> Result<ListingTable> {
    let pages = listing_pages(browser, job, city_code, settings);
    futures::pin_mut!(pages);
    let mut table = ListingTable::new();
    while let Some(page) = pages.next().await {
        table.extend(page?);
    }
    log::info!(
        "scraped {} listings for '{}' in city {}",
        table.len(),
        job,
        city_code
    );
    Ok(table)
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use super::*;
    use crate::html::HtmlPages;

    fn job_card(title: &str, link: &str) -> String {
        format!(
            r#"<li>
                <a class="job-card-left" href="{link}">
                    <span class="job-name">{title}</span>
                    <span class="job-area-wrapper">武汉·洪山区</span>
                    <span class="salary">15-25K</span>
                </a>
                <div class="company-info"><h3 class="company-name">{title} Co</h3></div>
            </li>"#
        )
    }

    fn settings() -> ScrapeSettings {
        let mut settings = ScrapeSettings::default();
        settings.base_url = "https://jobs.test".to_owned();
        settings.max_retries = 2;
        settings.timing.retry_backoff_ms = 0;
        settings
    }

    fn result_page(cards: &[String]) -> String {
        format!("<html><body><ul>{}</ul></body></html>", cards.join(""))
    }

    #[tokio::test]
    async fn test_scrape_page_rows() {
        let url = "https://jobs.test/p".to_owned();
        let body = result_page(&[job_card("Rust", "/job/1"), job_card("Go", "/job/2")]);
        let browser = HtmlPages::new(HashMap::from([(url.clone(), body)]));
        let table = scrape_page(&browser, &url, &settings()).await.unwrap();
        assert_eq!(
            table[0],
            ListingRow {
                title: "Rust".to_owned(),
                company: "Rust Co".to_owned(),
                location: "武汉·洪山区".to_owned(),
                salary: "15-25K".to_owned(),
                link: "https://jobs.test/job/1".to_owned(),
            }
        );
        assert_eq!(table[1].link, "https://jobs.test/job/2");
    }

    #[tokio::test]
    async fn test_links_are_resolved_against_the_page() {
        let url = "https://jobs.test/web/geek/job?query=Rust&page=1".to_owned();
        let body = result_page(&[
            job_card("Rust", "/job_detail/1.html"),
            job_card("Go", "https://other.test/job_detail/2.html"),
        ]);
        let browser = HtmlPages::new(HashMap::from([(url.clone(), body)]));
        let table = scrape_page(&browser, &url, &settings()).await.unwrap();
        let links: Vec<&str> = table.iter().map(|r| r.link.as_str()).collect();
        assert_eq!(
            links,
            vec![
                "https://jobs.test/job_detail/1.html",
                "https://other.test/job_detail/2.html"
            ]
        );
    }

    #[tokio::test]
    async fn test_unequal_columns_truncate_to_shortest() {
        let url = "https://jobs.test/p".to_owned();
        let mut cards: Vec<String> = (0..5)
            .map(|i| job_card(&format!("job {}", i), &format!("/job/{}", i)))
            .collect();
        cards[4] = cards[4].replace(r#"<span class="salary">15-25K</span>"#, "");
        let browser = HtmlPages::new(HashMap::from([(url.clone(), result_page(&cards))]));
        let table = scrape_page(&browser, &url, &settings()).await.unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table[3].title, "job 3");
    }

    #[tokio::test]
    async fn test_missing_job_names_exhaust_retries() {
        let url = "https://jobs.test/p".to_owned();
        let browser = HtmlPages::new(HashMap::from([(url.clone(), result_page(&[]))]));
        let err = scrape_page(&browser, &url, &settings()).await.unwrap_err();
        assert!(matches!(err, Error::ElementNotFound { attempts: 2, .. }));
    }

    #[tokio::test]
    async fn test_fetch_listings_concatenates_pages_in_order() {
        let settings = settings();
        let rows_per_page = 3;
        let mut pages = HashMap::new();
        for page in 1..=settings.page_count {
            let cards: Vec<String> = (0..rows_per_page)
                .map(|i| job_card(&format!("p{} r{}", page, i), &format!("/job/{}/{}", page, i)))
                .collect();
            pages.insert(
                search_url(&settings.base_url, "Rust", "001", page),
                result_page(&cards),
            );
        }
        let browser = HtmlPages::new(pages);
        let table = fetch_listings(&browser, "Rust", "001", &settings)
            .await
            .unwrap();
        assert_eq!(table.len(), rows_per_page * settings.page_count as usize);
        let titles: Vec<&str> = table.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["p1 r0", "p1 r1", "p1 r2", "p2 r0", "p2 r1", "p2 r2", "p3 r0", "p3 r1", "p3 r2"]
        );
    }

    #[tokio::test]
    async fn test_fetch_listings_stops_at_unreachable_page() {
        let settings = settings();
        let url = search_url(&settings.base_url, "Rust", "001", 1);
        let browser = HtmlPages::new(HashMap::from([(
            url,
            result_page(&[job_card("Rust", "/job/1")]),
        )]));
        let err = fetch_listings(&browser, "Rust", "001", &settings)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Navigation(_)));
    }
}
