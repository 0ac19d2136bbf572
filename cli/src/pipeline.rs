use std::path::PathBuf;

use job_scraper::{Browser, SessionPool};
use text_analyzer::CloudRenderer;

use crate::analyze::{analyze, job_descriptions};
use crate::config::Config;
use crate::scrape::{fetch_job_info, listing_path};
use crate::types::Result;

/// Per job: listings and descriptions for every city, then one word cloud.
/// With `rescrape` unset the listing files of an earlier run are reused.
pub async fn run<B: Browser, R: CloudRenderer>(
    pool: &SessionPool<B>,
    renderer: &R,
    config: &Config,
    rescrape: bool,
) -> Result<Vec<PathBuf>> {
    let mut clouds = Vec::new();
    for job in &config.jobs {
        let mut descriptions = Vec::new();
        for city in &config.cities {
            let listing = if rescrape {
                fetch_job_info(pool.primary(), job, city, config).await?
            } else {
                listing_path(job, city, config)
            };
            descriptions.extend(job_descriptions(pool, &listing, config).await?);
        }
        clouds.push(analyze(job, &descriptions, renderer, config)?);
    }
    Ok(clouds)
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use job_scraper::html::HtmlPages;
    use job_scraper::zhipin::search_url;

    use super::*;
    use crate::config::City;

    /// Remembers what it was asked to draw instead of drawing it
    #[derive(Default)]
    struct RecordingRenderer {
        calls: Mutex<Vec<(String, String)>>,
    }

    impl CloudRenderer for RecordingRenderer {
        fn render(&self, title: &str, text: &str) -> text_analyzer::Result<PathBuf> {
            self.calls
                .lock()
                .unwrap()
                .push((title.to_owned(), text.to_owned()));
            Ok(PathBuf::from(format!("{}_词云图.png", title)))
        }
    }

    const LISTING: &str = r#"<html><body><ul>
        <li><a class="job-card-left" href="/detail/1.html">
            <span class="job-name">X 开发</span><span class="job-area-wrapper">Y</span>
            <span class="salary">10-15K</span></a>
            <div class="company-info"><h3 class="company-name">ACME</h3></div></li>
        <li><a class="job-card-left" href="/detail/2.html">
            <span class="job-name">X 测试</span><span class="job-area-wrapper">Y</span>
            <span class="salary">8-12K</span></a>
            <div class="company-info"><h3 class="company-name">Initech</h3></div></li>
        </ul></body></html>"#;

    fn detail(text: &str) -> String {
        format!(
            r#"<html><body><div class="job-sec-text">{}</div></body></html>"#,
            text
        )
    }

    fn config(dir: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.jobs = vec!["X".to_owned()];
        config.cities = vec![City {
            code: "001".to_owned(),
            name: "Y".to_owned(),
        }];
        config.scrape.base_url = "https://jobs.test".to_owned();
        config.scrape.page_count = 1;
        config.scrape.max_retries = 1;
        config.scrape.workers = 2;
        config.output_dir = dir.to_owned();
        config
    }

    fn pool(config: &Config) -> SessionPool<HtmlPages> {
        let mut pages = HashMap::new();
        pages.insert(
            search_url(&config.scrape.base_url, "X", "001", 1),
            LISTING.to_owned(),
        );
        pages.insert(
            "https://jobs.test/detail/1.html".to_owned(),
            detail("熟悉 Rust tokio 异步编程"),
        );
        pages.insert("https://jobs.test/detail/2.html".to_owned(), detail("   "));
        let browser = HtmlPages::new(pages);
        SessionPool::new(vec![browser.clone(), browser]).unwrap()
    }

    #[tokio::test]
    async fn test_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let pool = pool(&config);
        let renderer = RecordingRenderer::default();

        let clouds = run(&pool, &renderer, &config, true).await.unwrap();
        assert_eq!(clouds, vec![PathBuf::from("X_词云图.png")]);

        let csv = std::fs::read_to_string(dir.path().join("X_Y.csv")).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "职位名称,公司名称,位置,工资,职位链接");
        // the cards link relative to the site
        let links = persistence::read_links(&dir.path().join("X_Y.csv")).unwrap();
        assert_eq!(
            links,
            vec![
                "https://jobs.test/detail/1.html",
                "https://jobs.test/detail/2.html"
            ]
        );

        let calls = renderer.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "X");
        assert_eq!(calls[0].1, "熟悉 Rust tokio 异步编程");
    }

    #[tokio::test]
    async fn test_analyze_reuses_listing_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let pool = pool(&config);
        let renderer = RecordingRenderer::default();

        run(&pool, &renderer, &config, true).await.unwrap();
        let listing = dir.path().join("X_Y.csv");
        // drop the second row, only the first link is fetched again
        let csv = std::fs::read_to_string(&listing).unwrap();
        let kept: Vec<&str> = csv.lines().take(2).collect();
        std::fs::write(&listing, kept.join("\n") + "\n").unwrap();

        run(&pool, &renderer, &config, false).await.unwrap();
        let calls = renderer.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].1, calls[0].1);
    }

    #[tokio::test]
    async fn test_keyword_filter_applies_before_rendering() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config(dir.path());
        config.max_keyword_length = Some(4);
        let pool = pool(&config);
        let renderer = RecordingRenderer::default();

        run(&pool, &renderer, &config, true).await.unwrap();
        let calls = renderer.calls.lock().unwrap();
        assert_eq!(calls[0].1, "熟悉 Rust 异步编程");
    }

    #[tokio::test]
    async fn test_missing_listing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let pool = pool(&config);
        let renderer = RecordingRenderer::default();

        let err = run(&pool, &renderer, &config, false).await.unwrap_err();
        assert!(matches!(err, crate::types::Error::Persistence(_)));
        assert!(renderer.calls.lock().unwrap().is_empty());
    }
}
