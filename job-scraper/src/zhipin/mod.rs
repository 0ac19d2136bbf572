pub mod description;
pub mod listing;

use crate::browser::Browser;
use crate::config::Timing;
use crate::types::Result;

pub(crate) const JOB_NAME: &str = ".job-name";
pub(crate) const COMPANY_NAME: &str = ".company-info .company-name";
pub(crate) const JOB_AREA: &str = ".job-area-wrapper";
pub(crate) const SALARY: &str = ".salary";
pub(crate) const JOB_LINK: &str = "a.job-card-left";
pub(crate) const JOB_DESCRIPTION: &str = ".job-sec-text";

/// URL of one result page of a job search in one city, pages start at 1
pub fn search_url(base_url: &str, job: &str, city_code: &str, page: u32) -> String {
    format!(
        "{}/web/geek/job?query={}&city={}&page={}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(job),
        city_code,
        page
    )
}

/// Navigate and let the page settle before anything is queried
async fn open<B: Browser>(browser: &B, url: &str, timing: &Timing) -> Result<()> {
    browser.goto(url).await?;
    browser.wait_loaded(timing.load_timeout()).await?;
    let settle = timing.settle_delay();
    if !settle.is_zero() {
        tokio::time::sleep(settle).await;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_search_url() {
        assert_eq!(
            search_url("https://www.zhipin.com", "Rust", "101200100", 2),
            "https://www.zhipin.com/web/geek/job?query=Rust&city=101200100&page=2"
        );
    }

    #[test]
    fn test_search_url_encodes_query() {
        let url = search_url("https://www.zhipin.com/", "后端开发", "101200100", 1);
        assert_eq!(
            url,
            "https://www.zhipin.com/web/geek/job?query=%E5%90%8E%E7%AB%AF%E5%BC%80%E5%8F%91&city=101200100&page=1"
        );
    }
}
