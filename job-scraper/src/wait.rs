use crate::browser::Browser;
use crate::config::Timing;
use crate::types::{Error, Result};

/// Wait for `selector` to show up, retrying up to `max_attempts` times with a
/// fixed backoff in between. Returns the number of attempts it took.
pub async fn await_selector<B: Browser + ?Sized>(
    browser: &B,
    selector: &str,
    max_attempts: u32,
    timing: &Timing,
) -> Result<u32> {
    let mut attempt = 0;
    while attempt < max_attempts {
        let found = browser
            .wait_for(selector, timing.element_timeout(), timing.poll_interval())
            .await?;
        if found {
            if attempt > 0 {
                log::info!("retry for '{}' succeeded", selector);
            }
            return Ok(attempt + 1);
        }
        attempt += 1;
        log::warn!(
            "attempt {}/{} for '{}' failed, retrying...",
            attempt,
            max_attempts,
            selector
        );
        log::warn!("the site may be asking for a manual verification, check the browser window");
        if attempt < max_attempts {
            tokio::time::sleep(timing.retry_backoff()).await;
        }
    }
    Err(Error::ElementNotFound {
        selector: selector.to_owned(),
        attempts: attempt,
    })
}
