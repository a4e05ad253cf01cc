use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use fantoccini::cookies::Cookie;
use fantoccini::{Client, ClientBuilder};
use std::time::Duration;
use time::OffsetDateTime;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::config::harvest_config::{BrowserConfig, ScrapingConfig};
use crate::fetcher::PageFetcher;
use crate::models::CookieRecord;

/// Exclusive handle on the WebDriver-controlled browser for one
/// harvesting run. Holds the session from connect to close; the caller
/// is responsible for closing it whether the run succeeded or not.
pub struct BrowserSession {
    client: Client,
    render_delay: Duration,
    max_retries: usize,
}

impl BrowserSession {
    pub async fn connect(browser: &BrowserConfig, scraping: &ScrapingConfig) -> Result<Self> {
        info!("Connecting to WebDriver at {}", browser.webdriver_url);

        let mut builder = ClientBuilder::native();
        if let Some(user_agent) = &browser.user_agent {
            let mut capabilities = serde_json::map::Map::new();
            capabilities.insert(
                "goog:chromeOptions".to_string(),
                serde_json::json!({ "args": [format!("--user-agent={}", user_agent)] }),
            );
            builder.capabilities(capabilities);
        }

        let client = builder
            .connect(&browser.webdriver_url)
            .await
            .with_context(|| {
                format!("Failed to connect to WebDriver at {}", browser.webdriver_url)
            })?;

        Ok(BrowserSession {
            client,
            render_delay: Duration::from_millis(scraping.page_render_delay_ms),
            max_retries: scraping.max_retries,
        })
    }

    /// Navigate to the site origin so cookies can be attached to it.
    pub async fn open_origin(&mut self, origin: &str) -> Result<()> {
        self.client
            .goto(origin)
            .await
            .with_context(|| format!("Failed to open {}", origin))?;
        Ok(())
    }

    /// Restore persisted cookies into the live session. Cookies the
    /// browser rejects are logged and skipped; the run proceeds without
    /// them.
    pub async fn apply_cookies(&mut self, records: &[CookieRecord]) -> Result<usize> {
        let mut applied = 0;
        for record in records {
            match self.client.add_cookie(to_webdriver_cookie(record)).await {
                Ok(()) => {
                    applied += 1;
                }
                Err(e) => {
                    warn!("Could not restore cookie {}: {}", record.name, e);
                }
            }
        }
        info!("Restored {} of {} cookies", applied, records.len());
        Ok(applied)
    }

    /// Snapshot the session's current cookies for persistence.
    pub async fn export_cookies(&mut self) -> Result<Vec<CookieRecord>> {
        let cookies = self
            .client
            .get_all_cookies()
            .await
            .context("Failed to read cookies from browser")?;
        Ok(cookies.iter().map(from_webdriver_cookie).collect())
    }

    pub async fn close(self) -> Result<()> {
        self.client
            .close()
            .await
            .context("Failed to close browser session")
    }

    async fn load_page(&mut self, url: &str) -> Result<String> {
        self.client
            .goto(url)
            .await
            .with_context(|| format!("Navigation to {} failed", url))?;

        // Give client-side rendering time to finish before reading.
        sleep(self.render_delay).await;

        let html = self
            .client
            .source()
            .await
            .with_context(|| format!("Failed to read page source for {}", url))?;

        if html.is_empty() {
            return Err(anyhow!("Empty page source for {}", url));
        }

        Ok(html)
    }
}

#[async_trait]
impl PageFetcher for BrowserSession {
    async fn fetch_page(&mut self, url: &str) -> Result<String> {
        let mut attempts = 0;

        while attempts < self.max_retries {
            match self.load_page(url).await {
                Ok(html) => return Ok(html),
                Err(e) => {
                    attempts += 1;
                    if attempts < self.max_retries {
                        // Exponential backoff with jitter
                        let delay = Duration::from_millis(
                            1000 * 2_u64.pow(attempts as u32) + rand::random::<u64>() % 1000,
                        );
                        warn!(
                            "Attempt {} failed for {}, retrying in {:?}: {}",
                            attempts, url, delay, e
                        );
                        sleep(delay).await;
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        Err(anyhow!(
            "Failed to fetch {} after {} attempts",
            url,
            self.max_retries
        ))
    }
}

fn to_webdriver_cookie(record: &CookieRecord) -> Cookie<'static> {
    let mut cookie = Cookie::new(record.name.clone(), record.value.clone());
    if let Some(domain) = &record.domain {
        cookie.set_domain(domain.clone());
    }
    cookie.set_path(record.path.clone());
    cookie.set_secure(record.secure);
    cookie.set_http_only(record.http_only);
    if let Some(expiry) = record.expiry {
        if let Ok(expires) = OffsetDateTime::from_unix_timestamp(expiry) {
            cookie.set_expires(expires);
        }
    }
    cookie
}

fn from_webdriver_cookie(cookie: &Cookie<'static>) -> CookieRecord {
    CookieRecord {
        name: cookie.name().to_string(),
        value: cookie.value().to_string(),
        domain: cookie.domain().map(|d| d.to_string()),
        path: cookie.path().unwrap_or("/").to_string(),
        secure: cookie.secure().unwrap_or(false),
        http_only: cookie.http_only().unwrap_or(false),
        expiry: cookie.expires_datetime().map(|dt| dt.unix_timestamp()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_record_round_trip() {
        let record = CookieRecord {
            name: "session-token".to_string(),
            value: "opaque".to_string(),
            domain: Some("example.com".to_string()),
            path: "/".to_string(),
            secure: true,
            http_only: true,
            expiry: Some(1_900_000_000),
        };

        let cookie = to_webdriver_cookie(&record);
        assert_eq!(from_webdriver_cookie(&cookie), record);
    }

    #[test]
    fn test_session_cookie_has_no_expiry() {
        let record = CookieRecord {
            name: "csm-hit".to_string(),
            value: "x".to_string(),
            domain: None,
            path: "/".to_string(),
            secure: false,
            http_only: false,
            expiry: None,
        };

        let cookie = to_webdriver_cookie(&record);
        assert!(cookie.expires_datetime().is_none());
    }
}
