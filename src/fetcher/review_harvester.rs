use anyhow::{Context, Result};
use async_trait::async_trait;
use regex::Regex;
use tracing::info;
use url::Url;

use crate::config::harvest_config::ScrapingConfig;
use crate::models::Review;
use crate::processor::ReviewExtractor;

/// Source of rendered page HTML. The production implementation drives a
/// browser; tests substitute canned pages.
#[async_trait]
pub trait PageFetcher {
    async fn fetch_page(&mut self, url: &str) -> Result<String>;
}

/// Pull the ten-character product identifier out of a `/dp/` path
/// segment. Returns None when the locator has no such segment.
pub fn extract_product_id(product_url: &str) -> Option<String> {
    let re = Regex::new(r"/dp/([A-Z0-9]{10})").unwrap();
    re.captures(product_url)
        .map(|captures| captures[1].to_string())
}

/// Scheme + host of the product locator, used to establish a browser
/// context before restoring cookies.
pub fn site_origin(product_url: &str) -> Result<String> {
    let url = Url::parse(product_url)
        .with_context(|| format!("Invalid product URL: {}", product_url))?;
    Ok(url.origin().ascii_serialization())
}

fn build_page_url(base_url: &str, page_param: &str, page: usize) -> Result<String> {
    let mut url =
        Url::parse(base_url).with_context(|| format!("Invalid base URL: {}", base_url))?;
    url.query_pairs_mut()
        .append_pair(page_param, &page.to_string());
    Ok(url.to_string())
}

/// Paginated review collection: fetch page, extract, append, and stop on
/// the first of review cap / page limit / missing next-page link.
pub struct ReviewHarvester {
    scraping: ScrapingConfig,
    extractor: ReviewExtractor,
}

impl ReviewHarvester {
    pub fn new(scraping: ScrapingConfig, extractor: ReviewExtractor) -> Self {
        ReviewHarvester {
            scraping,
            extractor,
        }
    }

    pub async fn harvest<F>(&self, fetcher: &mut F, base_url: &str) -> Result<Vec<Review>>
    where
        F: PageFetcher + Send,
    {
        let mut all_reviews: Vec<Review> = Vec::new();
        let mut page = 1;

        loop {
            let url = build_page_url(base_url, &self.scraping.page_param, page)?;
            info!("Fetching page {}: {}", page, url);

            let html = fetcher.fetch_page(&url).await?;
            let extraction = self.extractor.extract_page(&html);
            info!("Found {} reviews on page {}", extraction.reviews.len(), page);
            all_reviews.extend(extraction.reviews);

            if all_reviews.len() >= self.scraping.max_reviews {
                info!(
                    "Collected {} reviews, reached the cap of {}",
                    all_reviews.len(),
                    self.scraping.max_reviews
                );
                break;
            }
            if page >= self.scraping.max_pages {
                info!("Reached page limit ({}), stopping", self.scraping.max_pages);
                break;
            }
            if !extraction.has_next_page {
                info!("No next-page link on page {}, stopping", page);
                break;
            }

            page += 1;
        }

        // The cap is enforced once, after accumulation.
        all_reviews.truncate(self.scraping.max_reviews);
        Ok(all_reviews)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::harvest_config::SelectorConfig;
    use anyhow::anyhow;

    struct StubFetcher {
        pages: Vec<String>,
        requested: Vec<String>,
    }

    impl StubFetcher {
        fn new(pages: Vec<String>) -> Self {
            StubFetcher {
                pages,
                requested: Vec::new(),
            }
        }
    }

    #[async_trait]
    impl PageFetcher for StubFetcher {
        async fn fetch_page(&mut self, url: &str) -> Result<String> {
            self.requested.push(url.to_string());
            let index = self.requested.len() - 1;
            self.pages
                .get(index)
                .cloned()
                .ok_or_else(|| anyhow!("No stub page for request {}", index))
        }
    }

    fn page_html(review_count: usize, with_next: bool) -> String {
        let mut body = String::new();
        for i in 0..review_count {
            body.push_str(&format!(
                "<div data-hook=\"review\">\
                 <span data-hook=\"review-title\">Title {i}</span>\
                 <span data-hook=\"review-body\">Body {i}</span>\
                 </div>"
            ));
        }
        if with_next {
            body.push_str(
                r##"<ul class="a-pagination"><li class="a-last"><a href="#">Next</a></li></ul>"##,
            );
        }
        format!("<html><body>{body}</body></html>")
    }

    fn harvester(max_reviews: usize, max_pages: usize) -> ReviewHarvester {
        let scraping = ScrapingConfig {
            max_reviews,
            max_pages,
            ..ScrapingConfig::default()
        };
        ReviewHarvester::new(scraping, ReviewExtractor::from_config(&SelectorConfig::default()))
    }

    const BASE: &str = "https://www.example.com/product-reviews/B000000000";

    #[tokio::test]
    async fn test_review_cap_stops_pagination_and_truncates_once() {
        let mut fetcher = StubFetcher::new(vec![
            page_html(3, true),
            page_html(3, true),
            page_html(3, true),
        ]);

        let reviews = harvester(5, 10).harvest(&mut fetcher, BASE).await.unwrap();
        assert_eq!(reviews.len(), 5);
        // The cap fired after the second page; the third was never fetched.
        assert_eq!(fetcher.requested.len(), 2);
    }

    #[tokio::test]
    async fn test_page_limit_stops_pagination() {
        let mut fetcher = StubFetcher::new(vec![page_html(2, true), page_html(2, true)]);

        let reviews = harvester(100, 2).harvest(&mut fetcher, BASE).await.unwrap();
        assert_eq!(reviews.len(), 4);
        assert_eq!(fetcher.requested.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_next_link_stops_pagination() {
        let mut fetcher = StubFetcher::new(vec![page_html(2, false), page_html(2, true)]);

        let reviews = harvester(100, 10).harvest(&mut fetcher, BASE).await.unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(fetcher.requested.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_page_leaves_collection_unchanged() {
        let mut fetcher = StubFetcher::new(vec![
            page_html(3, true),
            page_html(0, true),
            page_html(3, false),
        ]);

        let reviews = harvester(100, 10).harvest(&mut fetcher, BASE).await.unwrap();
        // The empty middle page contributed nothing but did not stop the loop.
        assert_eq!(reviews.len(), 6);
        assert_eq!(fetcher.requested.len(), 3);
    }

    #[tokio::test]
    async fn test_page_urls_carry_counter_and_existing_query() {
        let base = format!("{}?ref=cm_cr", BASE);
        let mut fetcher = StubFetcher::new(vec![page_html(1, true), page_html(1, false)]);

        harvester(100, 10).harvest(&mut fetcher, &base).await.unwrap();
        assert!(fetcher.requested[0].contains("ref=cm_cr"));
        assert!(fetcher.requested[0].contains("pageNumber=1"));
        assert!(fetcher.requested[1].contains("pageNumber=2"));
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates() {
        let mut fetcher = StubFetcher::new(vec![]);
        let result = harvester(10, 10).harvest(&mut fetcher, BASE).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_extract_product_id() {
        assert_eq!(
            extract_product_id("https://example/dp/B000000000"),
            Some("B000000000".to_string())
        );
        assert_eq!(
            extract_product_id("https://www.amazon.in/item/dp/B09G9FPHY3/ref=sr_1_3"),
            Some("B09G9FPHY3".to_string())
        );
        assert_eq!(extract_product_id("https://example.com/gp/product"), None);
        assert_eq!(extract_product_id("https://example.com/dp/short"), None);
    }

    #[test]
    fn test_site_origin() {
        assert_eq!(
            site_origin("https://www.example.com/dp/B000000000?ref=x").unwrap(),
            "https://www.example.com"
        );
        assert!(site_origin("not a url").is_err());
    }

    #[test]
    fn test_build_page_url_appends_query_pair() {
        let url = build_page_url("https://example.com/reviews", "pageNumber", 3).unwrap();
        assert_eq!(url, "https://example.com/reviews?pageNumber=3");

        let url = build_page_url("https://example.com/reviews?ref=abc", "pageNumber", 2).unwrap();
        assert_eq!(url, "https://example.com/reviews?ref=abc&pageNumber=2");
    }
}
