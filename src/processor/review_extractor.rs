use scraper::{ElementRef, Html, Selector};
use tracing::{info, warn};

use crate::config::harvest_config::SelectorConfig;
use crate::models::Review;

/// Ordered list of CSS selectors tried against a scope. The first
/// selector that yields a non-empty text wins; if all miss, the field
/// degrades to empty instead of failing the record.
pub struct SelectorChain {
    selectors: Vec<Selector>,
}

impl SelectorChain {
    pub fn new(patterns: &[String]) -> Self {
        let mut selectors = Vec::new();
        for pattern in patterns {
            match Selector::parse(pattern) {
                Ok(selector) => selectors.push(selector),
                Err(_) => warn!("Skipping invalid selector: {}", pattern),
            }
        }
        SelectorChain { selectors }
    }

    /// First non-empty text under `element`, whitespace-normalized.
    pub fn first_text(&self, element: ElementRef) -> Option<String> {
        for selector in &self.selectors {
            if let Some(hit) = element.select(selector).next() {
                let text = collapse_text(hit);
                if !text.is_empty() {
                    return Some(text);
                }
            }
        }
        None
    }

    /// Whether any selector in the chain matches anywhere in the document.
    pub fn matches_document(&self, document: &Html) -> bool {
        self.selectors
            .iter()
            .any(|selector| document.select(selector).next().is_some())
    }
}

fn collapse_text(element: ElementRef) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Result of extracting one page: the records found plus whether a
/// next-page affordance was present.
#[derive(Debug)]
pub struct PageExtraction {
    pub reviews: Vec<Review>,
    pub has_next_page: bool,
}

/// Extracts review records from rendered page source using configured
/// selector chains.
pub struct ReviewExtractor {
    review_selectors: Vec<Selector>,
    title_chain: SelectorChain,
    rating_chain: SelectorChain,
    author_chain: SelectorChain,
    date_chain: SelectorChain,
    body_chain: SelectorChain,
    next_page_chain: SelectorChain,
}

impl ReviewExtractor {
    pub fn from_config(config: &SelectorConfig) -> Self {
        let mut review_selectors = Vec::new();
        for pattern in &config.review_selectors {
            match Selector::parse(pattern) {
                Ok(selector) => review_selectors.push(selector),
                Err(_) => warn!("Skipping invalid review selector: {}", pattern),
            }
        }

        ReviewExtractor {
            review_selectors,
            title_chain: SelectorChain::new(&config.title_selectors),
            rating_chain: SelectorChain::new(&config.rating_selectors),
            author_chain: SelectorChain::new(&config.author_selectors),
            date_chain: SelectorChain::new(&config.date_selectors),
            body_chain: SelectorChain::new(&config.body_selectors),
            next_page_chain: SelectorChain::new(&config.next_page_selectors),
        }
    }

    /// Extract all reviews on a page. Absence of review markup is not an
    /// error; it yields an empty batch.
    pub fn extract_page(&self, html: &str) -> PageExtraction {
        let document = Html::parse_document(html);

        let nodes = self.select_review_nodes(&document);
        let mut reviews = Vec::with_capacity(nodes.len());
        for node in nodes {
            reviews.push(self.extract_single_review(node));
        }

        PageExtraction {
            reviews,
            has_next_page: self.next_page_chain.matches_document(&document),
        }
    }

    /// Try each review-node selector in order and use the first one that
    /// matches anything on the page.
    fn select_review_nodes<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        for selector in &self.review_selectors {
            let nodes: Vec<_> = document.select(selector).collect();
            if !nodes.is_empty() {
                info!("Review selector matched {} nodes", nodes.len());
                return nodes;
            }
        }
        Vec::new()
    }

    fn extract_single_review(&self, node: ElementRef) -> Review {
        let rating = self
            .rating_chain
            .first_text(node)
            .and_then(|text| text.split_whitespace().next().map(|t| t.to_string()))
            .unwrap_or_default();

        Review {
            title: self.title_chain.first_text(node).unwrap_or_default(),
            rating,
            author: self.author_chain.first_text(node).unwrap_or_default(),
            date: self.date_chain.first_text(node).unwrap_or_default(),
            body: self.body_chain.first_text(node).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> ReviewExtractor {
        ReviewExtractor::from_config(&SelectorConfig::default())
    }

    const FULL_REVIEW_PAGE: &str = r#"
        <html><body>
          <div id="cm_cr-review_list">
            <div data-hook="review">
              <a data-hook="review-title">Excellent purchase</a>
              <i data-hook="review-star-rating"><span>4.0 out of 5 stars</span></i>
              <span class="a-profile-name">Jordan</span>
              <span data-hook="review-date">Reviewed on 3 March 2024</span>
              <span data-hook="review-body">Solid build and fast delivery.</span>
            </div>
            <div data-hook="review">
              <span data-hook="review-title">Okay</span>
              <span class="a-icon-alt">3.0 out of 5 stars</span>
              <span data-hook="review-body">Does the job.</span>
            </div>
          </div>
          <ul class="a-pagination"><li class="a-last"><a href="?pageNumber=2">Next</a></li></ul>
        </body></html>
    "#;

    #[test]
    fn test_extracts_all_fields() {
        let page = extractor().extract_page(FULL_REVIEW_PAGE);
        assert_eq!(page.reviews.len(), 2);

        let first = &page.reviews[0];
        assert_eq!(first.title, "Excellent purchase");
        assert_eq!(first.rating, "4.0");
        assert_eq!(first.author, "Jordan");
        assert_eq!(first.date, "Reviewed on 3 March 2024");
        assert_eq!(first.body, "Solid build and fast delivery.");
    }

    #[test]
    fn test_missing_fields_degrade_to_empty() {
        let page = extractor().extract_page(FULL_REVIEW_PAGE);
        let second = &page.reviews[1];
        // Primary title selector (anchor) misses, span fallback hits.
        assert_eq!(second.title, "Okay");
        // Primary rating selector misses, icon-alt fallback hits.
        assert_eq!(second.rating, "3.0");
        assert_eq!(second.author, "");
        assert_eq!(second.date, "");
    }

    #[test]
    fn test_next_page_affordance_detected() {
        let page = extractor().extract_page(FULL_REVIEW_PAGE);
        assert!(page.has_next_page);

        let last_page = FULL_REVIEW_PAGE.replace("a-last", "a-disabled");
        let page = extractor().extract_page(&last_page);
        assert!(!page.has_next_page);
    }

    #[test]
    fn test_fallback_review_node_selector() {
        let html = r#"
            <html><body>
              <div data-asin="B000000000">
                <div data-hook="review">
                  <span data-hook="review-body">Found through the fallback selector.</span>
                </div>
              </div>
            </body></html>
        "#;
        let page = extractor().extract_page(html);
        assert_eq!(page.reviews.len(), 1);
        assert_eq!(page.reviews[0].body, "Found through the fallback selector.");
    }

    #[test]
    fn test_page_without_reviews_yields_empty_batch() {
        let page = extractor().extract_page("<html><body><p>Robot check</p></body></html>");
        assert!(page.reviews.is_empty());
        assert!(!page.has_next_page);
    }

    #[test]
    fn test_selector_chain_prefers_earlier_patterns() {
        let chain = SelectorChain::new(&[".primary".to_string(), ".fallback".to_string()]);
        let html = Html::parse_fragment(
            r#"<div><span class="primary">first</span><span class="fallback">second</span></div>"#,
        );
        let root = html.root_element();
        assert_eq!(chain.first_text(root).unwrap(), "first");
    }

    #[test]
    fn test_selector_chain_skips_empty_matches() {
        let chain = SelectorChain::new(&[".primary".to_string(), ".fallback".to_string()]);
        let html = Html::parse_fragment(
            r#"<div><span class="primary">  </span><span class="fallback">value</span></div>"#,
        );
        let root = html.root_element();
        assert_eq!(chain.first_text(root).unwrap(), "value");
    }
}
