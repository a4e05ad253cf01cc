use serde::{Deserialize, Serialize};

/// Configuration for the review harvesting run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HarvestConfig {
    #[serde(default)]
    pub browser: BrowserConfig,
    #[serde(default)]
    pub scraping: ScrapingConfig,
    #[serde(default)]
    pub selectors: SelectorConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// WebDriver connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    pub webdriver_url: String,
    pub user_agent: Option<String>,
}

/// Scraping behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapingConfig {
    pub max_reviews: usize,
    pub max_pages: usize,
    pub page_param: String,
    pub page_render_delay_ms: u64,
    pub max_retries: usize,
}

/// CSS selectors for extracting review fields. Each list is tried in
/// order; the first selector that yields a non-empty result wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    pub review_selectors: Vec<String>,
    pub title_selectors: Vec<String>,
    pub rating_selectors: Vec<String>,
    pub author_selectors: Vec<String>,
    pub date_selectors: Vec<String>,
    pub body_selectors: Vec<String>,
    pub next_page_selectors: Vec<String>,
}

/// Output file locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub reviews_path: String,
    pub cookies_path: String,
}

impl HarvestConfig {
    /// Load configuration from TOML file
    pub fn from_file(path: &str) -> Result<Self, anyhow::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: HarvestConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:4444".to_string(),
            user_agent: None,
        }
    }
}

impl Default for ScrapingConfig {
    fn default() -> Self {
        Self {
            max_reviews: 70,
            max_pages: 10,
            page_param: "pageNumber".to_string(),
            page_render_delay_ms: 5000,
            max_retries: 3,
        }
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            review_selectors: vec![
                "div[data-hook='review'], li[data-hook='review'], div.a-section.review, #cm_cr-review_list div[data-hook='review']".to_string(),
                "div[data-asin] div[data-hook='review']".to_string(),
            ],
            title_selectors: vec![
                "a[data-hook='review-title']".to_string(),
                "span[data-hook='review-title']".to_string(),
            ],
            rating_selectors: vec![
                "i[data-hook='review-star-rating'] span".to_string(),
                "span.a-icon-alt".to_string(),
            ],
            author_selectors: vec!["span.a-profile-name".to_string()],
            date_selectors: vec!["span[data-hook='review-date']".to_string()],
            body_selectors: vec!["span[data-hook='review-body']".to_string()],
            next_page_selectors: vec![
                "li.a-last a".to_string(),
                ".a-pagination .a-last a".to_string(),
            ],
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            reviews_path: "data/raw_reviews.csv".to_string(),
            cookies_path: "data/cookies.json".to_string(),
        }
    }
}
