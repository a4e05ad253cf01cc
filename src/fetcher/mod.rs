pub mod browser;
pub mod review_harvester;

pub use browser::BrowserSession;
pub use review_harvester::{PageFetcher, ReviewHarvester, extract_product_id, site_origin};
