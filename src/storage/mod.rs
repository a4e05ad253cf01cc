pub mod cookie_store;
pub mod dataset;
pub mod review_store;

pub use cookie_store::{load_cookies, save_cookies};
pub use dataset::{LabeledSample, load_labeled_dataset, load_review_bodies};
pub use review_store::write_reviews_csv;
