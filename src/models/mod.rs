pub mod cookie;
pub mod review;

pub use cookie::CookieRecord;
pub use review::{Review, REVIEW_FIELDS};
