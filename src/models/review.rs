use serde::{Deserialize, Serialize};

/// A single scraped product review. Every field is optional in the
/// markup; missing fields are kept as empty strings rather than None so
/// the CSV output always has the full column set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub title: String,
    pub rating: String,
    pub author: String,
    pub date: String,
    pub body: String,
}

/// Column order of the review CSV.
pub const REVIEW_FIELDS: [&str; 5] = ["title", "rating", "author", "date", "body"];

impl Review {
    pub fn field(&self, name: &str) -> &str {
        match name {
            "title" => &self.title,
            "rating" => &self.rating,
            "author" => &self.author,
            "date" => &self.date,
            "body" => &self.body,
            _ => "",
        }
    }

    /// A review with no extractable fields at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.rating.is_empty()
            && self.author.is_empty()
            && self.date.is_empty()
            && self.body.is_empty()
    }
}
