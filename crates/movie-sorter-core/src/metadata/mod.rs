//! Movie metadata lookup.

mod omdb;

pub use omdb::{LookupOutcome, OmdbClient};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Result of a successful lookup. `Title` and `Genre` are read; every other field of
/// the service response is carried through untouched so it can be saved verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataRecord {
    #[serde(rename = "Title", default)]
    pub title: String,
    /// Comma separated, most relevant first: `"Action, Sci-Fi"`.
    #[serde(rename = "Genre", default)]
    pub genre: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MetadataRecord {
    pub fn new(title: impl Into<String>, genre: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            genre: genre.into(),
            extra: Map::new(),
        }
    }

    pub fn genres(&self) -> Vec<&str> {
        self.genre
            .split(',')
            .map(str::trim)
            .filter(|genre| !genre.is_empty())
            .collect()
    }

    pub fn main_genre(&self) -> Option<&str> {
        self.genres().into_iter().next()
    }
}

/// Looks a title up in an external movie database.
///
/// `None` covers both "the service has no such title" and "the service could not be
/// reached"; callers treat the two the same way.
pub trait MetadataClient {
    fn lookup(&self, title: &str) -> Option<MetadataRecord>;
}

impl<T: MetadataClient + ?Sized> MetadataClient for &T {
    fn lookup(&self, title: &str) -> Option<MetadataRecord> {
        (**self).lookup(title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_passes_unknown_fields_through() {
        let body = json!({
            "Title": "Heat",
            "Year": "1995",
            "Genre": "Action, Crime, Drama",
            "imdbRating": "8.3",
            "Response": "True"
        });
        let record: MetadataRecord = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(record.title, "Heat");
        assert_eq!(record.genres(), vec!["Action", "Crime", "Drama"]);
        assert_eq!(record.main_genre(), Some("Action"));
        assert_eq!(record.extra.get("imdbRating"), Some(&json!("8.3")));

        assert_eq!(serde_json::to_value(&record).unwrap(), body);
    }

    #[test]
    fn test_missing_genre_has_no_main_genre() {
        let record: MetadataRecord = serde_json::from_value(json!({ "Title": "Heat" })).unwrap();
        assert_eq!(record.genre, "");
        assert_eq!(record.main_genre(), None);
    }
}
