use super::{null_as_default, path_segment, Category};
use crate::error::Result;
use crate::response::Response;
use crate::Client;
use serde::{Deserialize, Serialize};

/// Alternate link of an entry, usually the article on the origin site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Alternate {
    /// Link target.
    pub href: String,
    /// MIME type of the target.
    #[serde(rename = "type")]
    pub mime_type: String,
}

/// Entry body or summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Content {
    /// HTML content.
    pub content: String,
    /// Text direction, `ltr` or `rtl`.
    pub direction: String,
}

/// Feed an entry was published in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Origin {
    /// Website of the feed.
    pub html_url: String,
    /// Feed id.
    pub stream_id: String,
    /// Feed title.
    pub title: String,
}

/// Image associated with an entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Visual {
    pub content_type: String,
    pub height: f64,
    pub processor: String,
    pub url: String,
    pub width: f64,
}

/// A feed entry (article).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Entry {
    #[serde(deserialize_with = "null_as_default")]
    pub alternate: Vec<Alternate>,
    pub author: String,
    /// Categories the user filed this entry's feed under.
    #[serde(deserialize_with = "null_as_default")]
    pub categories: Vec<Category>,
    /// Tags the user applied to the entry.
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<Category>,
    pub content: Option<Content>,
    pub summary: Option<Content>,
    /// Crawl time, milliseconds since the epoch.
    pub crawled: i64,
    pub engagement: i64,
    pub engagement_rate: f64,
    pub fingerprint: String,
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub keywords: Vec<String>,
    pub origin: Option<Origin>,
    pub origin_id: String,
    /// Publish time, milliseconds since the epoch.
    pub published: i64,
    pub title: String,
    pub unread: bool,
    pub updated: i64,
    pub visual: Option<Visual>,
}

/// Entry endpoints.
pub struct Entries<'a> {
    client: &'a Client,
}

impl<'a> Entries<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Get a single entry. The API answers with a one-element array.
    pub async fn get(&self, entry_id: &str) -> Result<Response<Vec<Entry>>> {
        self.client
            .get(&format!("entries/{}", path_segment(entry_id)))
            .await
    }

    /// Get several entries at once.
    pub async fn mget<S: Serialize>(&self, entry_ids: &[S]) -> Result<Response<Vec<Entry>>> {
        self.client.post("entries/.mget", entry_ids).await
    }
}
