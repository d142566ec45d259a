use super::{null_as_default, path_segment, Entry};
use crate::error::Result;
use crate::request::{add_options, is_false, is_zero};
use crate::response::Response;
use crate::Client;
use serde::{Deserialize, Serialize};

/// One page of entry ids of a stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamIds {
    #[serde(deserialize_with = "null_as_default")]
    pub ids: Vec<String>,
    /// Cursor for the next page; absent on the last page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continuation: Option<String>,
}

/// One page of entries of a stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamContents {
    /// Cursor for the next page; absent on the last page.
    pub continuation: Option<String>,
    /// Stream id.
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<Entry>,
    pub updated: i64,
}

/// Ordering of stream pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ranking {
    Newest,
    Oldest,
    Engagement,
}

/// Query options for stream endpoints. Defaults are left out of the query.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamOptions {
    /// Page size; the server default applies when zero.
    #[serde(skip_serializing_if = "is_zero")]
    pub count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranked: Option<Ranking>,
    #[serde(skip_serializing_if = "is_false")]
    pub unread_only: bool,
    /// Milliseconds since the epoch.
    #[serde(skip_serializing_if = "is_zero")]
    pub newer_than: i64,
    /// Cursor from a previous page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continuation: Option<String>,
}

/// Stream endpoints.
///
/// A stream id is a feed, category or tag id (see [`ResourceId`](crate::ResourceId)).
pub struct Streams<'a> {
    client: &'a Client,
}

impl<'a> Streams<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Get a page of entry ids.
    pub async fn ids(
        &self,
        stream_id: &str,
        opts: Option<&StreamOptions>,
    ) -> Result<Response<StreamIds>> {
        let rel = add_options(&format!("streams/{}/ids", path_segment(stream_id)), opts)?;
        self.client.get(&rel).await
    }

    /// Get a page of entries.
    pub async fn contents(
        &self,
        stream_id: &str,
        opts: Option<&StreamOptions>,
    ) -> Result<Response<StreamContents>> {
        let rel = add_options(&format!("streams/{}/contents", path_segment(stream_id)), opts)?;
        self.client.get(&rel).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_options_query() {
        assert_eq!(
            add_options("streams/s/ids", Some(&StreamOptions::default())).unwrap(),
            "streams/s/ids"
        );

        let opts = StreamOptions {
            count: 50,
            ranked: Some(Ranking::Oldest),
            unread_only: true,
            newer_than: 1367539068016,
            continuation: Some("13fb9d6f274:2ac9c5:f5718180".into()),
        };
        let first = add_options("streams/s/ids", Some(&opts)).unwrap();
        assert_eq!(
            first,
            "streams/s/ids?continuation=13fb9d6f274%3A2ac9c5%3Af5718180&count=50&newerThan=1367539068016&ranked=oldest&unreadOnly=true"
        );
        assert_eq!(add_options("streams/s/ids", Some(&opts)).unwrap(), first);
    }

    #[test]
    fn test_stream_contents_roundtrip() {
        let json = r#"{
            "id": "user/c805fcbf/category/tech",
            "updated": 1367539068016,
            "continuation": "1419f8dfd8f:3b2b:5607fc87",
            "items": [{"id": "e1", "title": "One", "unread": true}, {"id": "e2", "title": "Two"}]
        }"#;
        let contents: StreamContents = serde_json::from_str(json).unwrap();
        assert_eq!(contents.items.len(), 2);
        assert_eq!(contents.continuation.as_deref(), Some("1419f8dfd8f:3b2b:5607fc87"));

        let back: StreamContents =
            serde_json::from_str(&serde_json::to_string(&contents).unwrap()).unwrap();
        assert_eq!(back, contents);
    }

    #[test]
    fn test_stream_ids_last_page() {
        let ids: StreamIds = serde_json::from_str(r#"{"ids":["a","b"]}"#).unwrap();
        assert!(ids.continuation.is_none());
        assert_eq!(serde_json::to_string(&ids).unwrap(), r#"{"ids":["a","b"]}"#);
    }
}
