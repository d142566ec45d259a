use super::null_as_default;
use crate::error::Result;
use crate::request::{add_options, is_zero};
use crate::response::Response;
use crate::Client;
use serde::{Deserialize, Serialize};

/// Unread counts for every feed, category and tag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Marker {
    #[serde(rename = "unreadcounts", deserialize_with = "null_as_default")]
    pub unread_counts: Vec<UnreadCount>,
    pub updated: i64,
}

/// Unread count of one stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnreadCount {
    pub count: i64,
    /// Stream id.
    pub id: String,
    pub updated: i64,
}

/// Read operations recorded since a point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkersReads {
    /// Entry ids marked as read.
    #[serde(deserialize_with = "null_as_default")]
    pub entries: Vec<String>,
    /// Feeds marked as read up to a point.
    #[serde(deserialize_with = "null_as_default")]
    pub feeds: Vec<MarkersReadsFeed>,
    pub updated: i64,
}

/// A feed marked as read as of a timestamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MarkersReadsFeed {
    pub id: String,
    pub as_of: i64,
}

/// Query options for [`Markers::reads`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkersReadsOptions {
    /// Only return read operations newer than this, milliseconds since the epoch.
    #[serde(skip_serializing_if = "is_zero")]
    pub newer_than: i64,
}

/// Marker endpoints.
pub struct Markers<'a> {
    client: &'a Client,
}

impl<'a> Markers<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Get unread counts.
    pub async fn counts(&self) -> Result<Response<Marker>> {
        self.client.get("markers/counts").await
    }

    /// Get the latest read operations.
    pub async fn reads(&self, opts: Option<&MarkersReadsOptions>) -> Result<Response<MarkersReads>> {
        let rel = add_options("markers/reads", opts)?;
        self.client.get(&rel).await
    }
}
