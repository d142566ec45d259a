use super::{null_as_default, Category};
use crate::error::Result;
use crate::response::Response;
use crate::Client;
use serde::{Deserialize, Serialize};

/// A feed the user is subscribed to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Subscription {
    #[serde(deserialize_with = "null_as_default")]
    pub categories: Vec<Category>,
    pub content_type: String,
    pub icon_url: String,
    /// Feed id, `feed/{url}`.
    pub id: String,
    pub partial: bool,
    pub subscribers: f64,
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub topics: Vec<String>,
    /// Milliseconds since the epoch; the API may send a fractional value.
    pub updated: f64,
    pub velocity: f64,
    pub visual_url: String,
    pub website: String,
}

/// Subscription endpoints.
pub struct Subscriptions<'a> {
    client: &'a Client,
}

impl<'a> Subscriptions<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// List the user's subscriptions.
    pub async fn get(&self) -> Result<Response<Vec<Subscription>>> {
        self.client.get("subscriptions").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_roundtrip() {
        let json = r#"[{
            "id": "feed/http://feeds.feedburner.com/design-milk",
            "title": "Design Milk",
            "categories": [{"id": "user/c805fcbf/category/design", "label": "design"}],
            "website": "http://design-milk.com",
            "updated": 1367539068016,
            "velocity": 19.3,
            "subscribers": 5413,
            "topics": ["design"],
            "partial": false,
            "iconUrl": "http://example.com/icon.png"
        }]"#;
        let subs: Vec<Subscription> = serde_json::from_str(json).unwrap();
        assert_eq!(subs[0].categories[0].label, "design");
        assert_eq!(subs[0].subscribers, 5413.0);
        assert_eq!(subs[0].visual_url, "");

        let back: Vec<Subscription> =
            serde_json::from_str(&serde_json::to_string(&subs).unwrap()).unwrap();
        assert_eq!(back, subs);
    }

    #[test]
    fn test_fractional_updated() {
        let json = r#"[{"id": "feed/a", "updated": 1367539068016.5}, {"id": "feed/b", "updated": 1367539068016}]"#;
        let subs: Vec<Subscription> = serde_json::from_str(json).unwrap();
        assert_eq!(subs[0].updated, 1367539068016.5);
        assert_eq!(subs[1].updated, 1367539068016.0);
    }
}
