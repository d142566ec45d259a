use crate::error::Result;
use crate::response::Response;
use crate::Client;
use serde::{Deserialize, Serialize};

/// A user category (or tag) reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    /// Category id, e.g. `user/{userId}/category/tech`.
    pub id: String,
    /// Display label.
    pub label: String,
}

/// Category endpoints.
pub struct Categories<'a> {
    client: &'a Client,
}

impl<'a> Categories<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// List the user's categories.
    pub async fn get(&self) -> Result<Response<Vec<Category>>> {
        self.client.get("categories").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_json() {
        let json = r#"[{"id":"user/c805fcbf/category/design","label":"design"},{"id":"user/c805fcbf/category/tech"}]"#;
        let categories: Vec<Category> = serde_json::from_str(json).unwrap();
        assert_eq!(categories[0].label, "design");
        assert_eq!(categories[1].label, "");

        let back: Vec<Category> =
            serde_json::from_str(&serde_json::to_string(&categories).unwrap()).unwrap();
        assert_eq!(back, categories);
    }
}
