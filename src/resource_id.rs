//! Builders for feed, category and tag identifiers.

use std::fmt;

/// Kind of a user-scoped resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceId {
    /// `feed/{url}`
    Feed,
    /// `user/{userId}/category/{label}`
    Category,
    /// `user/{userId}/tag/{label}`
    Tag,
}

impl ResourceId {
    /// Id of a feed, given its URL.
    pub fn feed(url: &str) -> String {
        format!("feed/{url}")
    }

    /// Id of one of the user's categories.
    pub fn category(user_id: &str, label: &str) -> String {
        format!("user/{user_id}/category/{label}")
    }

    /// Id of one of the user's tags.
    pub fn tag(user_id: &str, label: &str) -> String {
        format!("user/{user_id}/tag/{label}")
    }

    /// Build an id of this kind. `user_id` is ignored for feeds.
    pub fn id(self, user_id: &str, identifier: &str) -> String {
        match self {
            ResourceId::Feed => Self::feed(identifier),
            ResourceId::Category => Self::category(user_id, identifier),
            ResourceId::Tag => Self::tag(user_id, identifier),
        }
    }
}

/// Predefined categories and tags every user has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalResource {
    /// Feeds marked as must-read.
    Must,
    /// Every subscribed feed.
    All,
    /// Feeds outside any category.
    Uncategorized,
    /// Entries the user read.
    Read,
    /// Entries the user saved for later.
    Saved,
}

impl GlobalResource {
    /// Resource kind and label of the global resource.
    fn parts(self) -> (ResourceId, &'static str) {
        match self {
            GlobalResource::Must => (ResourceId::Category, "global.must"),
            GlobalResource::All => (ResourceId::Category, "global.all"),
            GlobalResource::Uncategorized => (ResourceId::Category, "global.uncategorized"),
            GlobalResource::Read => (ResourceId::Tag, "global.read"),
            GlobalResource::Saved => (ResourceId::Tag, "global.saved"),
        }
    }

    /// Id of the global resource for a user.
    pub fn id(self, user_id: &str) -> String {
        let (kind, label) = self.parts();
        kind.id(user_id, label)
    }
}

impl fmt::Display for GlobalResource {
    /// The id template, with `{userId}` standing for the user id.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id("{userId}"))
    }
}
