//! Typed endpoint groups.
//!
//! Each group borrows the [`Client`](crate::Client) it was obtained from and
//! mirrors the JSON records of its endpoints field for field.

mod categories;
mod entries;
mod markers;
mod profile;
mod streams;
mod subscriptions;

pub use categories::{Categories, Category};
pub use entries::{Alternate, Content, Entries, Entry, Origin, Visual};
pub use markers::{Marker, Markers, MarkersReads, MarkersReadsFeed, MarkersReadsOptions, UnreadCount};
pub use profile::{Login, PaymentProviderId, PaymentSubscriptionId, Profile, Profiles};
pub use streams::{Ranking, StreamContents, StreamIds, StreamOptions, Streams};
pub use subscriptions::{Subscription, Subscriptions};

use serde::{Deserialize, Deserializer};

/// Deserialize `null` as the type's default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Escape an identifier so it stays a single path segment.
///
/// Dots are unreserved and pass through, so ids of `.` or `..` are left for
/// URL resolution to reject.
pub(crate) fn path_segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}
