//! Rust client for the Feedly cloud API.
//!
//! Every call returns the decoded record wrapped in a [`Response`], which
//! also carries the rate-limit state the API reported.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use feedly::{Client, GlobalResource, StreamOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), feedly::Error> {
//!     // Falls back to FEEDLY_ACCESS_TOKEN when no token is given.
//!     let client = Client::builder().build()?;
//!
//!     let profile = client.profile().get().await?;
//!     let all = GlobalResource::All.id(&profile.id);
//!
//!     let page = client
//!         .streams()
//!         .contents(&all, Some(&StreamOptions { count: 10, unread_only: true, ..Default::default() }))
//!         .await?;
//!
//!     for entry in &page.items {
//!         println!("{}", entry.title);
//!     }
//!     println!("{} of {} requests used", page.rate.count, page.rate.limit);
//!     Ok(())
//! }
//! ```

mod cache;
mod client;
mod error;
mod request;
mod resource_id;
mod resources;
mod response;
mod version;

pub use cache::{cache_key, Cache, FileCache, MemoryCache};
pub use client::{Client, ClientBuilder, Environment, ACCESS_TOKEN_ENV};
pub use error::{Error, Result};
pub use request::{add_options, encode_query, Request};
pub use resource_id::{GlobalResource, ResourceId};
pub use resources::*;
pub use response::{Rate, Response};
pub use version::{API_VERSION, SDK_VERSION};

/// Re-exported so callers can build requests by hand.
pub use reqwest::Method;
