//! Feed retrieval and caching

pub mod cache;
pub mod freshness;
pub mod provider;
pub mod store;

pub use cache::HolidayCache;
pub use freshness::needs_refresh;
pub use provider::{FeedProvider, FetchError, HttpFeedProvider};
pub use store::{FeedStore, StoreError, StoreMeta};
