//! The holiday cache — orchestrates freshness, store, and provider.
//!
//! Resolution order for `get(current_year)`:
//! 1. If the artifact is fresh, serve it from disk.
//! 2. A fresh-by-year artifact that fails to load (corrupt, unreadable)
//!    self-heals: fall through to a refresh instead of failing the query.
//! 3. Stale or unusable: fetch the year's feed, persist it, return it.
//!
//! Fetch failure is terminal for the query — no stale fallback. Save failure
//! after a successful fetch is not: the fetched dataset is still returned
//! and the next query retries the save path.
//!
//! No single-flight de-duplication: concurrent callers observing staleness
//! may each fetch and overwrite the artifact with equivalent bytes. Saves
//! are idempotent, so this is duplicate work, not a correctness problem.

use super::freshness::needs_refresh;
use super::provider::{FeedProvider, FetchError};
use super::store::FeedStore;
use crate::calendar::HolidayDataset;
use std::sync::Arc;

pub struct HolidayCache {
    store: FeedStore,
    provider: Arc<dyn FeedProvider>,
}

impl HolidayCache {
    pub fn new(store: FeedStore, provider: Arc<dyn FeedProvider>) -> Self {
        Self { store, provider }
    }

    pub fn store(&self) -> &FeedStore {
        &self.store
    }

    /// Produce a validated dataset for `current_year`.
    pub fn get(&self, current_year: i32) -> Result<HolidayDataset, FetchError> {
        if !needs_refresh(self.store.artifact_year(), current_year) {
            match self.store.load() {
                Ok(dataset) => return Ok(dataset),
                Err(e) => {
                    eprintln!("WARNING: cached artifact unusable, refreshing: {e}");
                }
            }
        }

        self.refresh(current_year)
    }

    /// Fetch the year's feed and persist it, bypassing the freshness check.
    pub fn refresh(&self, year: i32) -> Result<HolidayDataset, FetchError> {
        let dataset = self.provider.fetch(year)?;

        if let Err(e) = self.store.save(&dataset, year) {
            eprintln!("WARNING: failed to persist fetched feed from {}: {e}", self.provider.name());
        }

        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::HolidayRecord;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    /// Provider that serves a canned dataset and counts fetches.
    struct CountingProvider {
        dataset: HolidayDataset,
        fetches: AtomicUsize,
    }

    impl CountingProvider {
        fn new(dataset: HolidayDataset) -> Arc<Self> {
            Arc::new(Self {
                dataset,
                fetches: AtomicUsize::new(0),
            })
        }

        fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    impl FeedProvider for CountingProvider {
        fn name(&self) -> &str {
            "counting"
        }

        fn fetch(&self, _year: i32) -> Result<HolidayDataset, FetchError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(self.dataset.clone())
        }
    }

    /// Provider that always fails, as if the feed host returned HTTP 500.
    struct FailingProvider;

    impl FeedProvider for FailingProvider {
        fn name(&self) -> &str {
            "failing"
        }

        fn fetch(&self, _year: i32) -> Result<HolidayDataset, FetchError> {
            Err(FetchError::Http { status: 500 })
        }
    }

    fn sample_dataset() -> HolidayDataset {
        HolidayDataset::new(vec![HolidayRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            is_off_day: true,
        }])
    }

    #[test]
    fn cold_cache_fetches_then_serves_locally() {
        let dir = TempDir::new().unwrap();
        let provider = CountingProvider::new(sample_dataset());
        let cache = HolidayCache::new(FeedStore::open(dir.path()).unwrap(), provider.clone());

        let first = cache.get(2024).unwrap();
        assert_eq!(first, sample_dataset());
        assert_eq!(provider.fetch_count(), 1);
        assert_eq!(cache.store().artifact_year(), Some(2024));

        // Second call finds a fresh artifact; no additional fetch.
        let second = cache.get(2024).unwrap();
        assert_eq!(second, first);
        assert_eq!(provider.fetch_count(), 1);
    }

    #[test]
    fn stale_year_triggers_refresh_regardless_of_content() {
        let dir = TempDir::new().unwrap();
        let store = FeedStore::open(dir.path()).unwrap();
        store.save(&sample_dataset(), 2023).unwrap();

        let provider = CountingProvider::new(sample_dataset());
        let cache = HolidayCache::new(FeedStore::open(dir.path()).unwrap(), provider.clone());

        cache.get(2024).unwrap();
        assert_eq!(provider.fetch_count(), 1);
        assert_eq!(cache.store().artifact_year(), Some(2024));
    }

    #[test]
    fn corrupt_but_fresh_artifact_self_heals() {
        let dir = TempDir::new().unwrap();
        let store = FeedStore::open(dir.path()).unwrap();
        store.save(&sample_dataset(), 2024).unwrap();
        std::fs::write(dir.path().join("holiday_data.json"), b"{torn").unwrap();

        let provider = CountingProvider::new(sample_dataset());
        let cache = HolidayCache::new(FeedStore::open(dir.path()).unwrap(), provider.clone());

        let dataset = cache.get(2024).unwrap();
        assert_eq!(dataset, sample_dataset());
        assert_eq!(provider.fetch_count(), 1);

        // The rewritten artifact is usable again.
        assert_eq!(cache.store().load().unwrap(), dataset);
    }

    #[test]
    fn fetch_failure_propagates_and_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let cache = HolidayCache::new(
            FeedStore::open(dir.path()).unwrap(),
            Arc::new(FailingProvider),
        );

        let result = cache.get(2024);
        assert!(matches!(result, Err(FetchError::Http { status: 500 })));
        assert!(!dir.path().join("holiday_data.json").exists());
        assert_eq!(cache.store().artifact_year(), None);
    }

    #[test]
    fn fresh_artifact_shields_a_broken_provider() {
        let dir = TempDir::new().unwrap();
        let store = FeedStore::open(dir.path()).unwrap();
        store.save(&sample_dataset(), 2024).unwrap();

        let cache = HolidayCache::new(
            FeedStore::open(dir.path()).unwrap(),
            Arc::new(FailingProvider),
        );

        // Remote is down but the local artifact is fresh — queries keep
        // working.
        assert_eq!(cache.get(2024).unwrap(), sample_dataset());
    }
}
