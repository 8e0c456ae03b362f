//! In-memory ad and publisher registries.
//!
//! Fast, thread-safe storage suitable for development, testing,
//! and single-process deployments.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;
use tracing::{debug, instrument};

use adnet_core::constants::FIRST_ID;
use adnet_core::error::{AdNetError, Result};
use adnet_core::traits::{AdRegistry, PublisherRegistry};
use adnet_core::types::{AdRecord, AdStats, Principal, PublisherRecord, PublisherStats};

// ═══════════════════════════════════════════════════════════════════════════════
// AD REGISTRY
// ═══════════════════════════════════════════════════════════════════════════════

/// In-memory ad campaign registry.
///
/// Uses concurrent data structures for thread-safe access without requiring
/// external synchronization. Gate checks (existence, ownership) and the
/// mutation itself run under the same map entry guard, so a failed check
/// leaves the record untouched and no reader observes a record mid-update.
///
/// Id allocation is a single `fetch_add` on an atomic counter starting at 1,
/// so concurrent creates never receive the same id.
#[derive(Debug)]
pub struct MemoryAdRegistry {
    /// Primary storage: id → AdRecord
    ads: DashMap<u64, AdRecord>,
    /// Next campaign id
    next_id: AtomicU64,
    /// Registry statistics
    stats: RwLock<AdStats>,
}

impl MemoryAdRegistry {
    /// Creates a new empty in-memory registry.
    pub fn new() -> Self {
        Self {
            ads: DashMap::new(),
            next_id: AtomicU64::new(FIRST_ID),
            stats: RwLock::new(AdStats::new()),
        }
    }

    /// Creates a registry with preallocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ads: DashMap::with_capacity(capacity),
            next_id: AtomicU64::new(FIRST_ID),
            stats: RwLock::new(AdStats::new()),
        }
    }

    /// Returns the current statistics.
    pub fn stats(&self) -> AdStats {
        self.stats.read().clone()
    }

    /// Clears all campaigns and resets the id counter.
    pub fn clear(&self) {
        self.ads.clear();
        self.next_id.store(FIRST_ID, Ordering::SeqCst);
        *self.stats.write() = AdStats::new();
    }

    /// Returns the number of campaigns.
    pub fn len(&self) -> usize {
        self.ads.len()
    }

    /// Returns true if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.ads.is_empty()
    }

    /// Returns all campaigns ordered by id (for export/backup).
    pub fn all_ads(&self) -> Vec<AdRecord> {
        let mut ads: Vec<AdRecord> = self.ads.iter().map(|entry| entry.value().clone()).collect();
        ads.sort_by_key(|ad| ad.id);
        ads
    }

    /// Imports campaigns from a list.
    ///
    /// Useful for restoring from a snapshot. The id counter is advanced past
    /// the highest imported id so future creates never collide.
    pub fn import(&self, ads: Vec<AdRecord>) -> Result<usize> {
        let mut imported = 0;

        for mut ad in ads {
            if ad.id == 0 {
                ad.id = self.next_id.fetch_add(1, Ordering::SeqCst);
            } else {
                let current = self.next_id.load(Ordering::SeqCst);
                if ad.id >= current {
                    self.next_id.store(ad.id + 1, Ordering::SeqCst);
                }
            }

            self.stats.write().add(&ad);
            self.ads.insert(ad.id, ad);
            imported += 1;
        }

        Ok(imported)
    }
}

impl Default for MemoryAdRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AdRegistry for MemoryAdRegistry {
    /// Creates a new campaign owned by `caller`.
    ///
    /// Inputs are stored as given; no shape validation is applied.
    #[instrument(skip(self, content_url, target_demographics), fields(caller = %caller))]
    async fn create_ad(
        &self,
        caller: &Principal,
        content_url: String,
        target_demographics: Vec<String>,
        budget: u64,
    ) -> Result<u64> {
        let mut ad = AdRecord::new(caller.clone(), content_url, target_demographics, budget);

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        ad.id = id;

        debug!(id, budget, "Creating ad campaign");

        self.stats.write().add(&ad);
        self.ads.insert(id, ad);

        Ok(id)
    }

    #[instrument(skip(self, new_status), fields(caller = %caller))]
    async fn update_ad_status(
        &self,
        caller: &Principal,
        ad_id: u64,
        new_status: &str,
    ) -> Result<()> {
        let mut entry = self.ads.get_mut(&ad_id).ok_or(AdNetError::AdNotFound(ad_id))?;

        if !entry.is_owned_by(caller) {
            return Err(AdNetError::NotOwner {
                caller: caller.clone(),
                id: ad_id,
            });
        }

        entry.status = new_status.to_string();
        debug!(ad_id, status = new_status, "Updated ad status");
        Ok(())
    }

    #[instrument(skip(self), fields(caller = %caller))]
    async fn update_ad_budget(
        &self,
        caller: &Principal,
        ad_id: u64,
        new_budget: u64,
    ) -> Result<()> {
        let mut entry = self.ads.get_mut(&ad_id).ok_or(AdNetError::AdNotFound(ad_id))?;

        if !entry.is_owned_by(caller) {
            return Err(AdNetError::NotOwner {
                caller: caller.clone(),
                id: ad_id,
            });
        }

        let old_budget = entry.budget;
        entry.budget = new_budget;
        self.stats.write().rebudget(old_budget, new_budget);

        debug!(ad_id, old_budget, new_budget, "Updated ad budget");
        Ok(())
    }

    async fn get_ad(&self, ad_id: u64) -> Result<AdRecord> {
        self.ads
            .get(&ad_id)
            .map(|entry| entry.clone())
            .ok_or(AdNetError::AdNotFound(ad_id))
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.ads.len() as u64)
    }

    async fn next_id(&self) -> Result<u64> {
        Ok(self.next_id.load(Ordering::SeqCst))
    }

    async fn stats(&self) -> Result<AdStats> {
        Ok(self.stats.read().clone())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PUBLISHER REGISTRY
// ═══════════════════════════════════════════════════════════════════════════════

/// In-memory publisher registry.
///
/// Same concurrency model as [`MemoryAdRegistry`]. The earnings credit path
/// is deliberately not owner-gated; any caller may credit a publisher.
#[derive(Debug)]
pub struct MemoryPublisherRegistry {
    /// Primary storage: id → PublisherRecord
    publishers: DashMap<u64, PublisherRecord>,
    /// Next publisher id
    next_id: AtomicU64,
    /// Registry statistics
    stats: RwLock<PublisherStats>,
}

impl MemoryPublisherRegistry {
    /// Creates a new empty in-memory registry.
    pub fn new() -> Self {
        Self {
            publishers: DashMap::new(),
            next_id: AtomicU64::new(FIRST_ID),
            stats: RwLock::new(PublisherStats::new()),
        }
    }

    /// Creates a registry with preallocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            publishers: DashMap::with_capacity(capacity),
            next_id: AtomicU64::new(FIRST_ID),
            stats: RwLock::new(PublisherStats::new()),
        }
    }

    /// Returns the current statistics.
    pub fn stats(&self) -> PublisherStats {
        self.stats.read().clone()
    }

    /// Clears all publishers and resets the id counter.
    pub fn clear(&self) {
        self.publishers.clear();
        self.next_id.store(FIRST_ID, Ordering::SeqCst);
        *self.stats.write() = PublisherStats::new();
    }

    /// Returns the number of publishers.
    pub fn len(&self) -> usize {
        self.publishers.len()
    }

    /// Returns true if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.publishers.is_empty()
    }

    /// Returns all publishers ordered by id (for export/backup).
    pub fn all_publishers(&self) -> Vec<PublisherRecord> {
        let mut publishers: Vec<PublisherRecord> = self
            .publishers
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        publishers.sort_by_key(|publisher| publisher.id);
        publishers
    }

    /// Imports publishers from a list, advancing the id counter past the
    /// highest imported id.
    pub fn import(&self, publishers: Vec<PublisherRecord>) -> Result<usize> {
        let mut imported = 0;

        for mut publisher in publishers {
            if publisher.id == 0 {
                publisher.id = self.next_id.fetch_add(1, Ordering::SeqCst);
            } else {
                let current = self.next_id.load(Ordering::SeqCst);
                if publisher.id >= current {
                    self.next_id.store(publisher.id + 1, Ordering::SeqCst);
                }
            }

            self.stats.write().add(&publisher);
            self.publishers.insert(publisher.id, publisher);
            imported += 1;
        }

        Ok(imported)
    }
}

impl Default for MemoryPublisherRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PublisherRegistry for MemoryPublisherRegistry {
    #[instrument(skip(self, website, ad_spaces), fields(caller = %caller))]
    async fn register_publisher(
        &self,
        caller: &Principal,
        website: String,
        ad_spaces: Vec<String>,
    ) -> Result<u64> {
        let mut publisher = PublisherRecord::new(caller.clone(), website, ad_spaces);

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        publisher.id = id;

        debug!(id, website = %publisher.website, "Registering publisher");

        self.stats.write().add(&publisher);
        self.publishers.insert(id, publisher);

        Ok(id)
    }

    #[instrument(skip(self, new_ad_spaces), fields(caller = %caller))]
    async fn update_ad_spaces(
        &self,
        caller: &Principal,
        publisher_id: u64,
        new_ad_spaces: Vec<String>,
    ) -> Result<()> {
        let mut entry = self
            .publishers
            .get_mut(&publisher_id)
            .ok_or(AdNetError::PublisherNotFound(publisher_id))?;

        if !entry.is_owned_by(caller) {
            return Err(AdNetError::NotOwner {
                caller: caller.clone(),
                id: publisher_id,
            });
        }

        entry.ad_spaces = new_ad_spaces;
        debug!(publisher_id, spaces = entry.ad_spaces.len(), "Updated ad spaces");
        Ok(())
    }

    /// Credits earnings without an ownership check.
    #[instrument(skip(self))]
    async fn record_earnings(&self, publisher_id: u64, amount: u64) -> Result<()> {
        let mut entry = self
            .publishers
            .get_mut(&publisher_id)
            .ok_or(AdNetError::PublisherNotFound(publisher_id))?;

        entry.credit(amount)?;
        self.stats.write().credit(amount);

        debug!(publisher_id, amount, earnings = entry.earnings, "Recorded earnings");
        Ok(())
    }

    async fn get_publisher(&self, publisher_id: u64) -> Result<PublisherRecord> {
        self.publishers
            .get(&publisher_id)
            .map(|entry| entry.clone())
            .ok_or(AdNetError::PublisherNotFound(publisher_id))
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.publishers.len() as u64)
    }

    async fn next_id(&self) -> Result<u64> {
        Ok(self.next_id.load(Ordering::SeqCst))
    }

    async fn stats(&self) -> Result<PublisherStats> {
        Ok(self.stats.read().clone())
    }
}
