//! Registry traits for ADNET.
//!
//! These traits define the two registry interfaces the storage backends
//! satisfy. Every call is a single atomic state transition: gate checks
//! (existence, ownership) happen strictly before any mutation, and no reader
//! ever observes a record mid-update.
//!
//! The `caller` parameter is the principal the surrounding execution
//! environment attributes to the operation; the registries only compare it
//! for equality against the stored owner.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{AdRecord, AdStats, Principal, PublisherRecord, PublisherStats};

// ═══════════════════════════════════════════════════════════════════════════════
// AD REGISTRY TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Interface for ad campaign storage.
///
/// Implementations might use:
/// - In-memory storage (for testing/development)
/// - File-backed storage (for single-node deployments)
/// - On-chain storage (smart contract state)
#[async_trait]
pub trait AdRegistry: Send + Sync {
    /// Creates a new ad campaign owned by `caller`.
    ///
    /// Always succeeds; inputs are stored as given. The campaign starts with
    /// status `"active"`. Returns the assigned campaign id (first id is 1,
    /// strictly increasing, never reused).
    async fn create_ad(
        &self,
        caller: &Principal,
        content_url: String,
        target_demographics: Vec<String>,
        budget: u64,
    ) -> Result<u64>;

    /// Replaces the status of campaign `ad_id`.
    ///
    /// Fails with `AdNotFound` if the campaign does not exist, `NotOwner` if
    /// `caller` is not the creating advertiser. Idempotent for equal values.
    async fn update_ad_status(&self, caller: &Principal, ad_id: u64, new_status: &str)
        -> Result<()>;

    /// Replaces the budget of campaign `ad_id` (absolute set, not delta).
    ///
    /// Same existence and ownership gates as [`update_ad_status`](Self::update_ad_status).
    async fn update_ad_budget(&self, caller: &Principal, ad_id: u64, new_budget: u64)
        -> Result<()>;

    /// Retrieves the campaign at `ad_id`.
    ///
    /// Fails with `AdNotFound` if absent. Read-only, no side effects.
    async fn get_ad(&self, ad_id: u64) -> Result<AdRecord>;

    /// Returns the total campaign count.
    async fn count(&self) -> Result<u64>;

    /// Returns the next campaign id that will be assigned.
    async fn next_id(&self) -> Result<u64>;

    /// Returns aggregate statistics over all campaigns.
    async fn stats(&self) -> Result<AdStats>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// PUBLISHER REGISTRY TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Interface for publisher storage.
#[async_trait]
pub trait PublisherRegistry: Send + Sync {
    /// Registers a new publisher site owned by `caller`.
    ///
    /// Always succeeds. Earnings start at 0. Returns the assigned publisher id
    /// (first id is 1, strictly increasing, never reused).
    async fn register_publisher(
        &self,
        caller: &Principal,
        website: String,
        ad_spaces: Vec<String>,
    ) -> Result<u64>;

    /// Replaces the ad space list of publisher `publisher_id` wholesale.
    ///
    /// Fails with `PublisherNotFound` if the publisher does not exist,
    /// `NotOwner` if `caller` is not the registering owner.
    async fn update_ad_spaces(
        &self,
        caller: &Principal,
        publisher_id: u64,
        new_ad_spaces: Vec<String>,
    ) -> Result<()>;

    /// Credits `amount` to the earnings of publisher `publisher_id`.
    ///
    /// Deliberately not owner-gated: any caller may credit earnings. This
    /// models the external ad-serving oracle crediting a publisher. Fails with
    /// `PublisherNotFound` if the publisher does not exist, or
    /// `EarningsOverflow` if the sum would exceed u64; earnings are unchanged
    /// on failure.
    async fn record_earnings(&self, publisher_id: u64, amount: u64) -> Result<()>;

    /// Retrieves the publisher at `publisher_id`.
    ///
    /// Fails with `PublisherNotFound` if absent. Read-only, no side effects.
    async fn get_publisher(&self, publisher_id: u64) -> Result<PublisherRecord>;

    /// Returns the total publisher count.
    async fn count(&self) -> Result<u64>;

    /// Returns the next publisher id that will be assigned.
    async fn next_id(&self) -> Result<u64>;

    /// Returns aggregate statistics over all publishers.
    async fn stats(&self) -> Result<PublisherStats>;
}
