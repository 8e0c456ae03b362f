//! Ad campaign types for the ADNET registry.
//!
//! Advertisers create campaigns; only the creating advertiser may mutate a
//! campaign's status or budget afterwards.

use serde::{Deserialize, Serialize};

use crate::constants::{STATUS_ACTIVE, UNASSIGNED_ID};
use crate::types::{current_timestamp, Principal};

/// A stored ad campaign.
///
/// The `advertiser` is set exactly once, at creation, and never changes. The
/// `status` field is an open string domain: `"active"`, `"paused"` and
/// `"completed"` are conventional but any token is accepted, and no state
/// machine is enforced between them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdRecord {
    /// Unique identifier (assigned by registry).
    pub id: u64,
    /// The principal that created the campaign. Immutable.
    pub advertiser: Principal,
    /// Opaque reference to the ad content.
    pub content_url: String,
    /// Ordered demographic tags, fixed at creation. Order is significant.
    pub target_demographics: Vec<String>,
    /// Campaign budget. Owner-mutable, absolute replacement.
    pub budget: u64,
    /// Campaign status token. Owner-mutable, open domain.
    pub status: String,
    /// Unix timestamp when the campaign was created.
    pub created_at: u64,
}

impl AdRecord {
    /// Creates a new campaign record with status `"active"`.
    ///
    /// The id is left unassigned; the registry assigns it on insertion.
    pub fn new(
        advertiser: Principal,
        content_url: String,
        target_demographics: Vec<String>,
        budget: u64,
    ) -> Self {
        Self {
            id: UNASSIGNED_ID,
            advertiser,
            content_url,
            target_demographics,
            budget,
            status: STATUS_ACTIVE.to_string(),
            created_at: current_timestamp(),
        }
    }

    /// Returns true if the given principal owns this campaign.
    pub fn is_owned_by(&self, caller: &Principal) -> bool {
        &self.advertiser == caller
    }
}

/// Statistics over the ad campaigns in a registry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdStats {
    /// Total number of campaigns.
    pub total_count: u64,
    /// Sum of the current budgets of all campaigns.
    pub total_budget: u64,
}

impl AdStats {
    /// Creates empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates stats with a newly created campaign.
    pub fn add(&mut self, ad: &AdRecord) {
        self.total_count += 1;
        self.total_budget = self.total_budget.saturating_add(ad.budget);
    }

    /// Adjusts stats for a budget replacement on an existing campaign.
    pub fn rebudget(&mut self, old_budget: u64, new_budget: u64) {
        self.total_budget = self
            .total_budget
            .saturating_sub(old_budget)
            .saturating_add(new_budget);
    }
}
