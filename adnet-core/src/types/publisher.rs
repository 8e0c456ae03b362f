//! Publisher types for the ADNET registry.
//!
//! Publishers register their sites and the ad spaces they offer. Earnings are
//! credited additively by the ad-serving side and only ever increase.

use serde::{Deserialize, Serialize};

use crate::constants::UNASSIGNED_ID;
use crate::error::{AdNetError, Result};
use crate::types::{current_timestamp, Principal};

/// A registered publisher site.
///
/// The `owner` and `website` are fixed at registration. `ad_spaces` is
/// replaced wholesale by the owner; `earnings` accumulates additively and is
/// credited by any caller, not just the owner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublisherRecord {
    /// Unique identifier (assigned by registry).
    pub id: u64,
    /// The principal that registered the site. Immutable.
    pub owner: Principal,
    /// Site URL or name. Immutable after registration.
    pub website: String,
    /// Ordered list of offered ad space labels. Owner-mutable, full replacement.
    pub ad_spaces: Vec<String>,
    /// Accumulated earnings. Monotonically non-decreasing, starts at 0.
    pub earnings: u64,
    /// Unix timestamp when the publisher registered.
    pub created_at: u64,
}

impl PublisherRecord {
    /// Creates a new publisher record with zero earnings.
    ///
    /// The id is left unassigned; the registry assigns it on insertion.
    pub fn new(owner: Principal, website: String, ad_spaces: Vec<String>) -> Self {
        Self {
            id: UNASSIGNED_ID,
            owner,
            website,
            ad_spaces,
            earnings: 0,
            created_at: current_timestamp(),
        }
    }

    /// Returns true if the given principal owns this publisher record.
    pub fn is_owned_by(&self, caller: &Principal) -> bool {
        &self.owner == caller
    }

    /// Credits `amount` to the accumulated earnings.
    ///
    /// Fails with [`AdNetError::EarningsOverflow`] if the sum would exceed the
    /// u64 domain, leaving `earnings` unchanged.
    pub fn credit(&mut self, amount: u64) -> Result<()> {
        self.earnings = self
            .earnings
            .checked_add(amount)
            .ok_or(AdNetError::EarningsOverflow {
                current: self.earnings,
                amount,
            })?;
        Ok(())
    }
}

/// Statistics over the publishers in a registry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublisherStats {
    /// Total number of registered publishers.
    pub total_count: u64,
    /// Sum of all credited earnings.
    pub total_earnings: u64,
}

impl PublisherStats {
    /// Creates empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates stats with a newly registered publisher.
    pub fn add(&mut self, publisher: &PublisherRecord) {
        self.total_count += 1;
        self.total_earnings = self.total_earnings.saturating_add(publisher.earnings);
    }

    /// Updates stats with a credited amount.
    pub fn credit(&mut self, amount: u64) {
        self.total_earnings = self.total_earnings.saturating_add(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> Principal {
        Principal::new("ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM").unwrap()
    }

    #[test]
    fn test_new_publisher_defaults() {
        let publisher = PublisherRecord::new(
            owner(),
            "https://example.com".into(),
            vec!["header".into(), "sidebar".into()],
        );

        assert_eq!(publisher.id, UNASSIGNED_ID);
        assert_eq!(publisher.earnings, 0);
        assert_eq!(publisher.ad_spaces, vec!["header", "sidebar"]);
        assert!(publisher.created_at > 0);
    }

    #[test]
    fn test_credit_accumulates() {
        let mut publisher = PublisherRecord::new(owner(), "site".into(), vec![]);
        publisher.credit(100).unwrap();
        publisher.credit(150).unwrap();
        assert_eq!(publisher.earnings, 250);
    }

    #[test]
    fn test_credit_overflow_leaves_earnings_unchanged() {
        let mut publisher = PublisherRecord::new(owner(), "site".into(), vec![]);
        publisher.credit(u64::MAX).unwrap();

        let err = publisher.credit(1).unwrap_err();
        assert!(matches!(
            err,
            AdNetError::EarningsOverflow {
                current: u64::MAX,
                amount: 1
            }
        ));
        assert_eq!(publisher.earnings, u64::MAX);
    }

    #[test]
    fn test_ownership() {
        let publisher = PublisherRecord::new(owner(), "site".into(), vec![]);
        assert!(publisher.is_owned_by(&owner()));

        let other = Principal::new("ST3PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM").unwrap();
        assert!(!publisher.is_owned_by(&other));
    }

    #[test]
    fn test_stats() {
        let mut stats = PublisherStats::new();
        stats.add(&PublisherRecord::new(owner(), "a".into(), vec![]));
        stats.add(&PublisherRecord::new(owner(), "b".into(), vec![]));
        stats.credit(100);
        stats.credit(150);

        assert_eq!(stats.total_count, 2);
        assert_eq!(stats.total_earnings, 250);
    }

    #[test]
    fn test_serde_roundtrip() {
        let publisher =
            PublisherRecord::new(owner(), "https://example.com".into(), vec!["footer".into()]);
        let json = serde_json::to_string(&publisher).unwrap();
        let back: PublisherRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, publisher);
    }
}
