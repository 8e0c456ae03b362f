//! Request/response DTOs for the API.
//!
//! Kept separate from the domain types so the wire shape can evolve
//! independently of the registry.

use serde::{Deserialize, Serialize};

use adnet_core::types::{AdRecord, AdStats, PublisherRecord, PublisherStats};

// ═══════════════════════════════════════════════════════════════════════════════
// HEALTH
// ═══════════════════════════════════════════════════════════════════════════════

/// Response for `GET /health`.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` when the server is up.
    pub status: &'static str,
    /// Server version.
    pub version: &'static str,
}

// ═══════════════════════════════════════════════════════════════════════════════
// ADS
// ═══════════════════════════════════════════════════════════════════════════════

/// Request body for `POST /api/v1/ads`.
#[derive(Deserialize)]
pub struct CreateAdRequest {
    /// Opaque reference to the ad content.
    pub content_url: String,
    /// Ordered demographic tags.
    #[serde(default)]
    pub target_demographics: Vec<String>,
    /// Campaign budget.
    pub budget: u64,
}

/// Response for `POST /api/v1/ads`.
#[derive(Serialize)]
pub struct CreateAdResponse {
    /// The assigned campaign id.
    pub ad_id: u64,
}

/// Request body for `PUT /api/v1/ads/:id/status`.
#[derive(Deserialize)]
pub struct UpdateAdStatusRequest {
    /// The new status token (open domain).
    pub status: String,
}

/// Request body for `PUT /api/v1/ads/:id/budget`.
#[derive(Deserialize)]
pub struct UpdateAdBudgetRequest {
    /// The new budget (absolute, not a delta).
    pub budget: u64,
}

/// An ad campaign as returned by the API.
#[derive(Serialize)]
pub struct AdDto {
    /// Campaign id.
    pub id: u64,
    /// Creating advertiser principal.
    pub advertiser: String,
    /// Ad content reference.
    pub content_url: String,
    /// Ordered demographic tags.
    pub target_demographics: Vec<String>,
    /// Current budget.
    pub budget: u64,
    /// Current status token.
    pub status: String,
    /// Unix timestamp of creation.
    pub created_at: u64,
}

impl From<AdRecord> for AdDto {
    fn from(ad: AdRecord) -> Self {
        Self {
            id: ad.id,
            advertiser: ad.advertiser.to_string(),
            content_url: ad.content_url,
            target_demographics: ad.target_demographics,
            budget: ad.budget,
            status: ad.status,
            created_at: ad.created_at,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PUBLISHERS
// ═══════════════════════════════════════════════════════════════════════════════

/// Request body for `POST /api/v1/publishers`.
#[derive(Deserialize)]
pub struct RegisterPublisherRequest {
    /// Site URL or name.
    pub website: String,
    /// Ordered list of offered ad space labels.
    #[serde(default)]
    pub ad_spaces: Vec<String>,
}

/// Response for `POST /api/v1/publishers`.
#[derive(Serialize)]
pub struct RegisterPublisherResponse {
    /// The assigned publisher id.
    pub publisher_id: u64,
}

/// Request body for `PUT /api/v1/publishers/:id/ad-spaces`.
#[derive(Deserialize)]
pub struct UpdateAdSpacesRequest {
    /// Full replacement for the ad space list.
    pub ad_spaces: Vec<String>,
}

/// Request body for `POST /api/v1/publishers/:id/earnings`.
#[derive(Deserialize)]
pub struct RecordEarningsRequest {
    /// Amount to credit (additive).
    pub amount: u64,
}

/// A publisher as returned by the API.
#[derive(Serialize)]
pub struct PublisherDto {
    /// Publisher id.
    pub id: u64,
    /// Registering owner principal.
    pub owner: String,
    /// Site URL or name.
    pub website: String,
    /// Offered ad space labels.
    pub ad_spaces: Vec<String>,
    /// Accumulated earnings.
    pub earnings: u64,
    /// Unix timestamp of registration.
    pub created_at: u64,
}

impl From<PublisherRecord> for PublisherDto {
    fn from(publisher: PublisherRecord) -> Self {
        Self {
            id: publisher.id,
            owner: publisher.owner.to_string(),
            website: publisher.website,
            ad_spaces: publisher.ad_spaces,
            earnings: publisher.earnings,
            created_at: publisher.created_at,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// STATS
// ═══════════════════════════════════════════════════════════════════════════════

/// Response for `GET /api/v1/stats`.
#[derive(Serialize)]
pub struct StatsResponse {
    /// Ad registry aggregates.
    pub ads: AdStats,
    /// Publisher registry aggregates.
    pub publishers: PublisherStats,
}
