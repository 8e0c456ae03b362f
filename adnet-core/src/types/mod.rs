//! Domain types for ADNET.
//!
//! This module provides the core data structures used throughout the registry:
//!
//! - [`Principal`]: Caller identity attributed by the execution environment
//! - [`AdRecord`]: A stored ad campaign, owned by its advertiser
//! - [`PublisherRecord`]: A registered publisher site with accumulated earnings

mod principal;
mod ad;
mod publisher;

pub use principal::*;
pub use ad::*;
pub use publisher::*;

/// Returns current Unix timestamp in seconds.
pub(crate) fn current_timestamp() -> u64 {
    chrono::Utc::now().timestamp().max(0) as u64
}
