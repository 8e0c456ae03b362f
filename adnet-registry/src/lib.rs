//! # ADNET Registry
//!
//! Storage backends for the ADNET ad and publisher registries.
//!
//! This crate provides two backends:
//!
//! - **Memory**: Fast in-memory storage for development and testing
//! - **File**: Persistent file-based storage for single-node deployments
//!
//! ## Example
//!
//! ```rust,ignore
//! use adnet_registry::{MemoryAdRegistry, AdRegistry};
//!
//! // Create an in-memory ad registry
//! let registry = MemoryAdRegistry::new();
//!
//! // Create a campaign as the caller principal
//! let id = registry.create_ad(&caller, url, demographics, 1000).await?;
//!
//! // Only the creator may mutate it
//! registry.update_ad_status(&caller, id, "paused").await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod memory;
mod file;

pub use memory::{MemoryAdRegistry, MemoryPublisherRegistry};
pub use file::FileLedger;

// Re-export the traits from core
pub use adnet_core::traits::{AdRegistry, PublisherRegistry};
