//! # ADNET Core
//!
//! Core types, errors, and traits for the ADNET decentralized advertising registry.
//!
//! This crate provides the foundational building blocks used by all other ADNET crates:
//!
//! - **Types**: Domain models for ad campaigns, publishers, and caller principals
//! - **Errors**: Comprehensive error types with context
//! - **Constants**: Registry constants and limits
//! - **Traits**: Registry interfaces implemented by the storage backends
//!
//! ## Example
//!
//! ```rust
//! use adnet_core::{AdRecord, Principal};
//!
//! let advertiser: Principal = "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM".parse().unwrap();
//! let ad = AdRecord::new(
//!     advertiser,
//!     "https://example.com/ad1".into(),
//!     vec!["male".into(), "18-35".into()],
//!     1000,
//! );
//! assert_eq!(ad.status, "active");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{AdNetError, Result};
pub use traits::*;
pub use types::*;
