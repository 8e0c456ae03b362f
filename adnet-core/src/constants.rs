//! Registry constants for ADNET.
//!
//! Limits and tokens shared by every backend. The snapshot format constants
//! must stay in sync with `adnet-registry`'s file backend.

// ═══════════════════════════════════════════════════════════════════════════════
// STATUS TOKENS
// ═══════════════════════════════════════════════════════════════════════════════
// The status field is an open string domain: any token is accepted and no state
// machine is enforced. These are the conventional values clients use.

/// Status assigned to every ad campaign at creation.
pub const STATUS_ACTIVE: &str = "active";

/// Conventional status for a campaign the advertiser has paused.
pub const STATUS_PAUSED: &str = "paused";

/// Conventional status for a campaign that has run its course.
pub const STATUS_COMPLETED: &str = "completed";

// ═══════════════════════════════════════════════════════════════════════════════
// PRINCIPAL LIMITS
// ═══════════════════════════════════════════════════════════════════════════════

/// Maximum length of a caller principal string in bytes.
pub const PRINCIPAL_MAX_LEN: usize = 128;

// ═══════════════════════════════════════════════════════════════════════════════
// IDENTIFIERS
// ═══════════════════════════════════════════════════════════════════════════════

/// First id assigned by every registry counter.
///
/// Ids are strictly increasing from here with no gaps and no reuse.
pub const FIRST_ID: u64 = 1;

/// Sentinel id of a record that has not yet been stored in a registry.
pub const UNASSIGNED_ID: u64 = 0;

// ═══════════════════════════════════════════════════════════════════════════════
// SNAPSHOT FORMAT
// ═══════════════════════════════════════════════════════════════════════════════

/// Magic bytes at the start of a ledger snapshot file.
pub const SNAPSHOT_MAGIC: &[u8; 4] = b"ADNT";

/// Current snapshot format version.
/// Increment when making breaking changes to the snapshot layout.
pub const SNAPSHOT_VERSION: u8 = 1;

/// Size of the snapshot header (magic + version).
pub const SNAPSHOT_HEADER_SIZE: usize = 5;
