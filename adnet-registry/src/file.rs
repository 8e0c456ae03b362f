//! File-backed ledger with persistence for both registries.
//!
//! Persists the ad table and the publisher table in a single snapshot file
//! with automatic saves. Suitable for single-node deployments where
//! durability is needed.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{debug, info, instrument, warn};

use adnet_core::constants::{SNAPSHOT_HEADER_SIZE, SNAPSHOT_MAGIC, SNAPSHOT_VERSION};
use adnet_core::error::{AdNetError, Result};
use adnet_core::traits::{AdRegistry, PublisherRegistry};
use adnet_core::types::{AdRecord, AdStats, Principal, PublisherRecord, PublisherStats};

use crate::{MemoryAdRegistry, MemoryPublisherRegistry};

/// On-disk snapshot of the whole ledger.
///
/// The id counters are not stored explicitly: records are never deleted, so
/// the next id is always the highest stored id plus one, which import
/// reconstructs exactly.
#[derive(Serialize, Deserialize)]
struct LedgerSnapshot {
    ads: Vec<AdRecord>,
    publishers: Vec<PublisherRecord>,
}

/// File-backed ledger holding both registries.
///
/// Uses memory registries internally with periodic persistence to disk.
///
/// # File Format
///
/// ```text
/// magic (4 bytes): "ADNT"
/// version (1 byte): 1
/// snapshot (variable): JSON-serialized LedgerSnapshot
/// ```
pub struct FileLedger {
    /// Path to the snapshot file
    path: PathBuf,
    /// In-memory ad registry
    ads: MemoryAdRegistry,
    /// In-memory publisher registry
    publishers: MemoryPublisherRegistry,
    /// Whether there are unsaved changes
    dirty: AtomicBool,
    /// Auto-save threshold (save after N writes)
    auto_save_threshold: u64,
    /// Writes since last save
    writes_since_save: AtomicU64,
}

impl FileLedger {
    /// Creates a new file ledger at the given path.
    ///
    /// If the file exists, it will be loaded. Otherwise, an empty ledger is
    /// created and the file will be created on first save.
    pub async fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let ledger = Self {
            path,
            ads: MemoryAdRegistry::new(),
            publishers: MemoryPublisherRegistry::new(),
            dirty: AtomicBool::new(false),
            auto_save_threshold: 100,
            writes_since_save: AtomicU64::new(0),
        };

        if ledger.path.exists() {
            ledger.load().await?;
        }

        Ok(ledger)
    }

    /// Creates a file ledger with custom auto-save threshold.
    pub async fn with_auto_save(path: impl AsRef<Path>, threshold: u64) -> Result<Self> {
        let mut ledger = Self::new(path).await?;
        ledger.auto_save_threshold = threshold;
        Ok(ledger)
    }

    /// Loads the snapshot from the file.
    #[instrument(skip(self))]
    async fn load(&self) -> Result<()> {
        let mut file = fs::File::open(&self.path).await.map_err(|e| {
            AdNetError::IoError(std::io::Error::new(
                e.kind(),
                format!("Failed to open ledger file: {}", e),
            ))
        })?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).await?;

        if contents.len() < SNAPSHOT_HEADER_SIZE {
            return Err(AdNetError::LedgerError("File too short".into()));
        }

        // Verify magic
        if &contents[0..4] != SNAPSHOT_MAGIC {
            return Err(AdNetError::LedgerError("Invalid magic bytes".into()));
        }

        // Check version
        let version = contents[4];
        if version != SNAPSHOT_VERSION {
            return Err(AdNetError::VersionMismatch {
                expected: SNAPSHOT_VERSION,
                actual: version,
            });
        }

        let snapshot: LedgerSnapshot = serde_json::from_slice(&contents[SNAPSHOT_HEADER_SIZE..])?;

        info!(
            ads = snapshot.ads.len(),
            publishers = snapshot.publishers.len(),
            "Loading ledger from file"
        );

        self.ads.import(snapshot.ads)?;
        self.publishers.import(snapshot.publishers)?;

        self.dirty.store(false, Ordering::SeqCst);
        debug!("Ledger loaded successfully");

        Ok(())
    }

    /// Saves the snapshot to the file.
    #[instrument(skip(self))]
    pub async fn save(&self) -> Result<()> {
        let snapshot = LedgerSnapshot {
            ads: self.ads.all_ads(),
            publishers: self.publishers.all_publishers(),
        };

        info!(
            ads = snapshot.ads.len(),
            publishers = snapshot.publishers.len(),
            path = ?self.path,
            "Saving ledger to file"
        );

        let serialized = serde_json::to_vec(&snapshot)?;

        let mut contents = Vec::with_capacity(SNAPSHOT_HEADER_SIZE + serialized.len());
        contents.extend_from_slice(SNAPSHOT_MAGIC);
        contents.push(SNAPSHOT_VERSION);
        contents.extend_from_slice(&serialized);

        // Write atomically (write to temp, then rename)
        let temp_path = self.path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(&contents).await?;
        file.sync_all().await?;

        fs::rename(&temp_path, &self.path).await?;

        self.dirty.store(false, Ordering::SeqCst);
        self.writes_since_save.store(0, Ordering::SeqCst);

        debug!("Ledger saved successfully");
        Ok(())
    }

    /// Checks if there are unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Forces a save if dirty.
    pub async fn flush(&self) -> Result<()> {
        if self.is_dirty() {
            self.save().await?;
        }
        Ok(())
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the underlying ad registry for direct access.
    pub fn ads(&self) -> &MemoryAdRegistry {
        &self.ads
    }

    /// Returns the underlying publisher registry for direct access.
    pub fn publishers(&self) -> &MemoryPublisherRegistry {
        &self.publishers
    }

    /// Returns ad registry statistics.
    pub fn ad_stats(&self) -> AdStats {
        self.ads.stats()
    }

    /// Returns publisher registry statistics.
    pub fn publisher_stats(&self) -> PublisherStats {
        self.publishers.stats()
    }

    /// Marks the ledger dirty and saves if the auto-save threshold is reached.
    async fn mark_write(&self) -> Result<()> {
        self.dirty.store(true, Ordering::SeqCst);
        let writes = self.writes_since_save.fetch_add(1, Ordering::SeqCst);
        if writes >= self.auto_save_threshold {
            self.save().await?;
        }
        Ok(())
    }
}

impl Drop for FileLedger {
    fn drop(&mut self) {
        // Best-effort only; async save is not possible in Drop
        if self.is_dirty() {
            warn!("FileLedger dropped with unsaved changes");
        }
    }
}

#[async_trait]
impl AdRegistry for FileLedger {
    async fn create_ad(
        &self,
        caller: &Principal,
        content_url: String,
        target_demographics: Vec<String>,
        budget: u64,
    ) -> Result<u64> {
        let id = self
            .ads
            .create_ad(caller, content_url, target_demographics, budget)
            .await?;
        self.mark_write().await?;
        Ok(id)
    }

    async fn update_ad_status(
        &self,
        caller: &Principal,
        ad_id: u64,
        new_status: &str,
    ) -> Result<()> {
        self.ads.update_ad_status(caller, ad_id, new_status).await?;
        self.mark_write().await
    }

    async fn update_ad_budget(
        &self,
        caller: &Principal,
        ad_id: u64,
        new_budget: u64,
    ) -> Result<()> {
        self.ads.update_ad_budget(caller, ad_id, new_budget).await?;
        self.mark_write().await
    }

    async fn get_ad(&self, ad_id: u64) -> Result<AdRecord> {
        self.ads.get_ad(ad_id).await
    }

    async fn count(&self) -> Result<u64> {
        AdRegistry::count(&self.ads).await
    }

    async fn next_id(&self) -> Result<u64> {
        AdRegistry::next_id(&self.ads).await
    }

    async fn stats(&self) -> Result<AdStats> {
        AdRegistry::stats(&self.ads).await
    }
}

#[async_trait]
impl PublisherRegistry for FileLedger {
    async fn register_publisher(
        &self,
        caller: &Principal,
        website: String,
        ad_spaces: Vec<String>,
    ) -> Result<u64> {
        let id = self
            .publishers
            .register_publisher(caller, website, ad_spaces)
            .await?;
        self.mark_write().await?;
        Ok(id)
    }

    async fn update_ad_spaces(
        &self,
        caller: &Principal,
        publisher_id: u64,
        new_ad_spaces: Vec<String>,
    ) -> Result<()> {
        self.publishers
            .update_ad_spaces(caller, publisher_id, new_ad_spaces)
            .await?;
        self.mark_write().await
    }

    async fn record_earnings(&self, publisher_id: u64, amount: u64) -> Result<()> {
        self.publishers.record_earnings(publisher_id, amount).await?;
        self.mark_write().await
    }

    async fn get_publisher(&self, publisher_id: u64) -> Result<PublisherRecord> {
        self.publishers.get_publisher(publisher_id).await
    }

    async fn count(&self) -> Result<u64> {
        PublisherRegistry::count(&self.publishers).await
    }

    async fn next_id(&self) -> Result<u64> {
        PublisherRegistry::next_id(&self.publishers).await
    }

    async fn stats(&self) -> Result<PublisherStats> {
        PublisherRegistry::stats(&self.publishers).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn alice() -> Principal {
        Principal::new("ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM").unwrap()
    }

    async fn create_sample_ad(ledger: &FileLedger) -> u64 {
        ledger
            .create_ad(&alice(), "https://example.com/ad1".into(), vec!["all".into()], 1000)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_new_empty_ledger() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("adnet.ledger");

        let ledger = FileLedger::new(&path).await.unwrap();
        assert!(ledger.ads().is_empty());
        assert!(ledger.publishers().is_empty());
        assert!(!path.exists()); // File not created until save
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("adnet.ledger");

        // Create and populate
        {
            let ledger = FileLedger::new(&path).await.unwrap();
            create_sample_ad(&ledger).await;
            create_sample_ad(&ledger).await;
            let pid = ledger
                .register_publisher(&alice(), "https://example.com".into(), vec!["header".into()])
                .await
                .unwrap();
            ledger.record_earnings(pid, 250).await.unwrap();
            ledger.save().await.unwrap();
        }

        // Load in new instance
        {
            let ledger = FileLedger::new(&path).await.unwrap();
            assert_eq!(ledger.ads().len(), 2);
            assert_eq!(ledger.publishers().len(), 1);

            let ad = ledger.get_ad(1).await.unwrap();
            assert_eq!(ad.budget, 1000);

            let publisher = ledger.get_publisher(1).await.unwrap();
            assert_eq!(publisher.earnings, 250);

            // Counters continue past loaded records
            assert_eq!(AdRegistry::next_id(&ledger).await.unwrap(), 3);
            assert_eq!(PublisherRegistry::next_id(&ledger).await.unwrap(), 2);

            let id = create_sample_ad(&ledger).await;
            assert_eq!(id, 3);
        }
    }

    #[tokio::test]
    async fn test_dirty_tracking() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("adnet.ledger");

        let ledger = FileLedger::new(&path).await.unwrap();
        assert!(!ledger.is_dirty());

        create_sample_ad(&ledger).await;
        assert!(ledger.is_dirty());

        ledger.save().await.unwrap();
        assert!(!ledger.is_dirty());

        ledger.record_earnings(1, 1).await.unwrap_err(); // no publisher: no write
        let pid = ledger
            .register_publisher(&alice(), "site".into(), vec![])
            .await
            .unwrap();
        assert!(ledger.is_dirty());
        ledger.save().await.unwrap();

        ledger.record_earnings(pid, 10).await.unwrap();
        assert!(ledger.is_dirty());
    }

    #[tokio::test]
    async fn test_auto_save() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("adnet.ledger");

        // Auto-saves when writes_since_save reaches the threshold, so the
        // third write triggers it with a threshold of 2.
        let ledger = FileLedger::with_auto_save(&path, 2).await.unwrap();

        create_sample_ad(&ledger).await;
        create_sample_ad(&ledger).await;
        create_sample_ad(&ledger).await;

        let reloaded = FileLedger::new(&path).await.unwrap();
        assert_eq!(reloaded.ads().len(), 3);
    }

    #[tokio::test]
    async fn test_flush() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("adnet.ledger");

        let ledger = FileLedger::new(&path).await.unwrap();
        create_sample_ad(&ledger).await;

        ledger.flush().await.unwrap();
        assert!(!ledger.is_dirty());
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_invalid_file_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("adnet.ledger");

        fs::write(&path, b"invalid data").await.unwrap();

        let result = FileLedger::new(&path).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_version_mismatch_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("adnet.ledger");

        let mut contents = Vec::new();
        contents.extend_from_slice(SNAPSHOT_MAGIC);
        contents.push(SNAPSHOT_VERSION + 1);
        contents.extend_from_slice(b"{\"ads\":[],\"publishers\":[]}");
        fs::write(&path, &contents).await.unwrap();

        let result = FileLedger::new(&path).await;
        assert!(matches!(result, Err(AdNetError::VersionMismatch { .. })));
    }

    #[tokio::test]
    async fn test_atomic_save() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("adnet.ledger");
        let temp_path = path.with_extension("tmp");

        let ledger = FileLedger::new(&path).await.unwrap();
        create_sample_ad(&ledger).await;
        ledger.save().await.unwrap();

        // Temp file should not exist after save
        assert!(!temp_path.exists());
        assert!(path.exists());
    }
}
