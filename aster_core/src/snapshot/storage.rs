use chrono::{DateTime, Utc};
use log::debug;
use sled::{Db, Tree};
use uuid::Uuid;

use super::dto::{BalanceSnapshot, NewBalanceSnapshot};
use crate::error::StoreError;

pub const SNAPSHOTS_TREE: &str = "balance_snapshots";
pub const SNAPSHOTS_BY_TIME_TREE: &str = "balance_snapshots_by_wallet_time";

const TIMESTAMP_LEN: usize = 8;

/// Append-only balance history.
pub trait SnapshotStore: Send + Sync {
    /// Persists a new snapshot under a freshly assigned id.
    fn insert(&self, snapshot: NewBalanceSnapshot) -> Result<BalanceSnapshot, StoreError>;

    /// Snapshots of `wallet_address` captured at or after `from`, oldest first.
    fn since(
        &self,
        wallet_address: &str,
        from: DateTime<Utc>,
    ) -> Result<Vec<BalanceSnapshot>, StoreError>;
}

/// Documents live in `balance_snapshots` keyed by id. A second tree keyed by
/// `wallet ‖ 0x00 ‖ capture millis (BE) ‖ id` serves time-range reads.
#[derive(Clone)]
pub struct SledSnapshotStore {
    db: Db,
}

impl SledSnapshotStore {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub fn snapshots_tree(&self) -> Result<Tree, StoreError> {
        Ok(self.db.open_tree(SNAPSHOTS_TREE)?)
    }

    pub fn index_tree(&self) -> Result<Tree, StoreError> {
        Ok(self.db.open_tree(SNAPSHOTS_BY_TIME_TREE)?)
    }

    pub fn get(&self, id: &str) -> Result<Option<BalanceSnapshot>, StoreError> {
        let tree = self.snapshots_tree()?;

        match tree.get(id)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.snapshots_tree()?.len())
    }
}

impl SnapshotStore for SledSnapshotStore {
    fn insert(&self, snapshot: NewBalanceSnapshot) -> Result<BalanceSnapshot, StoreError> {
        let snapshots = self.snapshots_tree()?;
        let index = self.index_tree()?;

        let id = Uuid::new_v4().to_string();
        let snapshot = BalanceSnapshot::from((id, snapshot));
        let document = serde_json::to_vec(&snapshot)?;

        // Document first, so a visible index entry always has a target.
        snapshots.insert(snapshot.id.as_bytes(), document)?;
        index.insert(
            index_key(&snapshot.wallet_address, snapshot.timestamp, &snapshot.id),
            snapshot.id.as_bytes(),
        )?;

        debug!("Stored snapshot {} for {}", snapshot.id, snapshot.wallet_address);

        Ok(snapshot)
    }

    fn since(
        &self,
        wallet_address: &str,
        from: DateTime<Utc>,
    ) -> Result<Vec<BalanceSnapshot>, StoreError> {
        let snapshots = self.snapshots_tree()?;
        let index = self.index_tree()?;

        let prefix = wallet_prefix(wallet_address);
        let mut start = prefix.clone();
        start.extend_from_slice(&millis(from));

        let mut found = Vec::new();

        for entry in index.range(start..) {
            let (key, id) = entry?;
            if !key.starts_with(&prefix) {
                break;
            }
            if key.len() < prefix.len() + TIMESTAMP_LEN {
                return Err(StoreError::MalformedKey);
            }

            let id = String::from_utf8_lossy(&id).into_owned();
            let document = snapshots
                .get(id.as_bytes())?
                .ok_or_else(|| StoreError::DanglingIndex(id.clone()))?;
            let snapshot: BalanceSnapshot = serde_json::from_slice(&document)?;

            if snapshot.timestamp >= from {
                found.push(snapshot);
            }
        }

        Ok(found)
    }
}

fn wallet_prefix(wallet_address: &str) -> Vec<u8> {
    let mut prefix = wallet_address.as_bytes().to_vec();
    prefix.push(0);
    prefix
}

fn millis(timestamp: DateTime<Utc>) -> [u8; TIMESTAMP_LEN] {
    (timestamp.timestamp_millis().max(0) as u64).to_be_bytes()
}

fn index_key(wallet_address: &str, timestamp: DateTime<Utc>, id: &str) -> Vec<u8> {
    let mut key = wallet_prefix(wallet_address);
    key.extend_from_slice(&millis(timestamp));
    key.extend_from_slice(id.as_bytes());
    key
}
