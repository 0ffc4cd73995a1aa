use chrono::{DateTime, Duration, Utc};
use log::warn;

use super::{
    dto::{HistoryPage, SnapshotView},
    storage::SnapshotStore,
};

pub const DEFAULT_HOURS: u32 = 24;
pub const MISSING_INDEX_HINT: &str = "No data available yet. The snapshot index needs to be created, or no snapshots have been saved.";

/// Look-back window from a raw query value. Only the leading integer counts
/// (`"12.5"` and `"12h"` read as 12); anything without one, negative values
/// included, falls back to the default.
pub fn parse_hours(raw: Option<&str>) -> u32 {
    raw.map(|value| value.trim_start())
        .map(|value| value.strip_prefix('+').unwrap_or(value))
        .and_then(|value| {
            let digits = value
                .find(|c: char| !c.is_ascii_digit())
                .map_or(value, |end| &value[..end]);
            digits.parse::<u32>().ok()
        })
        .unwrap_or(DEFAULT_HOURS)
}

/// Snapshots of `wallet_address` from the last `hours`, oldest first. Store
/// failures are logged and reported as an empty page.
pub fn read_history(
    store: &dyn SnapshotStore,
    wallet_address: &str,
    hours: u32,
    now: DateTime<Utc>,
) -> HistoryPage {
    let from = now
        .checked_sub_signed(Duration::hours(i64::from(hours)))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);

    match store.since(wallet_address, from) {
        Ok(mut snapshots) => {
            snapshots.sort_by_key(|snapshot| snapshot.timestamp);
            let snapshots: Vec<SnapshotView> =
                snapshots.into_iter().map(SnapshotView::from).collect();

            HistoryPage {
                count: snapshots.len(),
                snapshots,
                hours,
                message: None,
            }
        }
        Err(e) => {
            warn!("Error fetching balance history: {}", e);

            let mut page = HistoryPage::empty(hours);
            if e.to_string().contains("index") {
                page.message = Some(MISSING_INDEX_HINT.to_string());
            }
            page
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::StoreError,
        snapshot::{
            dto::{BalanceSnapshot, NewBalanceSnapshot, WalletTotals},
            storage::SledSnapshotStore,
        },
    };
    use chrono::TimeZone;
    use tempfile::TempDir;

    struct FailingStore(fn() -> StoreError);

    impl SnapshotStore for FailingStore {
        fn insert(&self, _snapshot: NewBalanceSnapshot) -> Result<BalanceSnapshot, StoreError> {
            Err((self.0)())
        }

        fn since(
            &self,
            _wallet_address: &str,
            _from: DateTime<Utc>,
        ) -> Result<Vec<BalanceSnapshot>, StoreError> {
            Err((self.0)())
        }
    }

    fn create_test_store() -> (SledSnapshotStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db = sled::open(temp_dir.path()).unwrap();
        (SledSnapshotStore::new(db), temp_dir)
    }

    #[test]
    fn test_parse_hours() {
        assert_eq!(parse_hours(None), 24);
        assert_eq!(parse_hours(Some("72")), 72);
        assert_eq!(parse_hours(Some("abc")), 24);
        assert_eq!(parse_hours(Some("-5")), 24);
        assert_eq!(parse_hours(Some("")), 24);
    }

    #[test]
    fn test_parse_hours_reads_leading_integer() {
        assert_eq!(parse_hours(Some("12abc")), 12);
        assert_eq!(parse_hours(Some("12.5")), 12);
        assert_eq!(parse_hours(Some(" 48")), 48);
        assert_eq!(parse_hours(Some("+6")), 6);
        assert_eq!(parse_hours(Some("h12")), 24);
    }

    #[test]
    fn test_empty_store_is_empty_page() {
        let (store, _temp) = create_test_store();

        let page = read_history(&store, "0xa", 24, Utc::now());

        assert_eq!(page.count, 0);
        assert!(page.snapshots.is_empty());
        assert_eq!(page.hours, 24);
        assert!(page.message.is_none());
    }

    #[test]
    fn test_window_bounds_and_order() {
        let (store, _temp) = create_test_store();
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();

        for hours_ago in [2, 80, 30, 1] {
            store
                .insert(NewBalanceSnapshot::new(
                    "0xa",
                    now - Duration::hours(hours_ago),
                    WalletTotals::default(),
                ))
                .unwrap();
        }

        let day = read_history(&store, "0xa", 24, now);
        let three_days = read_history(&store, "0xa", 72, now);

        assert_eq!(day.count, 2);
        assert_eq!(three_days.count, 3);
        assert!(three_days
            .snapshots
            .windows(2)
            .all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn test_huge_window_does_not_overflow() {
        let (store, _temp) = create_test_store();
        let now = Utc::now();
        store
            .insert(NewBalanceSnapshot::new("0xa", now, WalletTotals::default()))
            .unwrap();

        let page = read_history(&store, "0xa", u32::MAX, now);

        assert_eq!(page.count, 1);
        assert_eq!(page.hours, u32::MAX);
    }

    #[test]
    fn test_index_failure_degrades_with_hint() {
        let store = FailingStore(|| StoreError::DanglingIndex("missing".to_string()));

        let page = read_history(&store, "0xa", 24, Utc::now());

        assert_eq!(page.count, 0);
        assert_eq!(page.message.as_deref(), Some(MISSING_INDEX_HINT));
    }

    #[test]
    fn test_other_failure_degrades_without_hint() {
        let store = FailingStore(|| StoreError::Sled(sled::Error::Unsupported("closed".to_string())));

        let page = read_history(&store, "0xa", 168, Utc::now());

        assert_eq!(page.count, 0);
        assert_eq!(page.hours, 168);
        assert!(page.message.is_none());
    }
}
