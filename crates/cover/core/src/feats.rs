//! Feat-upgrade attribution cache.
//!
//! When a feat raises a computed category, the detector leaves a record for
//! the UI to pick up ("why does this target have standard cover?"). Records
//! are keyed by the ordered attacker/target pair, read at most once, and
//! discarded once older than the TTL. Nothing in the computation reads them.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::config::CoverSettings;
use crate::state::{CoverCategory, EntityId, PairKey};

/// A feat-driven category change for one attacker/target pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatUpgradeRecord {
    pub attacker: EntityId,
    pub target: EntityId,
    pub from: CoverCategory,
    pub to: CoverCategory,
    /// Name of the feat responsible.
    pub reason: String,
    pub created_at: Instant,
}

impl FeatUpgradeRecord {
    pub fn key(&self) -> PairKey {
        PairKey::new(self.attacker, self.target)
    }

    fn is_stale(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.created_at) > ttl
    }
}

/// Pull-once store of [`FeatUpgradeRecord`]s with last-write-wins inserts.
#[derive(Debug)]
pub struct FeatUpgradeCache {
    ttl: Duration,
    records: Mutex<HashMap<PairKey, FeatUpgradeRecord>>,
}

impl FeatUpgradeCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            records: Mutex::new(HashMap::new()),
        }
    }

    // A poisoned lock only means another query panicked mid-insert; the map
    // itself is still usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<PairKey, FeatUpgradeRecord>> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Stores `record`, replacing any earlier record for the same pair.
    ///
    /// Records gone stale by the new record's timestamp are dropped first, so
    /// pairs nobody pulls do not pile up.
    pub fn insert(&self, record: FeatUpgradeRecord) {
        let key = record.key();
        tracing::debug!(pair = %key, from = %record.from, to = %record.to, reason = %record.reason, "feat upgrade recorded");
        let mut records = self.lock();
        records.retain(|_, existing| !existing.is_stale(record.created_at, self.ttl));
        records.insert(key, record);
    }

    /// Removes and returns the record for `key` unless it has gone stale.
    pub fn take(&self, key: PairKey) -> Option<FeatUpgradeRecord> {
        self.take_at(key, Instant::now())
    }

    /// [`take`](Self::take) against an explicit clock reading.
    pub fn take_at(&self, key: PairKey, now: Instant) -> Option<FeatUpgradeRecord> {
        let record = self.lock().remove(&key)?;
        if record.is_stale(now, self.ttl) {
            tracing::trace!(pair = %key, "discarding stale feat upgrade record");
            return None;
        }
        Some(record)
    }

    /// Drops every record older than the TTL. Returns how many were removed.
    pub fn purge_stale(&self, now: Instant) -> usize {
        let mut records = self.lock();
        let before = records.len();
        records.retain(|_, record| !record.is_stale(now, self.ttl));
        before - records.len()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for FeatUpgradeCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(CoverSettings::DEFAULT_FEAT_RECORD_TTL_SECS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(attacker: u32, target: u32, created_at: Instant) -> FeatUpgradeRecord {
        FeatUpgradeRecord {
            attacker: EntityId(attacker),
            target: EntityId(target),
            from: CoverCategory::Lesser,
            to: CoverCategory::Standard,
            reason: String::from("ceaseless shadows"),
            created_at,
        }
    }

    #[test]
    fn records_are_pulled_once() {
        let cache = FeatUpgradeCache::default();
        let now = Instant::now();
        cache.insert(record(1, 2, now));

        let key = PairKey::new(EntityId(1), EntityId(2));
        assert_eq!(cache.take_at(key, now).map(|r| r.to), Some(CoverCategory::Standard));
        assert_eq!(cache.take_at(key, now), None);
    }

    #[test]
    fn pair_order_matters() {
        let cache = FeatUpgradeCache::default();
        let now = Instant::now();
        cache.insert(record(1, 2, now));
        assert_eq!(cache.take_at(PairKey::new(EntityId(2), EntityId(1)), now), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn stale_records_are_not_served() {
        let cache = FeatUpgradeCache::new(Duration::from_secs(15));
        let created = Instant::now();
        cache.insert(record(1, 2, created));

        let later = created + Duration::from_secs(16);
        assert_eq!(cache.take_at(PairKey::new(EntityId(1), EntityId(2)), later), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn last_write_wins() {
        let cache = FeatUpgradeCache::default();
        let now = Instant::now();
        cache.insert(record(1, 2, now));
        let mut newer = record(1, 2, now);
        newer.to = CoverCategory::Greater;
        cache.insert(newer);

        assert_eq!(cache.len(), 1);
        let taken = cache.take_at(PairKey::new(EntityId(1), EntityId(2)), now);
        assert_eq!(taken.map(|r| r.to), Some(CoverCategory::Greater));
    }

    #[test]
    fn purge_drops_only_expired_entries() {
        let cache = FeatUpgradeCache::new(Duration::from_secs(15));
        let start = Instant::now();
        cache.insert(record(1, 2, start));
        cache.insert(record(3, 4, start + Duration::from_secs(10)));

        assert_eq!(cache.purge_stale(start + Duration::from_secs(20)), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn insert_drops_records_nobody_pulled() {
        let cache = FeatUpgradeCache::new(Duration::from_secs(15));
        let start = Instant::now();
        cache.insert(record(1, 2, start));
        cache.insert(record(1, 3, start + Duration::from_secs(5)));
        cache.insert(record(4, 5, start + Duration::from_secs(16)));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.take_at(PairKey::new(EntityId(1), EntityId(2)), start), None);
    }
}
