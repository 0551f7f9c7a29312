// This entire module is only compiled when the 'serde' feature is enabled.
#![cfg(feature = "serde")]

use crate::clock::{Clock, SystemClock};
use crate::entry::CacheEntry;
use crate::error::EntryError;
use crate::key::EntryKey;
use crate::offset::TimeOffset;
use crate::policy::never::NeverExpire;
use crate::policy::window::TimeWindow;
use crate::policy::ExpiryPolicy;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The persistable state of one of the built-in expiry policies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicySnapshot {
  NeverExpire,
  TimeWindow {
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
    offset: Option<TimeOffset>,
  },
}

impl PolicySnapshot {
  /// Rebuilds the policy, reading time from `clock`.
  pub fn restore_with_clock(self, clock: Arc<dyn Clock>) -> Box<dyn ExpiryPolicy> {
    match self {
      PolicySnapshot::NeverExpire => Box::new(NeverExpire),
      PolicySnapshot::TimeWindow {
        created_at,
        expires_at,
        offset,
      } => Box::new(TimeWindow::from_parts(created_at, expires_at, offset, clock)),
    }
  }

  /// Rebuilds the policy on the system clock.
  pub fn restore(self) -> Box<dyn ExpiryPolicy> {
    self.restore_with_clock(Arc::new(SystemClock))
  }
}

/// A serializable, point-in-time snapshot of a [`CacheEntry`].
///
/// Created with [`CacheEntry::to_snapshot`] and turned back into an entry
/// with [`CacheEntry::from_snapshot`]. Suppliers are code, not data, so they
/// are never captured; a restored entry holds the value that was current
/// when the snapshot was taken and accepts direct writes.
///
/// It implements `Serialize` and `Deserialize` (if `K` and `V` do), so any
/// `serde`-compatible format works.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntrySnapshot<K, V> {
  pub key: K,
  pub value: Option<V>,
  pub policy: PolicySnapshot,
}

impl<K, V> CacheEntry<K, V>
where
  K: EntryKey + Clone,
  V: Clone + 'static,
{
  /// Captures the entry's key, stored value and policy state.
  ///
  /// The stored value is taken as-is; no refresh happens. Fails with
  /// [`EntryError::UnsupportedPolicy`] if the policy cannot be snapshotted.
  pub fn to_snapshot(&self) -> Result<EntrySnapshot<K, V>, EntryError> {
    let policy = self.policy().snapshot().ok_or(EntryError::UnsupportedPolicy)?;
    Ok(EntrySnapshot {
      key: self.key().clone(),
      value: self.peek().map(|value| V::clone(value)),
      policy,
    })
  }
}

impl<K, V> CacheEntry<K, V>
where
  K: EntryKey,
  V: 'static,
{
  /// Rebuilds a value-owned entry from a snapshot, on the system clock.
  pub fn from_snapshot(snapshot: EntrySnapshot<K, V>) -> Result<Self, EntryError> {
    Self::from_snapshot_with_clock(snapshot, Arc::new(SystemClock))
  }

  /// Rebuilds a value-owned entry from a snapshot, reading time from `clock`.
  pub fn from_snapshot_with_clock(
    snapshot: EntrySnapshot<K, V>,
    clock: Arc<dyn Clock>,
  ) -> Result<Self, EntryError> {
    let policy = snapshot.policy.restore_with_clock(clock);
    Self::from_parts(snapshot.key, snapshot.value.map(Arc::new), policy)
  }
}
