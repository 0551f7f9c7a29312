mod common;

use common::{calls, counting_supplier};
use fibre_cell::{CacheEntry, EntryError, ManualClock, TimeOffset, TimeWindow};

use chrono::TimeDelta;

#[test]
fn test_sync_supplier_populates_on_construction() {
  let (supplier, counter) = counting_supplier();
  let mut entry = CacheEntry::with_supplier("k", supplier).unwrap();
  assert_eq!(calls(&counter), 1, "supplier should run once at construction");

  // Never-expiring entries do not refresh on read.
  for _ in 0..10 {
    assert_eq!(entry.get().as_deref(), Some(&1));
  }
  assert_eq!(calls(&counter), 1);
}

#[test]
fn test_sync_refresh_once_per_window() {
  let clock = ManualClock::starting_now();
  let (supplier, counter) = counting_supplier();
  let window = TimeWindow::new_with_clock(TimeOffset::seconds(1), clock.clone());
  let mut entry = CacheEntry::with_policy_and_supplier("k", window, supplier).unwrap();

  assert_eq!(entry.get().as_deref(), Some(&1));

  clock.advance(TimeDelta::milliseconds(1100));
  assert!(entry.is_expired());
  assert_eq!(entry.get().as_deref(), Some(&2));
  assert!(!entry.is_expired(), "policy should restart after a refresh");

  // No time passes: no second refresh.
  assert_eq!(entry.get().as_deref(), Some(&2));
  assert_eq!(calls(&counter), 2);
}

#[test]
fn test_sync_is_expired_does_not_refresh() {
  let clock = ManualClock::starting_now();
  let (supplier, counter) = counting_supplier();
  let window = TimeWindow::new_with_clock(TimeOffset::minutes(5), clock.clone());
  let entry = CacheEntry::with_policy_and_supplier("k", window, supplier).unwrap();

  clock.advance(TimeDelta::minutes(10));
  assert!(entry.is_expired());
  assert!(entry.is_expired());
  assert_eq!(entry.peek().map(|v| **v), Some(1));
  assert_eq!(calls(&counter), 1);
}

#[test]
fn test_sync_set_value_on_supplier_entry_is_illegal_state() {
  let (supplier, _) = counting_supplier();
  let mut entry = CacheEntry::with_supplier("k", supplier).unwrap();

  let err = entry.set_value(100).unwrap_err();
  assert!(matches!(err, EntryError::IllegalState(_)));
  assert_eq!(entry.get().as_deref(), Some(&1), "failed write must not change the value");
}

#[test]
fn test_sync_set_supplier_pulls_immediately() {
  let (supplier, _) = counting_supplier();
  let mut entry = CacheEntry::with_supplier("k", supplier).unwrap();
  assert_eq!(entry.get().as_deref(), Some(&1));

  entry.set_supplier(|| 500);
  assert_eq!(entry.get().as_deref(), Some(&500));
}

#[test]
fn test_sync_set_supplier_does_not_restart_policy() {
  let clock = ManualClock::starting_now();
  let window = TimeWindow::new_with_clock(TimeOffset::seconds(10), clock.clone());
  let mut entry = CacheEntry::with_policy("k", 0usize, window).unwrap();

  clock.advance(TimeDelta::seconds(11));
  assert!(entry.is_expired());

  let (supplier, counter) = counting_supplier();
  entry.set_supplier(supplier);
  assert_eq!(calls(&counter), 1);
  assert!(entry.is_expired(), "rebinding must leave the policy untouched");

  // The next read still sees an expired policy and refreshes.
  assert_eq!(entry.get().as_deref(), Some(&2));
  assert!(!entry.is_expired());
}

#[test]
fn test_sync_set_supplier_on_value_entry_makes_it_supplier_owned() {
  let mut entry = CacheEntry::new("k", 1).unwrap();
  entry.set_value(2).unwrap();

  entry.set_supplier(|| 3);
  assert_eq!(entry.get().as_deref(), Some(&3));
  assert!(matches!(entry.set_value(4), Err(EntryError::IllegalState(_))));
}

#[test]
fn test_sync_refresh_forces_pull_and_restart() {
  let clock = ManualClock::starting_now();
  let (supplier, counter) = counting_supplier();
  let window = TimeWindow::new_with_clock(TimeOffset::hours(1), clock.clone());
  let mut entry = CacheEntry::with_policy_and_supplier("k", window, supplier).unwrap();

  clock.advance(TimeDelta::minutes(59));
  assert_eq!(*entry.refresh().unwrap(), 2);

  // The window restarted at refresh time, so it is still live an hour
  // after construction.
  clock.advance(TimeDelta::minutes(2));
  assert!(!entry.is_expired());
  assert_eq!(entry.get().as_deref(), Some(&2));
  assert_eq!(calls(&counter), 2);
}

#[test]
fn test_sync_entry_shared_behind_lock() {
  use parking_lot::Mutex;
  use std::sync::Arc;
  use std::thread;

  let (supplier, counter) = counting_supplier();
  let entry = Arc::new(Mutex::new(
    CacheEntry::with_supplier("shared", supplier).unwrap(),
  ));

  let handles: Vec<_> = (0..8)
    .map(|_| {
      let entry = entry.clone();
      thread::spawn(move || {
        for _ in 0..100 {
          assert_eq!(entry.lock().get().as_deref(), Some(&1));
        }
      })
    })
    .collect();

  for handle in handles {
    handle.join().unwrap();
  }
  assert_eq!(calls(&counter), 1);
}
