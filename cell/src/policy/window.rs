use crate::clock::{Clock, SystemClock};
use crate::offset::{TimeOffset, TimeUnit};
use crate::policy::ExpiryPolicy;
#[cfg(feature = "serde")]
use crate::snapshot::PolicySnapshot;

use core::fmt;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};

/// Expires a value once a fixed offset has elapsed since it was created.
///
/// A window starts out *unconfigured* and reports itself as expired until an
/// offset is set with [`configure`](TimeWindow::configure). Once armed, it is
/// expired as soon as the clock reaches `created_at + offset`. Every
/// [`restart`](ExpiryPolicy::restart) re-arms it from the current time using
/// the last configured offset.
///
/// ```
/// use fibre_cell::policy::{window::TimeWindow, ExpiryPolicy};
/// use fibre_cell::{ManualClock, TimeOffset};
/// use chrono::TimeDelta;
///
/// let clock = ManualClock::starting_now();
/// let mut window = TimeWindow::new_with_clock(TimeOffset::seconds(1), clock.clone());
/// assert!(!window.is_expired());
///
/// clock.advance(TimeDelta::milliseconds(1100));
/// assert!(window.is_expired());
///
/// window.restart();
/// assert!(!window.is_expired());
/// ```
#[derive(Clone)]
pub struct TimeWindow {
  created_at: DateTime<Utc>,
  expires_at: Option<DateTime<Utc>>,
  offset: Option<TimeOffset>,
  clock: Arc<dyn Clock>,
}

impl TimeWindow {
  /// An unconfigured window on the system clock. Always expired until
  /// [`configure`](TimeWindow::configure) is called.
  pub fn unconfigured() -> Self {
    Self::with_clock(SystemClock)
  }

  /// An unconfigured window reading time from `clock`.
  pub fn with_clock<C: Clock + 'static>(clock: C) -> Self {
    Self::with_shared_clock(Arc::new(clock))
  }

  pub(crate) fn with_shared_clock(clock: Arc<dyn Clock>) -> Self {
    Self {
      created_at: clock.now(),
      expires_at: None,
      offset: None,
      clock,
    }
  }

  /// A window on the system clock, armed with `offset` from now.
  pub fn new(offset: TimeOffset) -> Self {
    Self::new_with_clock(offset, SystemClock)
  }

  /// A window reading time from `clock`, armed with `offset` from now.
  pub fn new_with_clock<C: Clock + 'static>(offset: TimeOffset, clock: C) -> Self {
    let mut window = Self::with_clock(clock);
    window.configure_offset(offset);
    window
  }

  /// Stores `amount` of `unit` as the offset and arms the window from now.
  ///
  /// Zero or negative amounts are accepted and leave the window expired.
  pub fn configure(&mut self, amount: i64, unit: TimeUnit) {
    self.configure_offset(TimeOffset::new(amount, unit));
  }

  /// Same as [`configure`](TimeWindow::configure), taking a [`TimeOffset`].
  pub fn configure_offset(&mut self, offset: TimeOffset) {
    self.offset = Some(offset);
    self.arm();
  }

  /// When the current window started.
  pub fn created_at(&self) -> DateTime<Utc> {
    self.created_at
  }

  /// When the current window ends, or `None` if never configured.
  pub fn expires_at(&self) -> Option<DateTime<Utc>> {
    self.expires_at
  }

  /// The last configured offset.
  pub fn offset(&self) -> Option<TimeOffset> {
    self.offset
  }

  /// Time left before the window expires. Zero once expired, `None` if the
  /// window was never configured.
  pub fn remaining(&self) -> Option<TimeDelta> {
    let now = self.clock.now();
    self
      .expires_at
      .map(|expires_at| (expires_at - now).max(TimeDelta::zero()))
  }

  fn arm(&mut self) {
    self.created_at = self.clock.now();
    self.expires_at = self
      .offset
      .map(|offset| expiry_from(self.created_at, offset));
  }

  #[cfg(feature = "serde")]
  pub(crate) fn from_parts(
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
    offset: Option<TimeOffset>,
    clock: Arc<dyn Clock>,
  ) -> Self {
    Self {
      created_at,
      expires_at,
      offset,
      clock,
    }
  }
}

/// `created_at + offset`, saturating at the representable range.
fn expiry_from(created_at: DateTime<Utc>, offset: TimeOffset) -> DateTime<Utc> {
  offset
    .as_delta()
    .and_then(|delta| created_at.checked_add_signed(delta))
    .unwrap_or(if offset.amount < 0 {
      DateTime::<Utc>::MIN_UTC
    } else {
      DateTime::<Utc>::MAX_UTC
    })
}

impl Default for TimeWindow {
  fn default() -> Self {
    Self::unconfigured()
  }
}

impl ExpiryPolicy for TimeWindow {
  fn is_expired(&self) -> bool {
    match self.expires_at {
      Some(expires_at) => self.clock.now() >= expires_at,
      None => true,
    }
  }

  fn restart(&mut self) {
    self.arm();
    tracing::trace!(
      created_at = %self.created_at,
      expires_at = ?self.expires_at,
      "time window restarted"
    );
  }

  #[cfg(feature = "serde")]
  fn snapshot(&self) -> Option<PolicySnapshot> {
    Some(PolicySnapshot::TimeWindow {
      created_at: self.created_at,
      expires_at: self.expires_at,
      offset: self.offset,
    })
  }
}

// Manual Debug implementation, the clock is not interesting here.
impl fmt::Debug for TimeWindow {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("TimeWindow")
      .field("created_at", &self.created_at)
      .field("expires_at", &self.expires_at)
      .field("offset", &self.offset)
      .finish_non_exhaustive()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::clock::ManualClock;

  const UNITS: [TimeUnit; 5] = [
    TimeUnit::Second,
    TimeUnit::Minute,
    TimeUnit::Hour,
    TimeUnit::Day,
    TimeUnit::Week,
  ];

  #[test]
  fn unconfigured_is_expired() {
    let clock = ManualClock::starting_now();
    let mut window = TimeWindow::with_clock(clock.clone());
    assert!(window.is_expired());
    assert_eq!(window.expires_at(), None);
    assert_eq!(window.remaining(), None);

    // Restarting without an offset keeps it expired.
    clock.advance(TimeDelta::seconds(5));
    window.restart();
    assert!(window.is_expired());
    assert_eq!(window.created_at(), clock.now());
  }

  #[test]
  fn expires_once_offset_elapses_for_every_unit() {
    for unit in UNITS {
      let clock = ManualClock::starting_now();
      let mut window = TimeWindow::with_clock(clock.clone());
      window.configure(2, unit);
      assert!(!window.is_expired(), "{unit:?} window expired too early");

      clock.advance(TimeDelta::seconds(2 * unit.seconds() - 1));
      assert!(!window.is_expired(), "{unit:?} window expired one second early");

      clock.advance(TimeDelta::seconds(1));
      assert!(window.is_expired(), "{unit:?} window did not expire on time");
    }
  }

  #[test]
  fn week_is_seven_days() {
    let clock = ManualClock::starting_now();
    let window = TimeWindow::new_with_clock(TimeOffset::weeks(1), clock.clone());
    assert_eq!(
      window.expires_at(),
      Some(window.created_at() + TimeDelta::days(7))
    );
  }

  #[test]
  fn restart_rearms_with_last_offset() {
    let clock = ManualClock::starting_now();
    let mut window = TimeWindow::new_with_clock(TimeOffset::minutes(1), clock.clone());

    for _ in 0..5 {
      clock.advance(TimeDelta::minutes(2));
      assert!(window.is_expired());
      window.restart();
      assert!(!window.is_expired());
      assert_eq!(window.created_at(), clock.now());
      assert_eq!(window.expires_at(), Some(clock.now() + TimeDelta::minutes(1)));
    }
  }

  #[test]
  fn reconfigure_replaces_offset() {
    let clock = ManualClock::starting_now();
    let mut window = TimeWindow::new_with_clock(TimeOffset::hours(1), clock.clone());
    window.configure(10, TimeUnit::Second);
    assert_eq!(window.offset(), Some(TimeOffset::seconds(10)));

    clock.advance(TimeDelta::seconds(10));
    assert!(window.is_expired());
  }

  #[test]
  fn zero_and_negative_offsets_are_already_expired() {
    let clock = ManualClock::starting_now();
    let zero = TimeWindow::new_with_clock(TimeOffset::seconds(0), clock.clone());
    let negative = TimeWindow::new_with_clock(TimeOffset::days(-1), clock.clone());
    assert!(zero.is_expired());
    assert!(negative.is_expired());
    assert_eq!(negative.remaining(), Some(TimeDelta::zero()));
  }

  #[test]
  fn huge_offsets_saturate() {
    let clock = ManualClock::starting_now();
    let far = TimeWindow::new_with_clock(TimeOffset::weeks(i64::MAX), clock.clone());
    assert_eq!(far.expires_at(), Some(DateTime::<Utc>::MAX_UTC));
    assert!(!far.is_expired());

    let past = TimeWindow::new_with_clock(TimeOffset::weeks(i64::MIN), clock);
    assert_eq!(past.expires_at(), Some(DateTime::<Utc>::MIN_UTC));
    assert!(past.is_expired());
  }

  #[test]
  fn remaining_counts_down() {
    let clock = ManualClock::starting_now();
    let window = TimeWindow::new_with_clock(TimeOffset::seconds(30), clock.clone());
    assert_eq!(window.remaining(), Some(TimeDelta::seconds(30)));
    clock.advance(TimeDelta::seconds(20));
    assert_eq!(window.remaining(), Some(TimeDelta::seconds(10)));
    clock.advance(TimeDelta::seconds(20));
    assert_eq!(window.remaining(), Some(TimeDelta::zero()));
  }
}
