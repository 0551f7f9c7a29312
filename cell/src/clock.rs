use core::fmt;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;

/// A source of wall-clock time for expiry policies.
///
/// Policies never read the system clock directly, so tests and simulations
/// can swap in a [`ManualClock`] and move time forward without sleeping.
pub trait Clock: fmt::Debug + Send + Sync {
  fn now(&self) -> DateTime<Utc>;
}

/// Reads the real system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  #[inline]
  fn now(&self) -> DateTime<Utc> {
    Utc::now()
  }
}

/// A clock that only moves when told to.
///
/// Clones share the same instant: hand one clone to a policy and keep
/// another to drive it.
#[derive(Clone)]
pub struct ManualClock {
  now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
  /// Creates a clock frozen at `start`.
  pub fn new(start: DateTime<Utc>) -> Self {
    Self {
      now: Arc::new(Mutex::new(start)),
    }
  }

  /// Creates a clock frozen at the current system time.
  pub fn starting_now() -> Self {
    Self::new(Utc::now())
  }

  /// Moves the clock forward (or backward, for a negative delta).
  pub fn advance(&self, delta: TimeDelta) {
    let mut now = self.now.lock();
    *now = now.checked_add_signed(delta).unwrap_or(if delta < TimeDelta::zero() {
      DateTime::<Utc>::MIN_UTC
    } else {
      DateTime::<Utc>::MAX_UTC
    });
  }

  /// Jumps the clock to `instant`.
  pub fn set(&self, instant: DateTime<Utc>) {
    *self.now.lock() = instant;
  }
}

impl Clock for ManualClock {
  fn now(&self) -> DateTime<Utc> {
    *self.now.lock()
  }
}

impl fmt::Debug for ManualClock {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ManualClock").field("now", &self.now()).finish()
  }
}
