use crate::policy::ExpiryPolicy;
#[cfg(feature = "serde")]
use crate::snapshot::PolicySnapshot;

/// The default policy: values never go stale and `restart` does nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NeverExpire;

impl ExpiryPolicy for NeverExpire {
  #[inline]
  fn is_expired(&self) -> bool {
    false
  }

  #[inline]
  fn restart(&mut self) {}

  #[cfg(feature = "serde")]
  fn snapshot(&self) -> Option<PolicySnapshot> {
    Some(PolicySnapshot::NeverExpire)
  }
}
