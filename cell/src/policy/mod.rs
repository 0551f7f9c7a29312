pub mod never;
pub mod window;

#[cfg(feature = "serde")]
use crate::snapshot::PolicySnapshot;

/// Decides whether a cached value is stale and how to re-arm after a refresh.
///
/// A [`CacheEntry`](crate::CacheEntry) consults its policy on every
/// [`get`](crate::CacheEntry::get). When the policy reports the value as
/// expired and a supplier is bound, the entry pulls a fresh value and then
/// calls [`restart`](ExpiryPolicy::restart).
///
/// Two policies ship with the crate: [`never::NeverExpire`] (the default) and
/// [`window::TimeWindow`]. Implement this trait to plug in your own.
pub trait ExpiryPolicy: Send {
  /// Returns `true` if the value guarded by this policy is stale.
  /// Must not mutate any observable state.
  fn is_expired(&self) -> bool;

  /// Resets the policy to a freshly non-expired state. Unconditional.
  fn restart(&mut self);

  /// Captures the policy's state for persistence.
  ///
  /// Returns `None` if the policy has no snapshot representation, which is
  /// the default for user-defined policies.
  #[cfg(feature = "serde")]
  fn snapshot(&self) -> Option<PolicySnapshot> {
    None
  }
}

impl<P: ExpiryPolicy + ?Sized> ExpiryPolicy for Box<P> {
  #[inline]
  fn is_expired(&self) -> bool {
    (**self).is_expired()
  }

  #[inline]
  fn restart(&mut self) {
    (**self).restart()
  }

  #[cfg(feature = "serde")]
  fn snapshot(&self) -> Option<PolicySnapshot> {
    (**self).snapshot()
  }
}
