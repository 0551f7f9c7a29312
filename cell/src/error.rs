use thiserror::Error;

/// Errors returned by [`CacheEntry`](crate::CacheEntry) operations and by
/// the configuration types that feed it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
  /// An argument was rejected at construction time, e.g. a blank key.
  #[error("invalid argument: {0}")]
  InvalidArgument(&'static str),
  /// The operation is not allowed in the entry's current state, e.g. a
  /// direct write to an entry whose value is owned by a supplier.
  #[error("illegal state: {0}")]
  IllegalState(&'static str),
  /// A textual time offset could not be parsed.
  #[error("invalid time offset: {0}")]
  InvalidOffset(String),
  /// The entry's policy cannot be represented in a snapshot.
  #[error("expiry policy does not support snapshots")]
  UnsupportedPolicy,
}
