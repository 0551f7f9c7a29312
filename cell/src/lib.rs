//! A single-entry, lazily-refreshing cache cell.
//!
//! A [`CacheEntry`] binds a key to a value and guards it with an
//! [`ExpiryPolicy`]. Expiry is checked lazily, on read. When the policy says
//! the value is stale and a [`ValueSupplier`] is bound, the entry pulls a
//! fresh value and restarts the policy before handing it back.
//!
//! # Features
//! - **Pluggable Expiry**: [`NeverExpire`] (the default), [`TimeWindow`]
//!   (second/minute/hour/day/week offsets), or your own policy.
//! - **Refresh-on-Read**: Supplier-owned entries refresh themselves when read
//!   after expiry, and reject direct writes.
//! - **Deterministic Time**: Policies read time through a [`Clock`], so tests
//!   can drive a [`ManualClock`] instead of sleeping.
//! - **Non-Clone Support**: Stores values in an `Arc<V>`, avoiding `V: Clone` bounds.
//! - **Persistence**: Optional `serde` feature for snapshotting an entry's
//!   key, value and policy state.
//!
//! There is no multi-entry map, no capacity eviction and no background
//! expiry here; compose many entries behind your own map and locks if you
//! need a full cache.

// Public modules that form the API
pub mod builder;
pub mod clock;
pub mod error;
pub mod key;
pub mod offset;
pub mod policy;
pub mod supplier;

// Internal, crate-only modules
mod entry;

#[cfg(feature = "serde")]
pub mod snapshot;

// Re-export the primary user-facing types for convenience
pub use builder::EntryBuilder;
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use error::EntryError;
pub use key::EntryKey;
pub use offset::{TimeOffset, TimeUnit};
pub use policy::never::NeverExpire;
pub use policy::window::TimeWindow;
pub use policy::ExpiryPolicy;
pub use supplier::ValueSupplier;

#[cfg(feature = "serde")]
pub use snapshot::{EntrySnapshot, PolicySnapshot};
