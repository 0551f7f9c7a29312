use crate::clock::{Clock, SystemClock};
use crate::entry::CacheEntry;
use crate::error::EntryError;
use crate::key::EntryKey;
use crate::offset::{TimeOffset, TimeUnit};
use crate::policy::never::NeverExpire;
use crate::policy::window::TimeWindow;
use crate::policy::ExpiryPolicy;
use crate::supplier::ValueSupplier;

use core::fmt;
use std::sync::Arc;

/// How the built entry decides expiry.
enum PolicyChoice {
  Never,
  Window(TimeOffset),
  Custom(Box<dyn ExpiryPolicy>),
}

/// A builder for [`CacheEntry`] instances.
///
/// ```
/// use fibre_cell::{CacheEntry, TimeUnit};
///
/// let mut calls = 0;
/// let mut entry = CacheEntry::builder("greeting")
///   .expire_after(10, TimeUnit::Minute)
///   .supplier(move || {
///     calls += 1;
///     format!("hello #{calls}")
///   })
///   .build()
///   .unwrap();
///
/// assert_eq!(entry.get().as_deref().map(String::as_str), Some("hello #1"));
/// ```
pub struct EntryBuilder<K, V> {
  key: K,
  value: Option<V>,
  policy: PolicyChoice,
  clock: Option<Arc<dyn Clock>>,
  supplier: Option<Box<dyn ValueSupplier<V>>>,
}

// Manual Debug implementation for EntryBuilder.
impl<K: fmt::Debug, V> fmt::Debug for EntryBuilder<K, V> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let policy = match &self.policy {
      PolicyChoice::Never => "never",
      PolicyChoice::Window(_) => "time_window",
      PolicyChoice::Custom(_) => "custom",
    };
    f.debug_struct("EntryBuilder")
      .field("key", &self.key)
      .field("has_value", &self.value.is_some())
      .field("policy", &policy)
      .field("has_supplier", &self.supplier.is_some())
      .finish_non_exhaustive()
  }
}

impl<K, V> EntryBuilder<K, V>
where
  K: EntryKey,
  V: 'static,
{
  pub fn new(key: K) -> Self {
    Self {
      key,
      value: None,
      policy: PolicyChoice::Never,
      clock: None,
      supplier: None,
    }
  }

  /// Sets the initial value. Ignored if a supplier is also set, since the
  /// supplier's first output replaces it.
  pub fn value(mut self, value: V) -> Self {
    self.value = Some(value);
    self
  }

  /// Guards the entry with a custom policy, replacing any earlier choice.
  pub fn policy<P>(mut self, policy: P) -> Self
  where
    P: ExpiryPolicy + 'static,
  {
    self.policy = PolicyChoice::Custom(Box::new(policy));
    self
  }

  /// Guards the entry with a [`TimeWindow`] armed at build time.
  pub fn time_window(mut self, offset: TimeOffset) -> Self {
    self.policy = PolicyChoice::Window(offset);
    self
  }

  /// Shorthand for [`time_window`](EntryBuilder::time_window).
  pub fn expire_after(self, amount: i64, unit: TimeUnit) -> Self {
    self.time_window(TimeOffset::new(amount, unit))
  }

  /// Sets the clock used by a [`TimeWindow`] policy. Defaults to the system
  /// clock. Has no effect on custom policies.
  pub fn clock<C: Clock + 'static>(mut self, clock: C) -> Self {
    self.clock = Some(Arc::new(clock));
    self
  }

  /// Makes the entry supplier-owned.
  pub fn supplier<S>(mut self, supplier: S) -> Self
  where
    S: ValueSupplier<V> + 'static,
  {
    self.supplier = Some(Box::new(supplier));
    self
  }

  /// Builds the entry.
  ///
  /// The key is validated before the supplier, if any, is first invoked.
  pub fn build(self) -> Result<CacheEntry<K, V>, EntryError> {
    let policy: Box<dyn ExpiryPolicy> = match self.policy {
      PolicyChoice::Never => Box::new(NeverExpire),
      PolicyChoice::Custom(policy) => policy,
      PolicyChoice::Window(offset) => {
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let mut window = TimeWindow::with_shared_clock(clock);
        window.configure_offset(offset);
        Box::new(window)
      }
    };

    let value = match self.supplier {
      Some(_) => None,
      None => self.value.map(Arc::new),
    };
    let mut entry = CacheEntry::from_parts(self.key, value, policy)?;
    if let Some(supplier) = self.supplier {
      entry.bind_supplier(supplier);
    }
    Ok(entry)
  }
}
