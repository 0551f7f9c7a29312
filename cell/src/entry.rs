use crate::builder::EntryBuilder;
use crate::error::EntryError;
use crate::key::EntryKey;
use crate::policy::never::NeverExpire;
use crate::policy::ExpiryPolicy;
use crate::supplier::ValueSupplier;

use core::fmt;
use std::sync::Arc;

/// A single key/value cell with lazy expiry and optional refresh-on-read.
///
/// An entry owns a key, the current value (held in an `Arc<V>`, so `V` does
/// not need to be `Clone`), an [`ExpiryPolicy`] and optionally a
/// [`ValueSupplier`].
///
/// Expiry is only ever checked when the entry is read. When
/// [`get`](CacheEntry::get) finds the value expired and a supplier is bound,
/// it pulls a fresh value and restarts the policy before returning. Because
/// of that, `get` takes `&mut self` and is not a pure accessor; use
/// [`peek`](CacheEntry::peek) to look at the stored value without refreshing.
///
/// An entry with a bound supplier is *supplier-owned*: its value can only be
/// changed by the supplier, and [`set_value`](CacheEntry::set_value) fails.
///
/// The entry does no locking of its own. Share it across threads behind a
/// lock of your choice.
///
/// ```
/// use fibre_cell::CacheEntry;
///
/// let mut entry = CacheEntry::new("k", 42).unwrap();
/// assert_eq!(entry.get().as_deref(), Some(&42));
///
/// entry.set_value(99).unwrap();
/// assert_eq!(entry.get().as_deref(), Some(&99));
/// ```
pub struct CacheEntry<K, V> {
  key: K,
  value: Option<Arc<V>>,
  policy: Box<dyn ExpiryPolicy>,
  supplier: Option<Box<dyn ValueSupplier<V>>>,
}

// --- Construction ---
impl<K, V> CacheEntry<K, V>
where
  K: EntryKey,
  V: 'static,
{
  /// Creates an entry holding `value` that never expires.
  ///
  /// Fails with [`EntryError::InvalidArgument`] if `key` is blank.
  pub fn new(key: K, value: V) -> Result<Self, EntryError> {
    Self::from_parts(key, Some(Arc::new(value)), Box::new(NeverExpire))
  }

  /// Creates an entry holding `value` guarded by `policy`.
  pub fn with_policy<P>(key: K, value: V, policy: P) -> Result<Self, EntryError>
  where
    P: ExpiryPolicy + 'static,
  {
    Self::from_parts(key, Some(Arc::new(value)), Box::new(policy))
  }

  /// Creates a supplier-owned entry that never expires.
  ///
  /// The supplier is invoked once, right away, to populate the value.
  pub fn with_supplier<S>(key: K, supplier: S) -> Result<Self, EntryError>
  where
    S: ValueSupplier<V> + 'static,
  {
    Self::with_policy_and_supplier(key, NeverExpire, supplier)
  }

  /// Creates a supplier-owned entry guarded by `policy`.
  ///
  /// The supplier is invoked once, right away, to populate the value. The
  /// policy is taken as given and not restarted.
  pub fn with_policy_and_supplier<P, S>(key: K, policy: P, supplier: S) -> Result<Self, EntryError>
  where
    P: ExpiryPolicy + 'static,
    S: ValueSupplier<V> + 'static,
  {
    let mut entry = Self::from_parts(key, None, Box::new(policy))?;
    entry.bind_supplier(Box::new(supplier));
    Ok(entry)
  }

  /// Starts an [`EntryBuilder`] for `key`.
  pub fn builder(key: K) -> EntryBuilder<K, V> {
    EntryBuilder::new(key)
  }

  pub(crate) fn from_parts(
    key: K,
    value: Option<Arc<V>>,
    policy: Box<dyn ExpiryPolicy>,
  ) -> Result<Self, EntryError> {
    if key.is_blank() {
      return Err(EntryError::InvalidArgument("entry key must not be blank"));
    }
    Ok(Self {
      key,
      value,
      policy,
      supplier: None,
    })
  }
}

// --- Reads, writes and rebinding ---
impl<K, V: 'static> CacheEntry<K, V> {
  /// Reads the value, refreshing it first if it has expired.
  ///
  /// - Not expired: returns the stored value, no side effects.
  /// - Expired with a supplier: calls the supplier, stores its output,
  ///   restarts the policy and returns the new value.
  /// - Expired without a supplier: returns `None` and changes nothing.
  pub fn get(&mut self) -> Option<Arc<V>> {
    if !self.policy.is_expired() {
      return self.value.clone();
    }

    match self.supplier.as_mut() {
      Some(supplier) => {
        let value = Arc::new(supplier.supply());
        self.value = Some(value.clone());
        self.policy.restart();
        tracing::debug!("expired entry refreshed from supplier");
        Some(value)
      }
      None => {
        tracing::trace!("entry expired with no supplier bound");
        None
      }
    }
  }

  /// The stored value, ignoring expiry. Never calls the supplier.
  pub fn peek(&self) -> Option<&Arc<V>> {
    self.value.as_ref()
  }

  /// Overwrites the value, whatever the expiry state.
  ///
  /// Fails with [`EntryError::IllegalState`] if a supplier is bound.
  pub fn set_value(&mut self, value: V) -> Result<(), EntryError> {
    if self.supplier.is_some() {
      return Err(EntryError::IllegalState(
        "entry value is owned by its supplier",
      ));
    }
    self.value = Some(Arc::new(value));
    Ok(())
  }

  /// Binds a new supplier and immediately replaces the value with its output.
  ///
  /// The policy is left alone: an expired entry stays expired until the next
  /// [`get`](CacheEntry::get) refreshes it.
  pub fn set_supplier<S>(&mut self, supplier: S)
  where
    S: ValueSupplier<V> + 'static,
  {
    self.bind_supplier(Box::new(supplier));
  }

  /// Unbinds the supplier, keeping the current value. The entry accepts
  /// direct writes again and expired reads yield `None`.
  pub fn clear_supplier(&mut self) {
    if self.supplier.take().is_some() {
      tracing::debug!("supplier unbound from entry");
    }
  }

  pub fn has_supplier(&self) -> bool {
    self.supplier.is_some()
  }

  /// Pulls a fresh value from the supplier and restarts the policy,
  /// regardless of expiry.
  ///
  /// Fails with [`EntryError::IllegalState`] if no supplier is bound.
  pub fn refresh(&mut self) -> Result<Arc<V>, EntryError> {
    let supplier = self
      .supplier
      .as_mut()
      .ok_or(EntryError::IllegalState("entry has no supplier to refresh from"))?;
    let value = Arc::new(supplier.supply());
    self.value = Some(value.clone());
    self.policy.restart();
    tracing::debug!("entry refreshed on demand");
    Ok(value)
  }

  pub(crate) fn bind_supplier(&mut self, mut supplier: Box<dyn ValueSupplier<V>>) {
    self.value = Some(Arc::new(supplier.supply()));
    self.supplier = Some(supplier);
    tracing::debug!("supplier bound to entry, value pulled");
  }
}

// --- Plain accessors ---
impl<K, V> CacheEntry<K, V> {
  /// Whether the policy currently considers the value stale. Never refreshes.
  pub fn is_expired(&self) -> bool {
    self.policy.is_expired()
  }

  pub fn policy(&self) -> &dyn ExpiryPolicy {
    &*self.policy
  }

  pub fn policy_mut(&mut self) -> &mut dyn ExpiryPolicy {
    &mut *self.policy
  }

  /// Replaces the policy. Neither the old nor the new policy is restarted.
  pub fn set_policy<P>(&mut self, policy: P)
  where
    P: ExpiryPolicy + 'static,
  {
    self.policy = Box::new(policy);
  }

  pub fn key(&self) -> &K {
    &self.key
  }

  /// Replaces the key. Unlike the constructors, this does not check for a
  /// blank key.
  pub fn set_key(&mut self, key: K) {
    self.key = key;
  }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for CacheEntry<K, V> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CacheEntry")
      .field("key", &self.key)
      .field("value", &self.value)
      .field("is_expired", &self.policy.is_expired())
      .field("has_supplier", &self.supplier.is_some())
      .finish()
  }
}
