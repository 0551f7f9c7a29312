/// Produces a fresh value for a [`CacheEntry`](crate::CacheEntry).
///
/// The entry calls [`supply`](ValueSupplier::supply) synchronously when a
/// supplier is bound and whenever its policy reports the value as expired on
/// read. Whatever the supplier costs, the caller of
/// [`get`](crate::CacheEntry::get) pays it; there is no timeout.
///
/// Any `FnMut() -> V + Send` closure is a supplier.
pub trait ValueSupplier<V>: Send {
  fn supply(&mut self) -> V;
}

impl<V, F> ValueSupplier<V> for F
where
  F: FnMut() -> V + Send,
{
  #[inline]
  fn supply(&mut self) -> V {
    self()
  }
}
