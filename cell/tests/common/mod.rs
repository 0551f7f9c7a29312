use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

use fibre_cell::ValueSupplier;

/// A supplier yielding 1, 2, 3, ... and a shared count of how often it ran.
pub fn counting_supplier() -> (impl ValueSupplier<usize> + 'static, Arc<AtomicUsize>) {
  let calls = Arc::new(AtomicUsize::new(0));
  let supplier = {
    let calls = calls.clone();
    move || calls.fetch_add(1, Ordering::SeqCst) + 1
  };
  (supplier, calls)
}

pub fn calls(counter: &AtomicUsize) -> usize {
  counter.load(Ordering::SeqCst)
}
