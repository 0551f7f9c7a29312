use fibre_cell::{CacheEntry, TimeUnit};
use std::thread;
use std::time::{Duration, Instant};

fn main() {
  let started = Instant::now();
  let mut generation = 0u32;

  // The supplier stands in for a slow lookup, e.g. a remote config fetch.
  let mut entry = CacheEntry::builder("exchange_rate")
    .expire_after(1, TimeUnit::Second)
    .supplier(move || {
      generation += 1;
      thread::sleep(Duration::from_millis(50));
      format!("rate generation {} at {:?}", generation, started.elapsed())
    })
    .build()
    .expect("Failed to build entry");

  for _ in 0..5 {
    println!("{:?}", entry.get());
    thread::sleep(Duration::from_millis(400));
  }

  // Supplier-owned entries reject direct writes.
  if let Err(err) = entry.set_value(String::from("manual")) {
    println!("\nset_value refused: {}", err);
  }
}
