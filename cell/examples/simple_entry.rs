use fibre_cell::{CacheEntry, TimeOffset, TimeWindow};
use std::thread;
use std::time::Duration;

fn main() {
  // An entry holding a plain value, guarded by a 2-second window.
  let mut entry = CacheEntry::with_policy(
    "config".to_string(),
    String::from("v1"),
    TimeWindow::new(TimeOffset::seconds(2)),
  )
  .expect("Failed to build entry");

  println!("Entry: {:?}", entry);
  println!("Read before expiry: {:?}", entry.get());

  entry.set_value(String::from("v2")).expect("Value-owned entries accept writes");
  println!("Read after set_value: {:?}", entry.get());

  println!("\nWaiting for 3 seconds for the value to expire...");
  thread::sleep(Duration::from_secs(3));

  // No supplier is bound, so an expired read yields nothing.
  match entry.get() {
    Some(value) => println!("Found value: {}", value),
    None => println!("Value not found (as expected after the window closed)."),
  }
}
