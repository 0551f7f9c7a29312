use std::borrow::Cow;
use std::rc::Rc;
use std::sync::Arc;

/// A type usable as a [`CacheEntry`](crate::CacheEntry) key.
///
/// Entry constructors reject keys whose identity is *blank*: empty strings,
/// empty collections and `None`. Numeric and other scalar keys are never
/// blank.
pub trait EntryKey {
  fn is_blank(&self) -> bool;
}

macro_rules! never_blank {
  ($($ty:ty),* $(,)?) => {
    $(
      impl EntryKey for $ty {
        #[inline]
        fn is_blank(&self) -> bool {
          false
        }
      }
    )*
  };
}

never_blank!(
  u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, char, bool,
);

macro_rules! blank_when_empty {
  ($($ty:ty),* $(,)?) => {
    $(
      impl EntryKey for $ty {
        #[inline]
        fn is_blank(&self) -> bool {
          self.is_empty()
        }
      }
    )*
  };
}

blank_when_empty!(str, String, Box<str>, Rc<str>, Arc<str>, Cow<'_, str>);

impl<T> EntryKey for [T] {
  #[inline]
  fn is_blank(&self) -> bool {
    self.is_empty()
  }
}

impl<T> EntryKey for Vec<T> {
  #[inline]
  fn is_blank(&self) -> bool {
    self.is_empty()
  }
}

impl<T: EntryKey> EntryKey for Option<T> {
  #[inline]
  fn is_blank(&self) -> bool {
    self.as_ref().map_or(true, EntryKey::is_blank)
  }
}

impl<T: EntryKey + ?Sized> EntryKey for &T {
  #[inline]
  fn is_blank(&self) -> bool {
    (**self).is_blank()
  }
}
