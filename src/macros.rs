#![allow(unused_macros)]

/// Helper macro for reading locked items
///
/// Evaluates to a `Result` so a poisoned lock surfaces as [`crate::Error::LockError`].
///
/// ```rust, ignore
///  let data = read_lock!(self.snapshot)?;
///  println!("{:?}", data.as_ref());
/// ```
macro_rules! read_lock {
    ($rwlock:expr) => {
        $rwlock.read().map_err(|_| crate::Error::LockError)
    };
}

/// Helper macro for writing to locked items
///
/// ```rust, ignore
///  let mut data = write_lock!(self.snapshot)?;
///  *data = Some(table);
/// ```
macro_rules! write_lock {
    ($rwlock:expr) => {
        $rwlock.write().map_err(|_| crate::Error::LockError)
    };
}
