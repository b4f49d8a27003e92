//! Explicit release of persistence resources.
//!
//! Logic objects and repositories hold a persistence context for one unit of
//! work. [`Scoped`] ties that release to a lexical scope so every exit path,
//! early returns and `?` included, gives the context back.

use std::ops::Deref;

/// Releases resources held for one unit of work.
pub trait Dispose {
    /// Release held resources. Calling it again is a no-op.
    fn dispose(&self);
}

impl<T: Dispose + ?Sized> Dispose for Box<T> {
    fn dispose(&self) {
        (**self).dispose();
    }
}

impl<T: Dispose + ?Sized> Dispose for std::sync::Arc<T> {
    fn dispose(&self) {
        (**self).dispose();
    }
}

/// Guard disposing the wrapped value when dropped.
///
/// # Examples
/// ```
/// use std::cell::Cell;
/// use homeworks::domain::{Dispose, Scoped};
///
/// struct Handle<'a>(&'a Cell<u32>);
/// impl Dispose for Handle<'_> {
///     fn dispose(&self) { self.0.set(self.0.get() + 1); }
/// }
///
/// let released = Cell::new(0);
/// {
///     let _handle = Scoped::new(Handle(&released));
/// }
/// assert_eq!(released.get(), 1);
/// ```
pub struct Scoped<T: Dispose>(T);

impl<T: Dispose> Scoped<T> {
    /// Take ownership of `value` until the guard is dropped.
    pub fn new(value: T) -> Self {
        Self(value)
    }
}

impl<T: Dispose> Deref for Scoped<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: Dispose> Drop for Scoped<T> {
    fn drop(&mut self) {
        self.0.dispose();
    }
}
