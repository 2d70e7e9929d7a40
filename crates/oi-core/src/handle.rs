//! `Handle<T>`: a shared, optionally-null reference to a value.
//!
//! Term structures and indexes are shared between many coupons; a handle
//! lets them all point at the same curve without owning it.  Handles work
//! with unsized targets so `Handle<dyn YieldTermStructure>` is the usual
//! form.

use crate::errors::{Error, Result};
use std::sync::Arc;

/// A shared, optionally-null, read-only reference to a value of type `T`.
pub struct Handle<T: ?Sized> {
    inner: Option<Arc<T>>,
}

impl<T> Handle<T> {
    /// Create a non-null handle wrapping `value`.
    pub fn new(value: T) -> Self {
        Self {
            inner: Some(Arc::new(value)),
        }
    }
}

impl<T: ?Sized> Handle<T> {
    /// Create a handle from an existing `Arc`.
    pub fn from_arc(arc: Arc<T>) -> Self {
        Self { inner: Some(arc) }
    }

    /// Create a null (empty) handle.
    pub fn null() -> Self {
        Self { inner: None }
    }

    /// Return `true` if the handle is null (contains no value).
    pub fn is_empty(&self) -> bool {
        self.inner.is_none()
    }

    /// Attempt to borrow the contained value.
    pub fn get(&self) -> Option<&T> {
        self.inner.as_deref()
    }

    /// Borrow the contained `Arc`, failing with a configuration error when
    /// the handle is null.  `what` names the missing object in the message.
    pub fn current_link(&self, what: &str) -> Result<&Arc<T>> {
        self.inner
            .as_ref()
            .ok_or_else(|| Error::Configuration(format!("empty handle: no {what} set")))
    }
}

impl<T: ?Sized> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: ?Sized> Default for Handle<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T: ?Sized> From<Arc<T>> for Handle<T> {
    fn from(arc: Arc<T>) -> Self {
        Self::from_arc(arc)
    }
}

impl<T: ?Sized + std::fmt::Debug> std::fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.inner {
            Some(v) => write!(f, "Handle({v:?})"),
            None => write!(f, "Handle(null)"),
        }
    }
}
