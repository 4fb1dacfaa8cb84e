//! Pluggable resolution of external resources by `(path, name)`.
//!
//! The animation and paragraph-layout subsystems resolve image and font
//! assets through a [`ResourceProvider`]. The contract is binary: a loaded
//! [`Data`] buffer owned by the caller, or `None` when the resource cannot
//! be found. Providers fold every other failure (I/O, permissions, decoding)
//! into `None` and log it.
//!
//! # Threading
//!
//! The engine may call a provider from whichever thread runs layout or
//! animation, so providers must be `Send + Sync`. A raw [`LoadDataFn`]
//! wrapped by [`FnResourceProvider`] inherits that requirement.

use std::ffi::{CString, c_char};
use std::fmt;
use std::sync::Arc;

use crate::data::Data;
use crate::error::{ResourceError, ResourceResult};
use crate::refcnt::{Sp, sp};

mod caching;
#[cfg(feature = "data-uri")]
mod data_uri;
mod file;
mod map;

pub use caching::CachingResourceProvider;
#[cfg(feature = "data-uri")]
pub use data_uri::DataUriResourceProvider;
pub use file::FileResourceProvider;
pub use map::MapResourceProvider;

/// Resolves a resource by logical path and name.
pub trait ResourceProvider: Send + Sync {
    /// Returns the resource's bytes, or `None` if it cannot be found.
    fn load(&self, path: &str, name: &str) -> Option<Sp<Data>>;
}

impl<P: ResourceProvider + ?Sized> ResourceProvider for Arc<P> {
    fn load(&self, path: &str, name: &str) -> Option<Sp<Data>> {
        (**self).load(path, name)
    }
}

impl<P: ResourceProvider + ?Sized> ResourceProvider for Box<P> {
    fn load(&self, path: &str, name: &str) -> Option<Sp<Data>> {
        (**self).load(path, name)
    }
}

/// A provider backed by a closure.
pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: Fn(&str, &str) -> Option<Sp<Data>> + Send + Sync,
{
    FromFn(f)
}

/// See [`from_fn`].
#[derive(Clone)]
pub struct FromFn<F>(F);

impl<F> ResourceProvider for FromFn<F>
where
    F: Fn(&str, &str) -> Option<Sp<Data>> + Send + Sync,
{
    fn load(&self, path: &str, name: &str) -> Option<Sp<Data>> {
        (self.0)(path, name).filter(|data| !data.is_null())
    }
}

impl<F> fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FromFn")
    }
}

/// Raw loader shape registered by host code.
///
/// Both arguments are null-terminated and valid only for the duration of the
/// call. The return value is null when the resource was not found, otherwise
/// it owns one reference to a [`Data`] buffer which passes to the caller.
pub type LoadDataFn =
    unsafe extern "C" fn(resource_path: *const c_char, resource_name: *const c_char) -> *mut Data;

/// Adapts a raw [`LoadDataFn`] to [`ResourceProvider`].
#[derive(Clone, Copy)]
pub struct FnResourceProvider {
    load_fn: LoadDataFn,
}

impl FnResourceProvider {
    /// # Safety
    ///
    /// `load_fn` must be callable from any thread, must not retain the
    /// argument pointers past the call, and must return either null or a
    /// pointer owning one reference to a live [`Data`] (for example one
    /// produced by [`Sp::into_raw`]).
    pub unsafe fn new(load_fn: LoadDataFn) -> Self {
        Self { load_fn }
    }

    pub fn try_load(&self, path: &str, name: &str) -> ResourceResult<Sp<Data>> {
        let c_path = CString::new(path)?;
        let c_name = CString::new(name)?;
        // SAFETY: guaranteed by the contract accepted in `new`; a non-null
        // result carries the reference we adopt here.
        let data = unsafe { sp((self.load_fn)(c_path.as_ptr(), c_name.as_ptr())) };
        if data.is_null() {
            Err(ResourceError::not_found(path, name))
        } else {
            Ok(data)
        }
    }
}

impl ResourceProvider for FnResourceProvider {
    fn load(&self, path: &str, name: &str) -> Option<Sp<Data>> {
        found_or_log(path, name, self.try_load(path, name))
    }
}

impl fmt::Debug for FnResourceProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnResourceProvider")
            .field("load_fn", &(self.load_fn as *const ()))
            .finish()
    }
}

/// Folds a detailed result into the found / not-found contract.
pub(crate) fn found_or_log(
    path: &str,
    name: &str,
    result: ResourceResult<Sp<Data>>,
) -> Option<Sp<Data>> {
    match result {
        Ok(data) => Some(data),
        Err(e) if e.is_not_found() => {
            log::debug!("Resource not found: {}/{}", path, name);
            None
        }
        Err(e) => {
            log::warn!("Failed to load resource {}/{}: {}", path, name, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;

    unsafe extern "C" fn load_logo(path: *const c_char, name: *const c_char) -> *mut Data {
        let path = unsafe { CStr::from_ptr(path) };
        let name = unsafe { CStr::from_ptr(name) };
        if path.to_bytes() == b"images" && name.to_bytes() == b"logo.png" {
            Data::new_copy(b"logo-bytes").into_raw()
        } else {
            std::ptr::null_mut()
        }
    }

    #[test]
    fn raw_loader_round_trips_known_resource() {
        let provider = unsafe { FnResourceProvider::new(load_logo) };

        let data = provider.load("images", "logo.png").unwrap();
        assert_eq!(data.get().unwrap().as_bytes(), b"logo-bytes");
        assert_eq!(data.ref_count(), 1);
    }

    #[test]
    fn raw_loader_null_is_not_found() {
        let provider = unsafe { FnResourceProvider::new(load_logo) };

        assert!(provider.load("images", "missing.png").is_none());
        assert!(provider.try_load("images", "missing.png").unwrap_err().is_not_found());
    }

    #[test]
    fn interior_nul_never_reaches_the_loader() {
        let provider = unsafe { FnResourceProvider::new(load_logo) };

        let err = provider.try_load("images", "logo\0.png").unwrap_err();
        assert_eq!(err.category(), "invalid_name");
        assert!(provider.load("images", "logo\0.png").is_none());
    }

    #[test]
    fn closures_are_providers() {
        let provider = from_fn(|path, name| {
            (path == "fonts" && name == "a.ttf").then(|| Data::new_copy(b"font"))
        });

        assert!(provider.load("fonts", "a.ttf").is_some());
        assert!(provider.load("fonts", "b.ttf").is_none());
    }

    #[test]
    fn closure_returning_null_handle_is_a_miss() {
        let provider = from_fn(|_, _| Some(Sp::null()));

        assert!(provider.load("fonts", "a.ttf").is_none());
    }

    #[test]
    fn shared_providers_forward() {
        let provider: Arc<dyn ResourceProvider> =
            Arc::new(from_fn(|_, name| (name == "x").then(Data::new_empty)));

        assert!(provider.load("", "x").is_some());
        assert!(provider.load("", "y").is_none());
    }
}
