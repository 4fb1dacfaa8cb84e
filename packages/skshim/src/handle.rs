//! Owned wrappers for native values that are not reference counted.
//!
//! Some native types (backend textures, image infos) are plain values with
//! a native destructor and, often, a validity flag set by the native
//! constructor. [`Handle`] owns such a value and runs its destructor exactly
//! once.

use std::fmt;
use std::mem::ManuallyDrop;

/// Native values that must be destructed through the native library.
///
/// # Safety
///
/// `drop_in_place` must release every native resource the value owns and
/// must tolerate being called on a value reported invalid by
/// [`NativeValidity`].
pub unsafe trait NativeDrop {
    fn drop_in_place(&mut self);
}

/// Native values whose constructor can report failure in-band.
pub trait NativeValidity {
    fn is_valid(&self) -> bool;
}

/// Owns a native value.
pub struct Handle<N: NativeDrop> {
    native: N,
}

impl<N: NativeDrop> Handle<N> {
    pub fn from_native(native: N) -> Self {
        Self { native }
    }

    #[inline]
    pub fn native(&self) -> &N {
        &self.native
    }

    #[inline]
    pub fn native_mut(&mut self) -> &mut N {
        &mut self.native
    }

    /// Gives up ownership without running the native destructor.
    pub fn into_native(self) -> N {
        let this = ManuallyDrop::new(self);
        // SAFETY: `this` is never dropped, so `native` is moved out exactly
        // once.
        unsafe { std::ptr::read(&this.native) }
    }
}

impl<N: NativeDrop + NativeValidity> Handle<N> {
    /// Wraps `native` if the native constructor succeeded. An invalid value
    /// is destructed right away and `None` returned.
    ///
    /// The native destructor runs on invalid values too, where forgetting
    /// the raw struct would skip it, so [`NativeDrop::drop_in_place`] must
    /// accept a value the constructor rejected.
    pub fn try_from_native(native: N) -> Option<Self> {
        let handle = Self::from_native(native);
        if handle.native.is_valid() {
            Some(handle)
        } else {
            None
        }
    }
}

impl<N: NativeDrop> Drop for Handle<N> {
    fn drop(&mut self) {
        self.native.drop_in_place();
    }
}

impl<N: NativeDrop + fmt::Debug> fmt::Debug for Handle<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handle").field(&self.native).finish()
    }
}
