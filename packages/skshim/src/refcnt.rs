//! Intrusive reference counting and the owned handle built on it.
//!
//! Every shareable native object embeds a [`RefCnt`]. A freshly constructed
//! object holds exactly one reference, owned by whoever created it. [`Sp`]
//! is the owned handle over such an object: cloning it takes another
//! reference, dropping it releases one, and the object is destroyed when the
//! last reference goes away.
//!
//! # Adoption convention
//!
//! [`sp`] and [`sp_from_const`] **adopt** the reference the caller already
//! owns. They never increment the count. This is the same convention the
//! native `sk_sp<T>(T*)` constructor follows, so a pointer returned by a
//! native factory function (which hands over one reference) can be wrapped
//! directly. Callers that only *borrow* a pointer must use
//! [`Sp::from_unowned`] or [`ref_sp`], which increment first.

use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ptr::{self, NonNull};
use std::sync::atomic::{AtomicUsize, Ordering, fence};

/// Atomic reference counter embedded in native objects.
pub struct RefCnt {
    count: AtomicUsize,
}

impl RefCnt {
    /// A counter holding the creator's reference.
    pub const fn new() -> Self {
        Self {
            count: AtomicUsize::new(1),
        }
    }

    /// Current number of references.
    #[inline]
    pub fn count(&self) -> usize {
        self.count.load(Ordering::Acquire)
    }

    /// `true` if the caller holds the only reference.
    #[inline]
    pub fn unique(&self) -> bool {
        self.count() == 1
    }

    /// Takes one additional reference.
    #[inline]
    pub fn ref_(&self) {
        let previous = self.count.fetch_add(1, Ordering::Relaxed);
        debug_assert!(previous > 0, "ref_() on an already released object");
    }

    /// Releases one reference. Returns `true` when it was the last one and
    /// the object must now be destroyed.
    #[inline]
    pub fn unref(&self) -> bool {
        let previous = self.count.fetch_sub(1, Ordering::Release);
        debug_assert!(previous > 0, "unref() on an already released object");
        if previous == 1 {
            // Synchronize with every release before the object is torn down.
            fence(Ordering::Acquire);
            true
        } else {
            false
        }
    }
}

impl Default for RefCnt {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RefCnt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefCnt").field("count", &self.count()).finish()
    }
}

/// Objects that carry a [`RefCnt`] and can be owned through [`Sp`].
///
/// # Safety
///
/// `ref_cnt` must always return the same counter for the lifetime of the
/// object, and `destroy` must release exactly the allocation the object was
/// created in. The default `destroy` assumes a `Box` allocation, which is
/// what [`Sp::new`] produces.
pub unsafe trait NativeRefCounted: Sized {
    fn ref_cnt(&self) -> &RefCnt;

    /// Destroys an object whose count reached zero.
    ///
    /// # Safety
    ///
    /// `this` must point to a live object that no handle references anymore.
    unsafe fn destroy(this: *mut Self) {
        drop(unsafe { Box::from_raw(this) });
    }
}

/// Owned, nullable handle to a reference-counted native object.
///
/// Only shared access (`&T`) is ever handed out, so adopting a pointer to
/// an immutable object through [`sp_from_const`] cannot be used to mutate it.
pub struct Sp<T: NativeRefCounted> {
    ptr: Option<NonNull<T>>,
    _owns: PhantomData<T>,
}

// The counter is atomic, so handles may cross threads whenever the pointee
// itself may be shared.
unsafe impl<T: NativeRefCounted + Send + Sync> Send for Sp<T> {}
unsafe impl<T: NativeRefCounted + Send + Sync> Sync for Sp<T> {}

impl<T: NativeRefCounted> Sp<T> {
    /// Moves `value` to the heap and adopts its initial reference.
    pub fn new(value: T) -> Self {
        debug_assert!(
            value.ref_cnt().unique(),
            "Sp::new() expects a freshly constructed object"
        );
        Self {
            ptr: Some(NonNull::from(Box::leak(Box::new(value)))),
            _owns: PhantomData,
        }
    }

    /// The empty handle.
    pub const fn null() -> Self {
        Self {
            ptr: None,
            _owns: PhantomData,
        }
    }

    /// Adopts the reference owned by `ptr`. Null yields the empty handle.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or point to a live object managed by its
    /// [`RefCnt`], and the caller must own one reference which is
    /// transferred to the returned handle. A dangling pointer, or one the
    /// caller holds no reference for, is undefined behavior.
    pub unsafe fn from_raw(ptr: *mut T) -> Self {
        Self {
            ptr: NonNull::new(ptr),
            _owns: PhantomData,
        }
    }

    /// Takes a new reference to a borrowed object.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or point to a live object managed by its
    /// [`RefCnt`].
    pub unsafe fn from_unowned(ptr: *const T) -> Self {
        if let Some(obj) = unsafe { ptr.as_ref() } {
            obj.ref_cnt().ref_();
        }
        unsafe { Self::from_raw(ptr.cast_mut()) }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.ptr.is_none()
    }

    /// Shared access to the object, `None` for the empty handle.
    #[inline]
    pub fn get(&self) -> Option<&T> {
        // SAFETY: the handle owns a reference, so the object is alive for
        // at least as long as `self` is borrowed.
        self.ptr.map(|ptr| unsafe { &*ptr.as_ptr() })
    }

    /// The raw pointer, without affecting the count. Null for the empty
    /// handle.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr
            .map_or(ptr::null(), |ptr| ptr.as_ptr().cast_const())
    }

    /// Releases the handle's reference to the caller without decrementing.
    /// The inverse of [`sp`].
    #[must_use = "the returned pointer owns a reference"]
    pub fn into_raw(self) -> *mut T {
        let ptr = self.ptr.map_or(ptr::null_mut(), NonNull::as_ptr);
        mem::forget(self);
        ptr
    }

    /// Current reference count, 0 for the empty handle.
    pub fn ref_count(&self) -> usize {
        self.get().map_or(0, |obj| obj.ref_cnt().count())
    }

    /// `true` if both handles refer to the same object, or both are empty.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.ptr == other.ptr
    }

    /// Drops the reference held by this handle and leaves it empty.
    pub fn reset(&mut self) {
        *self = Self::null();
    }
}

impl<T: NativeRefCounted> Clone for Sp<T> {
    fn clone(&self) -> Self {
        if let Some(obj) = self.get() {
            obj.ref_cnt().ref_();
        }
        Self {
            ptr: self.ptr,
            _owns: PhantomData,
        }
    }
}

impl<T: NativeRefCounted> Drop for Sp<T> {
    fn drop(&mut self) {
        if let Some(ptr) = self.ptr.take() {
            // SAFETY: this handle owned one reference; once the count reaches
            // zero nobody else can observe the object.
            if unsafe { ptr.as_ref() }.ref_cnt().unref() {
                unsafe { T::destroy(ptr.as_ptr()) }
            }
        }
    }
}

impl<T: NativeRefCounted> Default for Sp<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T: NativeRefCounted> PartialEq for Sp<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<T: NativeRefCounted> Eq for Sp<T> {}

impl<T: NativeRefCounted + fmt::Debug> fmt::Debug for Sp<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(obj) => f.debug_tuple("Sp").field(obj).finish(),
            None => f.write_str("Sp(null)"),
        }
    }
}

/// Adapts a mutable pointer, adopting the caller's reference.
///
/// # Safety
///
/// See [`Sp::from_raw`]. Null is accepted and yields the empty handle.
#[inline]
pub unsafe fn sp<T: NativeRefCounted>(pt: *mut T) -> Sp<T> {
    unsafe { Sp::from_raw(pt) }
}

/// Adapts a pointer to an immutable object, adopting the caller's reference.
///
/// Constness is discarded only at the ownership layer: the count lives in
/// interior-mutable storage and the handle never exposes `&mut T`.
///
/// # Safety
///
/// See [`Sp::from_raw`]. Null is accepted and yields the empty handle.
#[inline]
pub unsafe fn sp_from_const<T: NativeRefCounted>(pt: *const T) -> Sp<T> {
    unsafe { Sp::from_raw(pt.cast_mut()) }
}

/// Takes a new reference to `obj`.
///
/// # Safety
///
/// `obj` must live in an allocation that [`NativeRefCounted::destroy`] can
/// release, such as one created by [`Sp::new`]. A stack or static object
/// would be freed incorrectly when the last handle drops.
#[inline]
pub unsafe fn ref_sp<T: NativeRefCounted>(obj: &T) -> Sp<T> {
    unsafe { Sp::from_unowned(obj) }
}
