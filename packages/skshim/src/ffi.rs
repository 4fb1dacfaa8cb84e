//! `extern "C"` entry points called by generated binding code.
//!
//! Pointers to [`Data`] crossing this boundary follow the adoption
//! convention of [`sp`](crate::sp): a returned non-null pointer carries one
//! reference that the caller must eventually release with
//! [`C_Data_unref`].

#![allow(non_snake_case)]

use std::ffi::{CStr, c_char};
use std::ptr;

use crate::data::Data;
use crate::refcnt::NativeRefCounted;
use crate::strings::Strings;

#[unsafe(no_mangle)]
pub extern "C" fn C_Strings_new() -> *mut Strings {
    Box::into_raw(Box::new(Strings::new()))
}

/// # Safety
///
/// `strings` must come from [`C_Strings_new`] and `value` must be a valid
/// null-terminated string. Invalid UTF-8 is replaced lossily.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn C_Strings_push(strings: *mut Strings, value: *const c_char) {
    if value.is_null() {
        return;
    }
    let Some(strings) = (unsafe { strings.as_mut() }) else {
        return;
    };
    let value = unsafe { CStr::from_ptr(value) };
    strings.push(value.to_string_lossy());
}

/// # Safety
///
/// `strings` must be null or come from [`C_Strings_new`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn C_Strings_count(strings: *const Strings) -> usize {
    let strings = unsafe { strings.as_ref() };
    strings.map_or(0, Strings::len)
}

/// Returns the UTF-8 bytes of the value at `index` and stores their length
/// in `len`. Null when out of range. The pointer stays valid until the list
/// is deleted.
///
/// # Safety
///
/// `strings` must be null or come from [`C_Strings_new`]; `len` must be
/// null or writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn C_Strings_at(
    strings: *const Strings,
    index: usize,
    len: *mut usize,
) -> *const u8 {
    let value = unsafe { strings.as_ref() }.and_then(|strings| strings.get(index));
    if let Some(len) = unsafe { len.as_mut() } {
        *len = value.map_or(0, str::len);
    }
    value.map_or(ptr::null(), str::as_ptr)
}

/// # Safety
///
/// `strings` must be null or come from [`C_Strings_new`], and must not be
/// used afterwards.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn C_Strings_delete(strings: *mut Strings) {
    if !strings.is_null() {
        drop(unsafe { Box::from_raw(strings) });
    }
}

/// # Safety
///
/// `bytes` must be readable for `len` bytes, or `len` must be 0.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn C_Data_new_copy(bytes: *const u8, len: usize) -> *mut Data {
    let data = if bytes.is_null() || len == 0 {
        Data::new_empty()
    } else {
        Data::new_copy(unsafe { std::slice::from_raw_parts(bytes, len) })
    };
    data.into_raw()
}

/// # Safety
///
/// `data` must be null or point to a live [`Data`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn C_Data_size(data: *const Data) -> usize {
    let data = unsafe { data.as_ref() };
    data.map_or(0, Data::len)
}

/// # Safety
///
/// `data` must be null or point to a live [`Data`]. The returned pointer is
/// valid while the caller keeps its reference.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn C_Data_bytes(data: *const Data) -> *const u8 {
    let data = unsafe { data.as_ref() };
    data.map_or(ptr::null(), |data| data.as_bytes().as_ptr())
}

/// # Safety
///
/// `data` must be null or point to a live [`Data`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn C_Data_ref(data: *const Data) {
    if let Some(data) = unsafe { data.as_ref() } {
        data.ref_cnt().ref_();
    }
}

/// Releases one reference.
///
/// # Safety
///
/// The caller must own a reference to `data`, or pass null.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn C_Data_unref(data: *mut Data) {
    drop(unsafe { crate::refcnt::sp(data) });
}

/// # Safety
///
/// `data` must be null or point to a live [`Data`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn C_Data_ref_count(data: *const Data) -> usize {
    let data = unsafe { data.as_ref() };
    data.map_or(0, |data| data.ref_cnt().count())
}
