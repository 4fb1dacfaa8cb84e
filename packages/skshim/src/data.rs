use std::fmt;

use bytes::Bytes;

use crate::refcnt::{NativeRefCounted, RefCnt, Sp};

/// Immutable, reference-counted byte buffer.
///
/// This is the opaque buffer resource loaders hand back. Always owned
/// through [`Sp<Data>`].
pub struct Data {
    ref_cnt: RefCnt,
    bytes: Bytes,
}

unsafe impl NativeRefCounted for Data {
    fn ref_cnt(&self) -> &RefCnt {
        &self.ref_cnt
    }
}

impl Data {
    /// Copies `bytes` into a new buffer.
    pub fn new_copy(bytes: &[u8]) -> Sp<Data> {
        Self::from_bytes(Bytes::copy_from_slice(bytes))
    }

    /// Wraps existing storage without copying.
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Sp<Data> {
        Sp::new(Data {
            ref_cnt: RefCnt::new(),
            bytes: bytes.into(),
        })
    }

    pub fn new_empty() -> Sp<Data> {
        Self::from_bytes(Bytes::new())
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// A cheap clone of the underlying storage, independent of this buffer's
    /// reference count.
    pub fn to_bytes(&self) -> Bytes {
        self.bytes.clone()
    }
}

impl AsRef<[u8]> for Data {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Data")
            .field("len", &self.len())
            .field("ref_cnt", &self.ref_cnt.count())
            .finish()
    }
}
