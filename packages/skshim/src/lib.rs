//! Ownership and resource glue for a native 2D graphics binding
//!
//! This crate provides the small boundary layer between generated binding
//! code and a reference-counted native graphics engine:
//! - Owned handles over reference-counted objects ([`Sp`], [`sp`],
//!   [`sp_from_const`])
//! - An opaque, reference-counted byte buffer ([`Data`])
//! - A string list passed across the boundary as one value ([`Strings`])
//! - Pluggable resource loading for animation and paragraph layout
//!   ([`ResourceProvider`], [`LoadDataFn`])
//!
//! # Ownership
//!
//! Adapting a raw pointer **adopts** the reference the caller owns; see
//! [`refcnt`] for the full convention. Adapting null yields an empty handle.
//!
//! # Example
//!
//! ```rust
//! use skshim::{Data, MapResourceProvider, ResourceProvider, TypefaceCollection};
//!
//! // Initialize logging (optional, for development)
//! let _ = env_logger::try_init();
//!
//! let provider = MapResourceProvider::new()
//!     .with("images", "logo.png", Data::new_copy(b"\x89PNG"));
//!
//! let logo = provider.load("images", "logo.png").expect("registered above");
//! assert_eq!(logo.get().map(|data| data.len()), Some(4));
//! assert!(provider.load("images", "missing.png").is_none());
//!
//! let mut typefaces = TypefaceCollection::new();
//! typefaces.register_with_family("Roboto", Data::new_copy(b"..."));
//! let found = typefaces.find_typefaces(&["Roboto", "Comic Sans"]);
//! assert_eq!(found.iter().collect::<Vec<_>>(), ["Roboto"]);
//! ```

mod config;
mod data;
mod error;
pub mod ffi;
pub mod handle;
pub mod refcnt;
pub mod resources;
pub mod strings;
mod typeface;

// Public API exports
pub use config::{ResourceConfig, ResourceProviderBuilder};
pub use data::Data;
pub use error::{ResourceError, ResourceResult};
pub use handle::{Handle, NativeDrop, NativeValidity};
pub use refcnt::{NativeRefCounted, RefCnt, Sp, ref_sp, sp, sp_from_const};
#[cfg(feature = "data-uri")]
pub use resources::DataUriResourceProvider;
pub use resources::{
    CachingResourceProvider, FileResourceProvider, FnResourceProvider, LoadDataFn,
    MapResourceProvider, ResourceProvider, from_fn,
};
pub use strings::Strings;
pub use typeface::{TypefaceCollection, extract_family_name};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod constants {
    /// Default size limit for resources read from disk (64MB)
    pub const DEFAULT_MAX_RESOURCE_SIZE: u64 = 64 * 1024 * 1024;

    /// Default number of resources kept by a caching provider
    pub const DEFAULT_MAX_CACHED_RESOURCES: usize = 256;
}
