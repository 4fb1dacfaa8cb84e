pub mod conversions;
pub mod types;

pub use types::{ResourceError, ResourceResult};
