use data_url::DataUrl;

use crate::data::Data;
use crate::error::{ResourceError, ResourceResult};
use crate::refcnt::Sp;
use crate::resources::{ResourceProvider, found_or_log};

/// Decodes resources whose name is a `data:` URI, forwarding everything
/// else to an optional fallback provider.
///
/// Animation files commonly inline small images this way.
#[derive(Debug, Clone)]
pub struct DataUriResourceProvider<P> {
    fallback: Option<P>,
}

impl<P: ResourceProvider> DataUriResourceProvider<P> {
    pub fn new(fallback: Option<P>) -> Self {
        Self { fallback }
    }

    pub fn fallback(&self) -> Option<&P> {
        self.fallback.as_ref()
    }

    /// Decodes a `data:` URI.
    pub fn decode(uri: &str) -> ResourceResult<Sp<Data>> {
        let data_url = DataUrl::process(uri)?;
        let (bytes, _fragment) = data_url.decode_to_vec()?;
        Ok(Data::from_bytes(bytes))
    }
}

fn is_data_uri(name: &str) -> bool {
    name.get(..5)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("data:"))
}

impl<P: ResourceProvider> ResourceProvider for DataUriResourceProvider<P> {
    fn load(&self, path: &str, name: &str) -> Option<Sp<Data>> {
        if is_data_uri(name) {
            return found_or_log(path, "<data uri>", Self::decode(name));
        }
        match &self.fallback {
            Some(fallback) => fallback.load(path, name),
            None => found_or_log(path, name, Err(ResourceError::not_found(path, name))),
        }
    }
}
