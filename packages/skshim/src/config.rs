use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{ResourceError, ResourceResult};
use crate::resources::{CachingResourceProvider, FileResourceProvider, ResourceProvider};

/// Serializable description of a resource provider stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    /// Directory relative resource paths are resolved against
    pub base_dir: Option<PathBuf>,
    /// Memoize successful loads
    pub cache: bool,
    /// Most resources the cache keeps before evicting the least recently used
    pub max_cached_resources: usize,
    /// Decode resources named by `data:` URIs
    pub decode_data_uris: bool,
    /// Largest file accepted from disk, in bytes
    pub max_resource_size: Option<u64>,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            cache: true,
            max_cached_resources: crate::constants::DEFAULT_MAX_CACHED_RESOURCES,
            decode_data_uris: cfg!(feature = "data-uri"),
            max_resource_size: Some(crate::constants::DEFAULT_MAX_RESOURCE_SIZE),
        }
    }
}

impl ResourceConfig {
    pub fn from_json(json: &str) -> ResourceResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> ResourceResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Fluent builder assembling a [`ResourceProvider`] stack
#[derive(Debug, Clone, Default)]
pub struct ResourceProviderBuilder {
    config: ResourceConfig,
}

impl ResourceProviderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: ResourceConfig) -> Self {
        Self { config }
    }

    /// Resolve resources from `dir`
    #[inline]
    pub fn with_base_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.config.base_dir = Some(dir.into());
        self
    }

    #[inline]
    pub fn with_max_resource_size(mut self, bytes: u64) -> Self {
        self.config.max_resource_size = Some(bytes);
        self
    }

    #[inline]
    pub fn unlimited_resource_size(mut self) -> Self {
        self.config.max_resource_size = None;
        self
    }

    /// Bound the cache to `entries` resources
    #[inline]
    pub fn with_max_cached_resources(mut self, entries: usize) -> Self {
        self.config.max_cached_resources = entries;
        self
    }

    #[inline]
    pub fn disable_cache(mut self) -> Self {
        self.config.cache = false;
        self
    }

    /// Enable `data:` URI decoding (requires "data-uri" feature)
    #[inline]
    #[cfg(feature = "data-uri")]
    pub fn enable_data_uris(mut self) -> Self {
        self.config.decode_data_uris = true;
        self
    }

    #[inline]
    pub fn disable_data_uris(mut self) -> Self {
        self.config.decode_data_uris = false;
        self
    }

    pub fn config(&self) -> &ResourceConfig {
        &self.config
    }

    /// Validate configuration before building
    pub fn validate(&self) -> ResourceResult<()> {
        if self.config.max_resource_size == Some(0) {
            return Err(ResourceError::config_error_with_field(
                "max_resource_size",
                "cannot be zero",
            ));
        }

        if self.config.cache && self.config.max_cached_resources == 0 {
            return Err(ResourceError::config_error_with_field(
                "max_cached_resources",
                "cannot be zero while caching is enabled",
            ));
        }

        if self.config.decode_data_uris && !cfg!(feature = "data-uri") {
            return Err(ResourceError::config_error_with_field(
                "decode_data_uris",
                "built without the \"data-uri\" feature",
            ));
        }

        if let Some(dir) = &self.config.base_dir {
            if !dir.is_dir() {
                return Err(ResourceError::config_error_with_field(
                    "base_dir",
                    format!("not a directory: {}", dir.display()),
                ));
            }
        } else if !self.config.decode_data_uris {
            return Err(ResourceError::Config(
                "No resource source configured".to_string(),
            ));
        }

        Ok(())
    }

    /// Build the provider stack: files, then the `data:` proxy in front,
    /// then the cache outermost.
    pub fn build(self) -> ResourceResult<Arc<dyn ResourceProvider>> {
        self.validate()?;
        let config = self.config;

        let files = config.base_dir.map(|dir| {
            let provider = FileResourceProvider::new(dir);
            match config.max_resource_size {
                Some(max) => provider.with_max_size(max),
                None => provider,
            }
        });

        let source: Box<dyn ResourceProvider> = match files {
            #[cfg(feature = "data-uri")]
            files if config.decode_data_uris => {
                Box::new(crate::resources::DataUriResourceProvider::new(files))
            }
            Some(files) => Box::new(files),
            // `validate` rejects a config with no source at all.
            None => return Err(ResourceError::Config("No resource source configured".to_string())),
        };

        log::debug!(
            "Built resource provider (cache: {}, data URIs: {})",
            config.cache,
            config.decode_data_uris
        );

        let provider: Arc<dyn ResourceProvider> = if config.cache {
            let max_entries = NonZeroUsize::new(config.max_cached_resources).ok_or_else(|| {
                ResourceError::config_error_with_field("max_cached_resources", "cannot be zero")
            })?;
            Arc::new(CachingResourceProvider::with_max_entries(source, max_entries))
        } else {
            Arc::new(source)
        };
        Ok(provider)
    }
}
