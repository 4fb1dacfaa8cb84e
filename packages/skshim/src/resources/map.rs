use std::collections::HashMap;

use crate::data::Data;
use crate::refcnt::Sp;
use crate::resources::ResourceProvider;

/// In-memory registry of resources keyed by `(path, name)`.
#[derive(Debug, Default, Clone)]
pub struct MapResourceProvider {
    // path -> name -> data
    resources: HashMap<String, HashMap<String, Sp<Data>>>,
}

impl MapResourceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `data`, replacing any previous entry for the pair.
    pub fn insert(&mut self, path: impl Into<String>, name: impl Into<String>, data: Sp<Data>) {
        self.resources
            .entry(path.into())
            .or_default()
            .insert(name.into(), data);
    }

    #[inline]
    pub fn with(mut self, path: impl Into<String>, name: impl Into<String>, data: Sp<Data>) -> Self {
        self.insert(path, name, data);
        self
    }

    pub fn len(&self) -> usize {
        self.resources.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl ResourceProvider for MapResourceProvider {
    fn load(&self, path: &str, name: &str) -> Option<Sp<Data>> {
        self.resources
            .get(path)
            .and_then(|names| names.get(name))
            .filter(|data| !data.is_null())
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_pair_returns_registered_bytes() {
        let provider = MapResourceProvider::new().with("fonts", "a.ttf", Data::new_copy(b"abc"));

        let data = provider.load("fonts", "a.ttf").unwrap();
        assert_eq!(data.get().unwrap().as_bytes(), b"abc");
    }

    #[test]
    fn unknown_pair_is_none() {
        let provider = MapResourceProvider::new().with("fonts", "a.ttf", Data::new_copy(b"abc"));

        assert!(provider.load("fonts", "b.ttf").is_none());
        assert!(provider.load("images", "a.ttf").is_none());
    }

    #[test]
    fn caller_gets_its_own_reference() {
        let provider = MapResourceProvider::new().with("", "x", Data::new_copy(b"x"));

        let loaded = provider.load("", "x").unwrap();
        assert_eq!(loaded.ref_count(), 2);
        drop(provider);
        assert_eq!(loaded.ref_count(), 1);
    }
}
