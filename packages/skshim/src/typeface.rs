//! Family-name lookup for paragraph layout.
//!
//! Layout asks which of the requested font families can actually be
//! resolved and gets the answer back as one [`Strings`] value.

use crate::data::Data;
use crate::error::{ResourceError, ResourceResult};
use crate::refcnt::Sp;
use crate::resources::ResourceProvider;
use crate::strings::Strings;

/// Registered typefaces, keyed by family name, in registration order.
#[derive(Debug, Default, Clone)]
pub struct TypefaceCollection {
    families: Vec<(String, Sp<Data>)>,
}

impl TypefaceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers font data under the family name stored in the font itself.
    pub fn register(&mut self, data: Sp<Data>) -> ResourceResult<String> {
        let family = {
            let bytes = data
                .get()
                .ok_or_else(|| ResourceError::Parse("empty font handle".to_string()))?;
            extract_family_name(bytes.as_bytes())?
        };
        self.register_with_family(family.clone(), data);
        Ok(family)
    }

    /// Registers font data under an explicit family name. A family that is
    /// already registered keeps its position and gets the new data.
    pub fn register_with_family(&mut self, family: impl Into<String>, data: Sp<Data>) {
        let family = family.into();
        match self.position(&family) {
            Some(index) => self.families[index].1 = data,
            None => self.families.push((family, data)),
        }
    }

    /// Loads a font through `provider` and registers it.
    pub fn load_typeface(
        &mut self,
        provider: &dyn ResourceProvider,
        path: &str,
        name: &str,
    ) -> ResourceResult<String> {
        let data = provider
            .load(path, name)
            .ok_or_else(|| ResourceError::not_found(path, name))?;
        let family = self.register(data)?;
        log::debug!("Registered typeface '{}' from {}/{}", family, path, name);
        Ok(family)
    }

    /// The requested families that resolve, in request order, as their
    /// registered names. Matching ignores ASCII case.
    pub fn find_typefaces(&self, families: &[&str]) -> Strings {
        families
            .iter()
            .filter_map(|requested| self.position(requested))
            .map(|index| self.families[index].0.clone())
            .collect()
    }

    /// All registered families in registration order.
    pub fn family_names(&self) -> Strings {
        self.families.iter().map(|(family, _)| family.clone()).collect()
    }

    pub fn typeface(&self, family: &str) -> Option<Sp<Data>> {
        self.position(family)
            .map(|index| self.families[index].1.clone())
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    fn position(&self, family: &str) -> Option<usize> {
        self.families
            .iter()
            .position(|(registered, _)| registered.eq_ignore_ascii_case(family))
    }
}

/// Reads the family name from TrueType / OpenType font data.
pub fn extract_family_name(data: &[u8]) -> ResourceResult<String> {
    use ttf_parser::Face;

    let face = Face::parse(data, 0)?;

    face.names()
        .into_iter()
        .filter(|name| name.name_id == ttf_parser::name_id::FAMILY)
        .find_map(|name| name.to_string())
        .ok_or_else(|| ResourceError::Parse("No family name found".to_string()))
}
