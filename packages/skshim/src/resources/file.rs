use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::data::Data;
use crate::error::{ResourceError, ResourceResult};
use crate::refcnt::Sp;
use crate::resources::{ResourceProvider, found_or_log};

/// Resolves `base_dir/path/name` on the local file system.
///
/// `path` and `name` must be relative and may not step out of `base_dir`:
/// absolute parts, drive prefixes and `..` are rejected with
/// [`ResourceError::InvalidName`].
#[derive(Debug, Clone)]
pub struct FileResourceProvider {
    base_dir: PathBuf,
    max_size: Option<u64>,
}

impl FileResourceProvider {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            max_size: None,
        }
    }

    /// Rejects files larger than `max_size` bytes.
    #[inline]
    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_size = Some(max_size);
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Full path a `(path, name)` pair resolves to.
    pub fn resolve(&self, path: &str, name: &str) -> ResourceResult<PathBuf> {
        ensure_contained(path)?;
        ensure_contained(name)?;
        Ok(self.base_dir.join(path).join(name))
    }

    pub fn try_load(&self, path: &str, name: &str) -> ResourceResult<Sp<Data>> {
        let full_path = self.resolve(path, name)?;

        let metadata = match std::fs::metadata(&full_path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ResourceError::not_found(path, name));
            }
            Err(e) => return Err(ResourceError::io_error_with_path(&full_path, e.to_string())),
        };

        if !metadata.is_file() {
            return Err(ResourceError::not_found(path, name));
        }

        if let Some(max) = self.max_size {
            if metadata.len() > max {
                return Err(ResourceError::TooLarge {
                    size: metadata.len(),
                    max,
                });
            }
        }

        let bytes = std::fs::read(&full_path)
            .map_err(|e| ResourceError::io_error_with_path(&full_path, e.to_string()))?;
        log::debug!("Loaded {} ({} bytes)", full_path.display(), bytes.len());
        Ok(Data::from_bytes(bytes))
    }
}

/// Only plain and `.` components keep a join below the base directory.
fn ensure_contained(part: &str) -> ResourceResult<()> {
    let escapes = Path::new(part)
        .components()
        .any(|component| !matches!(component, Component::Normal(_) | Component::CurDir));
    if escapes {
        Err(ResourceError::InvalidName(format!(
            "'{}' escapes the base directory",
            part
        )))
    } else {
        Ok(())
    }
}

impl ResourceProvider for FileResourceProvider {
    fn load(&self, path: &str, name: &str) -> Option<Sp<Data>> {
        found_or_log(path, name, self.try_load(path, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("images")).unwrap();
        std::fs::write(dir.path().join("images").join("logo.png"), b"png-bytes").unwrap();
        dir
    }

    #[test]
    fn loads_file_under_base_dir() {
        let dir = fixture();
        let provider = FileResourceProvider::new(dir.path());

        let data = provider.load("images", "logo.png").unwrap();
        assert_eq!(data.get().unwrap().as_bytes(), b"png-bytes");
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = fixture();
        let provider = FileResourceProvider::new(dir.path());

        assert!(provider.load("images", "other.png").is_none());
        assert!(provider.try_load("images", "other.png").unwrap_err().is_not_found());
    }

    #[test]
    fn directory_is_not_a_resource() {
        let dir = fixture();
        let provider = FileResourceProvider::new(dir.path());

        assert!(provider.try_load("", "images").unwrap_err().is_not_found());
    }

    #[test]
    fn absolute_name_cannot_leave_base_dir() {
        let dir = fixture();
        let outside = tempfile::tempdir().unwrap();
        let secret = outside.path().join("secret.txt");
        std::fs::write(&secret, b"outside-bytes").unwrap();

        let provider = FileResourceProvider::new(dir.path());
        let name = secret.to_str().unwrap();

        assert!(provider.load("images", name).is_none());
        assert_eq!(
            provider.try_load("images", name).unwrap_err().category(),
            "invalid_name"
        );
        let outside_dir = outside.path().to_str().unwrap();
        assert!(provider.load(outside_dir, "secret.txt").is_none());
    }

    #[test]
    fn parent_components_cannot_leave_base_dir() {
        let dir = fixture();
        std::fs::write(dir.path().join("secret.txt"), b"outside-bytes").unwrap();

        // Rooted one level down, so `..` would reach `secret.txt`.
        let provider = FileResourceProvider::new(dir.path().join("images"));

        assert!(provider.load("..", "secret.txt").is_none());
        assert!(provider.load("", "../secret.txt").is_none());
        assert!(provider.load("./sub/..", "secret.txt").is_none());
        assert_eq!(
            provider.try_load("..", "secret.txt").unwrap_err().category(),
            "invalid_name"
        );
    }

    #[test]
    fn current_dir_components_are_allowed() {
        let dir = fixture();
        let provider = FileResourceProvider::new(dir.path());

        assert!(provider.load("./images", "logo.png").is_some());
    }

    #[test]
    fn io_errors_name_the_file() {
        let dir = fixture();
        let provider = FileResourceProvider::new(dir.path());

        // A regular file used as a directory fails with something other
        // than not-found.
        let err = provider.try_load("images/logo.png", "inner").unwrap_err();
        assert_eq!(err.category(), "io");
        assert!(err.to_string().contains("logo.png"));
        assert!(provider.load("images/logo.png", "inner").is_none());
    }

    #[test]
    fn size_limit_is_enforced() {
        let dir = fixture();
        let provider = FileResourceProvider::new(dir.path()).with_max_size(4);

        assert_eq!(
            provider.try_load("images", "logo.png").unwrap_err(),
            ResourceError::TooLarge { size: 9, max: 4 }
        );
        assert!(provider.load("images", "logo.png").is_none());
    }
}
