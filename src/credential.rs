use crate::error::{Error, Result};
use std::fmt;
use std::path::Path;
use tracing::info;

/// API key for the model provider, read once at startup.
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    /// Read the key file, trimming surrounding whitespace. A missing or
    /// unreadable file is reported as [`Error::Credential`].
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| Error::Credential {
            path: path.to_path_buf(),
            source,
        })?;
        let key = raw.trim();
        if key.is_empty() {
            return Err(Error::Credential {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidData, "key file is empty"),
            });
        }
        info!(path = %path.display(), "loaded API key");
        Ok(Self(key.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key.txt");
        std::fs::write(&path, "  abc123\n").unwrap();
        assert_eq!(Credential::load(&path).unwrap().expose(), "abc123");
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = Credential::load(Path::new("/no/such/key.txt")).unwrap_err();
        assert!(matches!(err, Error::Credential { .. }));
        assert_eq!(
            err.to_string(),
            "API key file not found. Please add '/no/such/key.txt' with your API key."
        );
    }

    #[test]
    fn blank_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key.txt");
        std::fs::write(&path, "\n  \n").unwrap();
        assert!(Credential::load(&path).is_err());
    }

    #[test]
    fn debug_does_not_leak() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key.txt");
        std::fs::write(&path, "topsecret").unwrap();
        let cred = Credential::load(&path).unwrap();
        assert!(!format!("{cred:?}").contains("topsecret"));
    }
}
