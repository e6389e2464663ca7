//! File utility functions.

use crate::error::Result;
use std::path::Path;

/// Read a UTF-8 file that may not exist yet. A missing file is `Ok(None)`.
pub fn read_optional_utf8(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!("Not found: {}", path.display());
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_optional_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pets.yaml");
        assert!(read_optional_utf8(&path).unwrap().is_none());

        std::fs::write(&path, "Pets:\n").unwrap();
        assert_eq!(read_optional_utf8(&path).unwrap().as_deref(), Some("Pets:\n"));

        // A directory is not a missing file.
        assert!(read_optional_utf8(dir.path()).is_err());
    }
}
