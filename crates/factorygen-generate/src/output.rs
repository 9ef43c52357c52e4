use std::fs::{OpenOptions, create_dir_all};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::errors::GenerationError;

/// Destination of a factory: `<dir>/<factory_name>.<extension>`.
pub fn factory_path(dir: &Path, factory_name: &str, extension: &str) -> PathBuf {
    let extension = extension.trim_start_matches('.');
    if extension.is_empty() {
        dir.join(factory_name)
    } else {
        dir.join(format!("{factory_name}.{extension}"))
    }
}

/// Write `data` through a sibling temp file so a partial factory never
/// lands at `path`.
pub fn write_bytes_atomic(path: &Path, data: &[u8]) -> Result<(), GenerationError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }

    let tmp_path = temp_path(path)?;
    if let Err(err) = write_and_rename(&tmp_path, path, data) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(err.into());
    }

    Ok(())
}

// The caller removes `tmp_path` when any step fails.
fn write_and_rename(tmp_path: &Path, path: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;
    drop(file);

    std::fs::rename(tmp_path, path)
}

fn temp_path(path: &Path) -> Result<PathBuf, GenerationError> {
    let file_name = path.file_name().ok_or_else(|| {
        GenerationError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid factory path {}", path.display()),
        ))
    })?;
    let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
    Ok(path.with_file_name(tmp_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_factory_paths() {
        let dir = Path::new("/app/database/factories");
        assert_eq!(
            factory_path(dir, "UserFactory", "php"),
            PathBuf::from("/app/database/factories/UserFactory.php")
        );
        assert_eq!(
            factory_path(dir, "UserFactory", ".rs"),
            PathBuf::from("/app/database/factories/UserFactory.rs")
        );
        assert_eq!(
            factory_path(dir, "UserFactory", ""),
            PathBuf::from("/app/database/factories/UserFactory")
        );
    }

    #[test]
    fn writes_and_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("database/factories/UserFactory.php");

        write_bytes_atomic(&path, b"<?php\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<?php\n");
        assert!(!path.with_file_name(".UserFactory.php.tmp").exists());
    }

    #[test]
    fn failed_write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("UserFactory.php");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "occupied").unwrap();

        let err = write_bytes_atomic(&path, b"<?php\n").unwrap_err();

        assert!(matches!(err, GenerationError::Io(_)));
        assert!(!dir.path().join(".UserFactory.php.tmp").exists());
        assert_eq!(std::fs::read_to_string(path.join("keep")).unwrap(), "occupied");
    }
}
