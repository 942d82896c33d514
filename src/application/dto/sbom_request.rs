use crate::shared::error::SbomError;
use crate::shared::security::validate_within_root;
use crate::shared::SbomResult;
use std::path::{Component, Path, PathBuf};

/// Locations of the os-release file, most specific first
pub const OS_RELEASE_PATHS: [&str; 2] = ["etc/os-release", "usr/lib/os-release"];

/// Location of the apk installed-package database
pub const INSTALLED_DB_PATH: &str = "lib/apk/db/installed";

/// SbomRequest - Internal request DTO for SBOM generation use case
///
/// Holds the two files the use case reads. Both paths are used as given;
/// `for_root` derives them from an image root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SbomRequest {
    /// Path to the os-release file
    pub os_release_path: PathBuf,
    /// Path to the installed-package database
    pub installed_db_path: PathBuf,
}

impl SbomRequest {
    pub fn new(os_release_path: PathBuf, installed_db_path: PathBuf) -> Self {
        Self {
            os_release_path,
            installed_db_path,
        }
    }

    /// Builds a request for the default file layout of an image root
    ///
    /// `etc/os-release` is preferred; `usr/lib/os-release` is used when the
    /// former does not exist.
    ///
    /// # Errors
    /// - `IoError` if the root cannot be accessed
    /// - `SecurityError` if a file resolves outside the root
    pub fn for_root(root: &Path) -> SbomResult<Self> {
        Self::for_root_with_overrides(root, None, None)
    }

    /// Builds a request for an image root, with optional root-relative
    /// replacements for either file location
    ///
    /// # Errors
    /// - `ConfigurationError` if an override is absolute or leaves the root
    /// - `IoError` if the root cannot be accessed
    /// - `SecurityError` if a file resolves outside the root
    pub fn for_root_with_overrides(
        root: &Path,
        os_release: Option<&Path>,
        installed_db: Option<&Path>,
    ) -> SbomResult<Self> {
        let metadata = root.metadata().map_err(|source| SbomError::IoError {
            path: root.to_path_buf(),
            source,
        })?;
        if !metadata.is_dir() {
            return Err(SbomError::IoError {
                path: root.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "image root is not a directory",
                ),
            });
        }

        let os_release_path = match os_release {
            Some(relative) => root.join(check_relative(relative)?),
            None => OS_RELEASE_PATHS
                .iter()
                .map(|candidate| root.join(candidate))
                .find(|path| path.exists())
                .unwrap_or_else(|| root.join(OS_RELEASE_PATHS[0])),
        };
        let installed_db_path = match installed_db {
            Some(relative) => root.join(check_relative(relative)?),
            None => root.join(INSTALLED_DB_PATH),
        };

        // Missing files are reported by the readers with their own path.
        for path in [&os_release_path, &installed_db_path] {
            if path.exists() {
                validate_within_root(root, path)?;
            }
        }

        Ok(Self::new(os_release_path, installed_db_path))
    }
}

fn check_relative(path: &Path) -> SbomResult<&Path> {
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(SbomError::ConfigurationError {
            reason: format!("{} is not a path inside the image root", path.display()),
            hint: "Use a relative path such as etc/os-release".to_string(),
        });
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn image_root() -> TempDir {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("etc")).unwrap();
        fs::create_dir_all(root.path().join("usr/lib")).unwrap();
        fs::create_dir_all(root.path().join("lib/apk/db")).unwrap();
        fs::write(root.path().join("lib/apk/db/installed"), "").unwrap();
        root
    }

    #[test]
    fn test_for_root_prefers_etc_os_release() {
        let root = image_root();
        fs::write(root.path().join("etc/os-release"), "ID=alpine\n").unwrap();
        fs::write(root.path().join("usr/lib/os-release"), "ID=other\n").unwrap();

        let request = SbomRequest::for_root(root.path()).unwrap();

        assert_eq!(request.os_release_path, root.path().join("etc/os-release"));
        assert_eq!(
            request.installed_db_path,
            root.path().join("lib/apk/db/installed")
        );
    }

    #[test]
    fn test_for_root_falls_back_to_usr_lib() {
        let root = image_root();
        fs::write(root.path().join("usr/lib/os-release"), "ID=wolfi\n").unwrap();

        let request = SbomRequest::for_root(root.path()).unwrap();
        assert_eq!(
            request.os_release_path,
            root.path().join("usr/lib/os-release")
        );
    }

    #[test]
    fn test_for_root_without_os_release_keeps_default_path() {
        let root = image_root();

        let request = SbomRequest::for_root(root.path()).unwrap();
        assert_eq!(request.os_release_path, root.path().join("etc/os-release"));
    }

    #[test]
    fn test_for_root_missing_root() {
        let root = TempDir::new().unwrap();
        let result = SbomRequest::for_root(&root.path().join("missing"));
        assert!(matches!(result, Err(SbomError::IoError { .. })));
    }

    #[test]
    fn test_for_root_rejects_file_as_root() {
        let root = image_root();
        let file = root.path().join("lib/apk/db/installed");
        assert!(matches!(
            SbomRequest::for_root(&file),
            Err(SbomError::IoError { .. })
        ));
    }

    #[test]
    fn test_overrides_are_root_relative() {
        let root = image_root();
        let request = SbomRequest::for_root_with_overrides(
            root.path(),
            Some(Path::new("usr/lib/os-release")),
            Some(Path::new("./var/lib/apk/installed")),
        )
        .unwrap();

        assert_eq!(
            request.os_release_path,
            root.path().join("usr/lib/os-release")
        );
        assert_eq!(
            request.installed_db_path,
            root.path().join("./var/lib/apk/installed")
        );
    }

    #[test]
    fn test_overrides_may_not_escape_root() {
        let root = image_root();
        for bad in ["/etc/os-release", "../etc/os-release", "etc/../../passwd"] {
            let result =
                SbomRequest::for_root_with_overrides(root.path(), Some(Path::new(bad)), None);
            assert!(
                matches!(result, Err(SbomError::ConfigurationError { .. })),
                "{} should be rejected",
                bad
            );
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_for_root_rejects_symlink_to_host() {
        let root = image_root();
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("os-release"), "ID=host\n").unwrap();
        std::os::unix::fs::symlink(
            outside.path().join("os-release"),
            root.path().join("etc/os-release"),
        )
        .unwrap();

        let result = SbomRequest::for_root(root.path());
        assert!(matches!(result, Err(SbomError::SecurityError { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_for_root_accepts_relative_symlink() {
        let root = image_root();
        fs::write(root.path().join("usr/lib/os-release"), "ID=alpine\n").unwrap();
        std::os::unix::fs::symlink(
            "../usr/lib/os-release",
            root.path().join("etc/os-release"),
        )
        .unwrap();

        let request = SbomRequest::for_root(root.path()).unwrap();
        assert_eq!(request.os_release_path, root.path().join("etc/os-release"));
    }
}
