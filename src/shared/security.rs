use crate::shared::error::SbomError;
use crate::shared::SbomResult;
use std::fs;
use std::io;
use std::path::Path;

/// Maximum size for files that are read fully into memory (1 MB).
/// os-release is a handful of lines; anything larger is not an os-release file.
pub const MAX_RELEASE_FILE_SIZE: u64 = 1024 * 1024;

/// Validates that a path exists and is a regular file
///
/// Symbolic links are followed: image roots routinely ship
/// `etc/os-release` as a link into `usr/lib`. Use [`validate_within_root`]
/// to make sure the link does not escape the image.
///
/// # Errors
/// Returns `IoError` if the path does not exist, its metadata cannot be read,
/// or it is not a regular file (directory, FIFO, device)
pub fn validate_regular_file(path: &Path) -> SbomResult<fs::Metadata> {
    let metadata = fs::metadata(path).map_err(|source| SbomError::IoError {
        path: path.to_path_buf(),
        source,
    })?;

    if !metadata.is_file() {
        return Err(SbomError::IoError {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
        });
    }

    Ok(metadata)
}

/// Validates file size is within acceptable limits
///
/// # Errors
/// Returns `IoError` if the file size exceeds the maximum
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> SbomResult<()> {
    if file_size > max_size {
        return Err(SbomError::IoError {
            path: path.to_path_buf(),
            source: io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "file is too large ({} bytes), maximum allowed size is {} bytes",
                    file_size, max_size
                ),
            ),
        });
    }
    Ok(())
}

/// Validates that `path`, after resolving symbolic links, stays inside `root`
///
/// An absolute symlink inside an image root points at the *host* filesystem,
/// which would silently describe the wrong system.
///
/// # Errors
/// - `IoError` if either path cannot be canonicalized
/// - `SecurityError` if the resolved path lies outside the root
pub fn validate_within_root(root: &Path, path: &Path) -> SbomResult<()> {
    let canonical_root = root.canonicalize().map_err(|source| SbomError::IoError {
        path: root.to_path_buf(),
        source,
    })?;
    let canonical_path = path.canonicalize().map_err(|source| SbomError::IoError {
        path: path.to_path_buf(),
        source,
    })?;

    if !canonical_path.starts_with(&canonical_root) {
        return Err(SbomError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "Resolves to {} which is outside the image root {}",
                canonical_path.display(),
                canonical_root.display()
            ),
            hint: "Replace absolute symbolic links in the image with relative ones".to_string(),
        });
    }

    Ok(())
}
