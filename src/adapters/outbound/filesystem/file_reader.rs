use crate::ports::outbound::{OsReleaseReader, PackageIndexReader};
use crate::sbom_generation::domain::{OsIdentity, PackageRecord};
use crate::sbom_generation::services::{apply_release_data, PackageIndexParser};
use crate::shared::error::SbomError;
use crate::shared::security::{validate_file_size, validate_regular_file, MAX_RELEASE_FILE_SIZE};
use crate::shared::SbomResult;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// FileSystemReader adapter for reading image metadata from the file system
///
/// This adapter implements both OsReleaseReader and PackageIndexReader ports.
/// Each call opens, reads and closes its own file; nothing is retained.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystemReader {
    /// Safely read a small file fully into memory:
    /// - Validate file is a regular file
    /// - Check file size limits
    fn safe_read_file(&self, path: &Path, max_size: u64) -> SbomResult<String> {
        let metadata = validate_regular_file(path)?;
        validate_file_size(metadata.len(), path, max_size)?;

        fs::read_to_string(path).map_err(|source| SbomError::IoError {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl OsReleaseReader for FileSystemReader {
    fn read_release_data(&self, target: &mut OsIdentity, path: &Path) -> SbomResult<()> {
        let content = self.safe_read_file(path, MAX_RELEASE_FILE_SIZE)?;
        apply_release_data(&content, target);
        tracing::debug!(
            "Read OS identity from {}: id={:?} version={:?}",
            path.display(),
            target.id,
            target.version
        );
        Ok(())
    }
}

impl PackageIndexReader for FileSystemReader {
    fn read_package_index(&self, path: &Path) -> SbomResult<Vec<PackageRecord>> {
        validate_regular_file(path)?;

        // Streamed: installed databases of large images run to many megabytes.
        let file = File::open(path).map_err(|source| SbomError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        PackageIndexParser::parse(BufReader::new(file), path)
    }
}
