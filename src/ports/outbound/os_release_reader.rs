use crate::sbom_generation::domain::OsIdentity;
use crate::shared::SbomResult;
use std::path::Path;

/// OsReleaseReader port for reading OS identity metadata
///
/// This port abstracts the file system operations needed to read an
/// os-release file from an image root.
pub trait OsReleaseReader {
    /// Reads an os-release file into `target`
    ///
    /// Only keys present in the file are written; `target` is untouched
    /// when the call fails.
    ///
    /// # Errors
    /// Returns `IoError` if the file is missing or unreadable. Missing or
    /// unsupported keys are not an error.
    fn read_release_data(&self, target: &mut OsIdentity, path: &Path) -> SbomResult<()>;
}
