use crate::sbom_generation::domain::PackageRecord;
use crate::shared::SbomResult;
use std::path::Path;

/// PackageIndexReader port for reading the installed-package database
pub trait PackageIndexReader {
    /// Reads every record of the database, in database order
    ///
    /// # Errors
    /// - `IoError` if the file is missing or unreadable
    /// - `ParseError` if any line or record is malformed; no partial list is
    ///   returned
    fn read_package_index(&self, path: &Path) -> SbomResult<Vec<PackageRecord>>;
}
