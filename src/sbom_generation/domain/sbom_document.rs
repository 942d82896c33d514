use super::os_identity::OsIdentity;
use super::package::PackageRecord;
use super::sbom_metadata::SbomMetadata;
use serde::Serialize;

/// SbomDocument aggregate: everything a document serializer needs
///
/// Package order is the order of the installed database, which keeps
/// generated documents reproducible for the same image.
#[derive(Debug, Clone, Serialize)]
pub struct SbomDocument {
    metadata: SbomMetadata,
    os: OsIdentity,
    packages: Vec<PackageRecord>,
}

impl SbomDocument {
    pub fn new(metadata: SbomMetadata, os: OsIdentity, packages: Vec<PackageRecord>) -> Self {
        Self {
            metadata,
            os,
            packages,
        }
    }

    pub fn metadata(&self) -> &SbomMetadata {
        &self.metadata
    }

    pub fn os(&self) -> &OsIdentity {
        &self.os
    }

    pub fn packages(&self) -> &[PackageRecord] {
        &self.packages
    }

    /// Looks a package up by name
    pub fn package(&self, name: &str) -> Option<&PackageRecord> {
        self.packages.iter().find(|p| p.name == name)
    }

    /// Package URLs in database order
    pub fn purls(&self) -> Vec<String> {
        self.packages.iter().map(|p| p.purl(&self.os)).collect()
    }

    /// Total number of files across all packages
    pub fn file_count(&self) -> usize {
        self.packages.iter().map(|p| p.files.len()).sum()
    }
}
