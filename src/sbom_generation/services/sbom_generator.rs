use crate::sbom_generation::domain::{OsIdentity, PackageRecord, SbomDocument, SbomMetadata};
use chrono::Utc;
use uuid::Uuid;

/// SbomGenerator service for SBOM metadata and document assembly
///
/// This service contains pure business logic: it never reads files and
/// never reorders packages.
pub struct SbomGenerator;

impl SbomGenerator {
    /// Generates SBOM metadata with current timestamp and unique serial number
    pub fn generate_metadata(tool_name: &str, tool_version: &str) -> SbomMetadata {
        let timestamp = Utc::now().to_rfc3339();
        let serial_number = format!("urn:uuid:{}", Uuid::new_v4());

        SbomMetadata::new(
            timestamp,
            tool_name.to_string(),
            tool_version.to_string(),
            serial_number,
        )
    }

    /// Generates SBOM metadata with default tool information (apk-sbom)
    ///
    /// This uses the compile-time version from Cargo.toml
    pub fn generate_default_metadata() -> SbomMetadata {
        Self::generate_metadata(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }

    /// Combines OS identity and package list into a document
    pub fn assemble(
        metadata: SbomMetadata,
        os: OsIdentity,
        packages: Vec<PackageRecord>,
    ) -> SbomDocument {
        SbomDocument::new(metadata, os, packages)
    }
}
