use crate::application::dto::{SbomRequest, SbomResponse};
use crate::shared::Result;

/// SbomGenerationPort - Inbound port for SBOM assembly
///
/// This port defines the interface that external adapters (CLI, build
/// orchestration) use to turn an image root into an SBOM document model.
pub trait SbomGenerationPort {
    /// Reads OS identity and installed packages and assembles the document
    ///
    /// # Errors
    /// Returns an error if:
    /// - The os-release file or the package database cannot be read
    /// - The package database is corrupt
    fn generate_sbom(&self, request: SbomRequest) -> Result<SbomResponse>;
}
