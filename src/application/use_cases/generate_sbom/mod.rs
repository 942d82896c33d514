use crate::application::dto::{SbomRequest, SbomResponse};
use crate::ports::inbound::SbomGenerationPort;
use crate::ports::outbound::{OsReleaseReader, PackageIndexReader, ProgressReporter};
use crate::sbom_generation::domain::{OsIdentity, PackageRecord, SbomMetadata};
use crate::sbom_generation::services::SbomGenerator;
use crate::shared::Result;
use anyhow::Context;

/// GenerateSbomUseCase - Core use case for SBOM assembly
///
/// Reads the OS identity and the installed-package index of one image and
/// combines them into an `SbomDocument`. Package order is the database order.
///
/// # Type Parameters
/// * `OR` - OsReleaseReader implementation
/// * `PIR` - PackageIndexReader implementation
/// * `PR` - ProgressReporter implementation
pub struct GenerateSbomUseCase<OR, PIR, PR> {
    os_release_reader: OR,
    package_index_reader: PIR,
    progress_reporter: PR,
    metadata: Option<SbomMetadata>,
}

impl<OR, PIR, PR> GenerateSbomUseCase<OR, PIR, PR>
where
    OR: OsReleaseReader,
    PIR: PackageIndexReader,
    PR: ProgressReporter,
{
    /// Creates a new GenerateSbomUseCase with injected dependencies
    pub fn new(os_release_reader: OR, package_index_reader: PIR, progress_reporter: PR) -> Self {
        Self {
            os_release_reader,
            package_index_reader,
            progress_reporter,
            metadata: None,
        }
    }

    /// Uses fixed metadata instead of generating a timestamp and serial
    pub fn with_metadata(mut self, metadata: SbomMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Executes the SBOM generation use case
    ///
    /// # Arguments
    /// * `request` - Locations of the os-release file and the package database
    ///
    /// # Returns
    /// SbomResponse containing the assembled document
    pub fn execute(&self, request: SbomRequest) -> Result<SbomResponse> {
        // Step 1: OS identity
        let os = self.read_os_identity(&request)?;

        // Step 2: Installed packages
        let packages = self.read_packages(&request)?;

        // Step 3: Assemble
        let metadata = self
            .metadata
            .clone()
            .unwrap_or_else(SbomGenerator::generate_default_metadata);
        let document = SbomGenerator::assemble(metadata, os, packages);

        self.progress_reporter.report_completion(&format!(
            "✅ SBOM model ready: {} package(s), {} file(s)",
            document.packages().len(),
            document.file_count()
        ));

        Ok(SbomResponse::new(document))
    }

    fn read_os_identity(&self, request: &SbomRequest) -> Result<OsIdentity> {
        self.progress_reporter.report(&format!(
            "📖 Reading OS identity from: {}",
            request.os_release_path.display()
        ));

        let mut os = OsIdentity::default();
        self.os_release_reader
            .read_release_data(&mut os, &request.os_release_path)
            .context("Failed to read OS identity")?;

        if os.id.is_empty() {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: {} does not define ID; package URLs will carry no namespace",
                request.os_release_path.display()
            ));
        }

        Ok(os)
    }

    fn read_packages(&self, request: &SbomRequest) -> Result<Vec<PackageRecord>> {
        self.progress_reporter.report(&format!(
            "📖 Loading installed package database from: {}",
            request.installed_db_path.display()
        ));

        let packages = self
            .package_index_reader
            .read_package_index(&request.installed_db_path)
            .context("Failed to read installed package database")?;

        self.progress_reporter
            .report(&format!("✅ Detected {} package(s)", packages.len()));

        Ok(packages)
    }
}

impl<OR, PIR, PR> SbomGenerationPort for GenerateSbomUseCase<OR, PIR, PR>
where
    OR: OsReleaseReader,
    PIR: PackageIndexReader,
    PR: ProgressReporter,
{
    fn generate_sbom(&self, request: SbomRequest) -> Result<SbomResponse> {
        self.execute(request)
    }
}
