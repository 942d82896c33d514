//! apk-sbom - package metadata extraction for apk-based container images
//!
//! This library reads the OS identity (`os-release`) and the apk installed-package
//! database of an image root and turns them into a normalized package model that
//! SBOM serializers consume. It also provides the command executor used while an
//! image root is assembled (native, root-emulated through proot, or CPU-emulated
//! through qemu-user).
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`sbom_generation`): Pure business logic and domain models
//! - **Application Layer** (`application`): Use cases and application services
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use apk_sbom::prelude::*;
//! use std::path::Path;
//!
//! # fn main() -> Result<()> {
//! let use_case = GenerateSbomUseCase::new(
//!     FileSystemReader::new(),
//!     FileSystemReader::new(),
//!     StderrProgressReporter::new(),
//! );
//!
//! let request = SbomRequest::for_root(Path::new("/var/tmp/rootfs"))?;
//! let response = use_case.execute(request)?;
//!
//! for purl in response.document.purls() {
//!     println!("{}", purl);
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod ports;
pub mod sbom_generation;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::process::{ExecutionMode, Executor, ExecutorConfig};
    pub use crate::application::dto::{SbomRequest, SbomResponse};
    pub use crate::application::use_cases::GenerateSbomUseCase;
    pub use crate::ports::inbound::SbomGenerationPort;
    pub use crate::ports::outbound::{
        CommandRunner, OsReleaseReader, OutputPresenter, PackageIndexReader, ProgressReporter,
    };
    pub use crate::sbom_generation::domain::{
        Checksum, ChecksumFormatError, DirectoryEntry, FileEntry, HashAlgorithm, OsIdentity,
        Ownership, PackageRecord, SbomDocument, SbomMetadata,
    };
    pub use crate::sbom_generation::services::{PackageIndexParser, ParseFailure, SbomGenerator};
    pub use crate::shared::error::SbomError;
    pub use crate::shared::{Result, SbomResult};
}
