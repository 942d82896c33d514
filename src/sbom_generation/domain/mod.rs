pub mod checksum;
pub mod os_identity;
pub mod package;
pub mod sbom_document;
pub mod sbom_metadata;

pub use checksum::{Checksum, ChecksumFormatError, HashAlgorithm};
pub use os_identity::OsIdentity;
pub use package::{DirectoryEntry, FileEntry, Ownership, PackageRecord};
pub use sbom_document::SbomDocument;
pub use sbom_metadata::SbomMetadata;
