pub mod os_release;
pub mod package_index;
mod sbom_generator;

pub use os_release::apply_release_data;
pub use package_index::{PackageIndexParser, ParseFailure};
pub use sbom_generator::SbomGenerator;
