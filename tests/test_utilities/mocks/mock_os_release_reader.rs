use apk_sbom::prelude::*;
use std::path::Path;

/// Mock OsReleaseReader that applies canned os-release text
#[allow(dead_code)]
pub struct MockOsReleaseReader {
    content: Option<String>,
}

#[allow(dead_code)]
impl MockOsReleaseReader {
    pub fn new(content: &str) -> Self {
        Self {
            content: Some(content.to_string()),
        }
    }

    /// A reader that behaves as if the file does not exist
    pub fn missing() -> Self {
        Self { content: None }
    }
}

impl OsReleaseReader for MockOsReleaseReader {
    fn read_release_data(&self, target: &mut OsIdentity, path: &Path) -> SbomResult<()> {
        match &self.content {
            Some(content) => {
                apk_sbom::sbom_generation::services::apply_release_data(content, target);
                Ok(())
            }
            None => Err(SbomError::IoError {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file"),
            }),
        }
    }
}
