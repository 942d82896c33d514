use apk_sbom::prelude::*;
use std::path::Path;

/// Mock PackageIndexReader that parses an in-memory database
#[allow(dead_code)]
pub struct MockPackageIndexReader {
    content: String,
}

#[allow(dead_code)]
impl MockPackageIndexReader {
    pub fn new(content: &str) -> Self {
        Self {
            content: content.to_string(),
        }
    }
}

impl PackageIndexReader for MockPackageIndexReader {
    fn read_package_index(&self, path: &Path) -> SbomResult<Vec<PackageRecord>> {
        PackageIndexParser::parse_str(&self.content, path)
    }
}
