use crate::sbom_generation::domain::SbomDocument;

/// SbomResponse - Internal response DTO from SBOM generation use case
///
/// Carries the assembled document model; serializers and presenters
/// decide how it is rendered.
#[derive(Debug, Clone)]
pub struct SbomResponse {
    pub document: SbomDocument,
}

impl SbomResponse {
    pub fn new(document: SbomDocument) -> Self {
        Self { document }
    }

    /// Pretty-printed JSON rendering of the document model
    pub fn to_json(&self) -> crate::shared::Result<String> {
        Ok(serde_json::to_string_pretty(&self.document)?)
    }
}
