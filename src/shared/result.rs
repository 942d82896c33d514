use crate::shared::error::SbomError;

/// Type alias for Result with anyhow::Error as the error type.
/// Used by the application layer and the binary.
pub type Result<T> = std::result::Result<T, anyhow::Error>;

/// Result carrying the typed error taxonomy, returned by the readers and the executor.
pub type SbomResult<T> = std::result::Result<T, SbomError>;
