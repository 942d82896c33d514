use crate::sbom_generation::services::ParseFailure;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow build pipelines to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the SBOM model was produced or the command completed
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (file I/O, corrupt database, missing emulator, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for SBOM extraction and command execution.
///
/// None of these are recovered locally. Every variant is returned to the
/// immediate caller, which decides whether to abort the surrounding build.
#[derive(Debug, Error)]
pub enum SbomError {
    #[error("Failed to access: {path}\nDetails: {source}\n\n💡 Hint: Please verify that the path exists and you have the required permissions")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path} at line {line_number}: {reason}\nLine: {line:?}\n\n💡 Hint: The installed package database appears to be corrupt")]
    ParseError {
        path: PathBuf,
        line_number: usize,
        line: String,
        #[source]
        reason: ParseFailure,
    },

    #[error("Invalid configuration: {reason}\n\n💡 Hint: {hint}")]
    ConfigurationError { reason: String, hint: String },

    #[error("Command failed: {command} ({status})")]
    CommandFailed { command: String, status: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}
