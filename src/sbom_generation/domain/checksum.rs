//! Checksum codec for the installed-package database.
//!
//! apk stores digests as a two character tag followed by base64 data, for
//! example `Q1Deb0jNytkrjPW4N/eKLZ43BwOlw=`. That encoding must not leak into
//! an SBOM, so every digest leaving this crate is a [`Checksum`] holding the
//! algorithm and a lowercase hexadecimal digest.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced while decoding a compact digest
#[derive(Debug, Error)]
pub enum ChecksumFormatError {
    #[error("Checksum is too short to carry an algorithm tag: {value:?}")]
    MissingTag { value: String },

    #[error("Unrecognized checksum algorithm tag: {tag}")]
    UnknownAlgorithm { tag: String },

    #[error("Checksum is not valid base64")]
    InvalidBase64(#[source] base64::DecodeError),

    #[error("{algorithm} digest must be {expected} bytes, got {actual}")]
    LengthMismatch {
        algorithm: HashAlgorithm,
        expected: usize,
        actual: usize,
    },
}

/// Hash algorithms understood by the codec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    Sha1,
    Sha256,
}

impl HashAlgorithm {
    /// Maps the compact-form tag to an algorithm
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Q1" => Some(HashAlgorithm::Sha1),
            "Q2" => Some(HashAlgorithm::Sha256),
            _ => None,
        }
    }

    /// Raw digest length in bytes
    pub fn digest_len(self) -> usize {
        match self {
            HashAlgorithm::Sha1 => 20,
            HashAlgorithm::Sha256 => 32,
        }
    }

    /// Algorithm name as used in qualified digests (`sha1:...`)
    pub fn as_str(self) -> &'static str {
        match self {
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha256 => "sha256",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A digest in standard form
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Checksum {
    algorithm: HashAlgorithm,
    hex: String,
}

impl Checksum {
    /// Decodes the database's compact form (`<tag><base64>`)
    ///
    /// # Errors
    /// Returns `ChecksumFormatError` for an unknown tag, invalid base64 or a
    /// digest whose length does not match the tagged algorithm.
    pub fn decode(compact: &str) -> Result<Self, ChecksumFormatError> {
        let (tag, encoded) = match (compact.get(..2), compact.get(2..)) {
            (Some(tag), Some(encoded)) => (tag, encoded),
            _ => {
                return Err(ChecksumFormatError::MissingTag {
                    value: compact.to_string(),
                })
            }
        };

        let algorithm =
            HashAlgorithm::from_tag(tag).ok_or_else(|| ChecksumFormatError::UnknownAlgorithm {
                tag: tag.to_string(),
            })?;

        let digest = STANDARD
            .decode(encoded)
            .map_err(ChecksumFormatError::InvalidBase64)?;

        if digest.len() != algorithm.digest_len() {
            return Err(ChecksumFormatError::LengthMismatch {
                algorithm,
                expected: algorithm.digest_len(),
                actual: digest.len(),
            });
        }

        Ok(Self {
            algorithm,
            hex: hex::encode(digest),
        })
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Lowercase hexadecimal digest
    pub fn hex(&self) -> &str {
        &self.hex
    }
}

impl FromStr for Checksum {
    type Err = ChecksumFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.hex)
    }
}
