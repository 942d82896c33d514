//! Parser for apk's installed-package database (`lib/apk/db/installed`).
//!
//! The database is a sequence of records separated by blank lines. Every
//! other line has the shape `<prefix>:<value>` where the single prefix
//! character selects the field. The parser is strict: an unrecognized line
//! or prefix anywhere fails the whole read, and no partial list is returned.
//!
//! Parsing is an explicit state machine:
//!
//! ```text
//!            field line                 R:
//! NoRecord ─────────────▶ InRecord ─────────────▶ InFileEntry
//!    ▲                      │  ▲   F:/other field     │  │ R: (next file)
//!    │      blank line      │  └──────────────────────┘  └───▶ InFileEntry
//!    └──────────────────────┴─────────────────────────────────┘
//! ```
//!
//! `Z:` attaches to the current file entry in `InFileEntry`, and to the
//! package itself in `InRecord`.

use crate::sbom_generation::domain::{
    Checksum, ChecksumFormatError, DirectoryEntry, FileEntry, Ownership, PackageRecord,
};
use crate::shared::error::SbomError;
use crate::shared::SbomResult;
use std::io::BufRead;
use std::num::ParseIntError;
use std::path::Path;
use thiserror::Error;

/// Why a database line or record was rejected
#[derive(Debug, Error)]
pub enum ParseFailure {
    #[error("line is not of the form <prefix>:<value>")]
    MalformedLine,

    #[error("line is not valid UTF-8")]
    InvalidUtf8,

    #[error("unknown field prefix '{0}'")]
    UnknownField(char),

    #[error("invalid integer in '{field}' field")]
    InvalidNumber {
        field: char,
        #[source]
        source: ParseIntError,
    },

    #[error("invalid ownership triple in '{0}' field, expected uid:gid:mode")]
    InvalidOwnership(char),

    #[error("'{field}' line must follow {expected}")]
    OutOfOrder {
        field: char,
        expected: &'static str,
    },

    #[error("duplicate '{0}' field")]
    DuplicateField(char),

    #[error("invalid checksum")]
    InvalidChecksum(#[source] ChecksumFormatError),

    #[error("record is missing required field '{0}'")]
    MissingField(char),
}

/// A record being accumulated, plus where it started for diagnostics
#[derive(Debug)]
struct RecordInProgress {
    record: PackageRecord,
    /// Index into `record.directories` of the last `F:` line
    directory: Option<usize>,
    /// Single-valued fields already set in this record
    seen: Vec<char>,
    first_line_number: usize,
    first_line: String,
}

impl RecordInProgress {
    fn new(line_number: usize, line: &str) -> Self {
        Self {
            record: PackageRecord::default(),
            directory: None,
            seen: Vec::new(),
            first_line_number: line_number,
            first_line: line.to_string(),
        }
    }

    fn current_directory(&self) -> Option<&DirectoryEntry> {
        self.directory.and_then(|i| self.record.directories.get(i))
    }
}

/// A file entry being accumulated
#[derive(Debug)]
struct FileInProgress {
    entry: FileEntry,
    has_ownership: bool,
}

#[derive(Debug)]
enum ParserState {
    NoRecord,
    InRecord(RecordInProgress),
    InFileEntry(RecordInProgress, FileInProgress),
}

/// A failure before it is tied to a file path
#[derive(Debug)]
struct LineError {
    line_number: usize,
    line: String,
    reason: ParseFailure,
}

/// Streaming parser for the installed-package database
#[derive(Debug)]
pub struct PackageIndexParser {
    state: ParserState,
    records: Vec<PackageRecord>,
}

impl Default for PackageIndexParser {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageIndexParser {
    pub fn new() -> Self {
        Self {
            state: ParserState::NoRecord,
            records: Vec::new(),
        }
    }

    /// Parses a whole database from `reader`
    ///
    /// `source` is only used to label errors.
    ///
    /// # Errors
    /// - `IoError` if reading from `reader` fails
    /// - `ParseError` for the first malformed line or invalid record; no
    ///   records are returned in that case
    pub fn parse<R: BufRead>(reader: R, source: &Path) -> SbomResult<Vec<PackageRecord>> {
        let to_parse_error = |e: LineError| SbomError::ParseError {
            path: source.to_path_buf(),
            line_number: e.line_number,
            line: e.line,
            reason: e.reason,
        };

        let mut parser = Self::new();
        let mut line_number = 0;

        for raw in reader.split(b'\n') {
            let mut raw = raw.map_err(|e| SbomError::IoError {
                path: source.to_path_buf(),
                source: e,
            })?;
            line_number += 1;

            if raw.last() == Some(&b'\r') {
                raw.pop();
            }
            let line = String::from_utf8(raw).map_err(|e| LineError {
                line_number,
                line: String::from_utf8_lossy(e.as_bytes()).into_owned(),
                reason: ParseFailure::InvalidUtf8,
            });
            let line = line.map_err(to_parse_error)?;

            parser
                .feed_line(line_number, &line)
                .map_err(to_parse_error)?;
        }

        let records = parser.finish().map_err(to_parse_error)?;
        tracing::debug!(
            "Parsed {} package record(s) from {}",
            records.len(),
            source.display()
        );
        Ok(records)
    }

    /// Parses a database held in memory
    pub fn parse_str(content: &str, source: &Path) -> SbomResult<Vec<PackageRecord>> {
        Self::parse(content.as_bytes(), source)
    }

    /// Advances the state machine by one line
    fn feed_line(&mut self, line_number: usize, line: &str) -> Result<(), LineError> {
        let fail = |reason: ParseFailure| LineError {
            line_number,
            line: line.to_string(),
            reason,
        };

        let state = std::mem::replace(&mut self.state, ParserState::NoRecord);

        if line.trim().is_empty() {
            // Consecutive blank lines are a no-op.
            if let Some(record) = Self::close_record(state)? {
                self.records.push(record);
            }
            return Ok(());
        }

        let (prefix, value) = split_field(line).ok_or_else(|| fail(ParseFailure::MalformedLine))?;

        let (record, file) = match state {
            ParserState::NoRecord => (RecordInProgress::new(line_number, line), None),
            ParserState::InRecord(record) => (record, None),
            ParserState::InFileEntry(record, file) => (record, Some(file)),
        };

        self.state = Self::apply_field(record, file, prefix, value).map_err(fail)?;
        Ok(())
    }

    /// Finalizes a trailing record not followed by a blank line
    fn finish(mut self) -> Result<Vec<PackageRecord>, LineError> {
        let state = std::mem::replace(&mut self.state, ParserState::NoRecord);
        if let Some(record) = Self::close_record(state)? {
            self.records.push(record);
        }
        Ok(self.records)
    }

    /// Flushes any open file entry and validates the record
    fn close_record(state: ParserState) -> Result<Option<PackageRecord>, LineError> {
        let mut in_progress = match state {
            ParserState::NoRecord => return Ok(None),
            ParserState::InRecord(record) => record,
            ParserState::InFileEntry(mut record, file) => {
                record.record.files.push(file.entry);
                record
            }
        };

        let missing = if in_progress.record.name.is_empty() {
            Some('P')
        } else if in_progress.record.version.is_empty() {
            Some('V')
        } else {
            None
        };

        if let Some(field) = missing {
            return Err(LineError {
                line_number: in_progress.first_line_number,
                line: std::mem::take(&mut in_progress.first_line),
                reason: ParseFailure::MissingField(field),
            });
        }

        Ok(Some(in_progress.record))
    }

    /// Applies one field to the open record and, if any, its open file entry
    fn apply_field(
        mut record: RecordInProgress,
        file: Option<FileInProgress>,
        prefix: char,
        value: &str,
    ) -> Result<ParserState, ParseFailure> {
        match (file, prefix) {
            (Some(mut file), 'a') => {
                if file.has_ownership || file.entry.checksum.is_some() {
                    return Err(ParseFailure::OutOfOrder {
                        field: 'a',
                        expected: "its file path line",
                    });
                }
                let ownership =
                    Ownership::parse(value).ok_or(ParseFailure::InvalidOwnership('a'))?;
                file.entry.set_ownership(ownership);
                file.has_ownership = true;
                Ok(ParserState::InFileEntry(record, file))
            }
            (Some(mut file), 'Z') => {
                if file.entry.checksum.is_some() {
                    return Err(ParseFailure::DuplicateField('Z'));
                }
                file.entry.checksum = Some(decode_checksum(value)?);
                Ok(ParserState::InFileEntry(record, file))
            }
            (Some(_), 'M') => Err(ParseFailure::OutOfOrder {
                field: 'M',
                expected: "its directory line",
            }),
            (Some(file), field) => {
                record.record.files.push(file.entry);
                Self::apply_field(record, None, field, value)
            }
            (None, 'R') => Self::open_file(record, value),
            (None, 'a') => Err(ParseFailure::OutOfOrder {
                field: 'a',
                expected: "a file path line",
            }),
            (None, field) => {
                apply_record_field(&mut record, field, value)?;
                Ok(ParserState::InRecord(record))
            }
        }
    }

    /// Opens a file entry in the current directory group
    fn open_file(record: RecordInProgress, name: &str) -> Result<ParserState, ParseFailure> {
        let directory = record
            .current_directory()
            .ok_or(ParseFailure::OutOfOrder {
                field: 'R',
                expected: "a directory line",
            })?;
        let entry = FileEntry::new(&directory.path, name);
        Ok(ParserState::InFileEntry(
            record,
            FileInProgress {
                entry,
                has_ownership: false,
            },
        ))
    }
}

/// Fields that may appear at most once per record
const SINGLE_VALUED: &str = "PVASITULomtckq";

/// Applies a package-level field (anything that is not a file line)
fn apply_record_field(
    in_progress: &mut RecordInProgress,
    prefix: char,
    value: &str,
) -> Result<(), ParseFailure> {
    if SINGLE_VALUED.contains(prefix) {
        if in_progress.seen.contains(&prefix) {
            return Err(ParseFailure::DuplicateField(prefix));
        }
        in_progress.seen.push(prefix);
    }

    let record = &mut in_progress.record;
    match prefix {
        'P' => record.name = value.to_string(),
        'V' => record.version = value.to_string(),
        'A' => record.architecture = value.to_string(),
        'S' => record.compressed_size = parse_number(prefix, value)?,
        'I' => record.installed_size = parse_number(prefix, value)?,
        'T' => record.description = value.to_string(),
        'U' => record.url = value.to_string(),
        'L' => record.license = value.to_string(),
        'o' => record.origin = value.to_string(),
        'm' => record.maintainer = value.to_string(),
        't' => record.build_timestamp = parse_number(prefix, value)?,
        'c' => record.commit_hash = value.to_string(),
        'k' => record.provider_priority = Some(parse_number(prefix, value)?),
        'q' => record.replaces_priority = Some(parse_number(prefix, value)?),
        'D' => extend_tokens(&mut record.dependencies, value),
        'p' => extend_tokens(&mut record.provides, value),
        'r' => extend_tokens(&mut record.replaces, value),
        'i' => extend_tokens(&mut record.install_if, value),
        // Once a file exists, a digest belongs to the latest one, even after
        // a later directory line closed it.
        'Z' if !record.files.is_empty() => {
            let checksum = decode_checksum(value)?;
            if let Some(last) = record.files.last_mut() {
                if last.checksum.is_some() {
                    return Err(ParseFailure::DuplicateField('Z'));
                }
                last.checksum = Some(checksum);
            }
        }
        'C' | 'Z' => {
            if record.checksum.is_some() {
                return Err(ParseFailure::DuplicateField(prefix));
            }
            record.checksum = Some(decode_checksum(value)?);
        }
        'F' => {
            record.directories.push(DirectoryEntry::new(value.to_string()));
            in_progress.directory = Some(record.directories.len() - 1);
        }
        'M' => {
            let directory = in_progress
                .directory
                .and_then(|i| record.directories.get_mut(i))
                .ok_or(ParseFailure::OutOfOrder {
                    field: 'M',
                    expected: "a directory line",
                })?;
            let ownership = Ownership::parse(value).ok_or(ParseFailure::InvalidOwnership('M'))?;
            directory.set_ownership(ownership);
        }
        other => return Err(ParseFailure::UnknownField(other)),
    }
    Ok(())
}

/// Splits `<prefix>:<value>`; `None` if the line does not have that shape
fn split_field(line: &str) -> Option<(char, &str)> {
    let mut chars = line.chars();
    let prefix = chars.next()?;
    if chars.next()? != ':' {
        return None;
    }
    Some((prefix, &line[prefix.len_utf8() + 1..]))
}

fn extend_tokens(target: &mut Vec<String>, value: &str) {
    target.extend(value.split_whitespace().map(str::to_string));
}

fn parse_number<T>(field: char, value: &str) -> Result<T, ParseFailure>
where
    T: std::str::FromStr<Err = ParseIntError>,
{
    value
        .trim()
        .parse()
        .map_err(|source| ParseFailure::InvalidNumber { field, source })
}

fn decode_checksum(value: &str) -> Result<Checksum, ParseFailure> {
    Checksum::decode(value).map_err(ParseFailure::InvalidChecksum)
}
