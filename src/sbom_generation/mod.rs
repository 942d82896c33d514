/// Domain layer - package model, checksum codec and the pure parsers
///
/// Nothing in this layer touches the filesystem; parsers work on strings
/// and `BufRead` sources handed to them by the adapters.
pub mod domain;
pub mod services;
