use super::checksum::Checksum;
use super::os_identity::OsIdentity;
use serde::Serialize;

/// Default apk permissions when a file carries no `a:` line
const DEFAULT_FILE_MODE: u32 = 0o644;
/// Default apk permissions when a directory carries no `M:` line
const DEFAULT_DIRECTORY_MODE: u32 = 0o755;

/// Owner and permission bits of a filesystem entry (`uid:gid:mode`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ownership {
    pub uid: u32,
    pub gid: u32,
    /// Permission bits, parsed from the octal form in the database
    pub mode: u32,
}

impl Ownership {
    /// Parses a `uid:gid:mode` triple; the mode is octal
    pub fn parse(value: &str) -> Option<Self> {
        let mut parts = value.splitn(3, ':');
        let uid = parts.next()?.parse().ok()?;
        let gid = parts.next()?.parse().ok()?;
        let mode = u32::from_str_radix(parts.next()?, 8).ok()?;
        Some(Self { uid, gid, mode })
    }

    fn root(mode: u32) -> Self {
        Self { uid: 0, gid: 0, mode }
    }
}

/// A directory owned by a package (`F:` line)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryEntry {
    /// Path relative to the image root, without a leading slash
    pub path: String,
    pub owner_uid: u32,
    pub owner_gid: u32,
    pub mode: u32,
}

impl DirectoryEntry {
    pub fn new(path: String) -> Self {
        let ownership = Ownership::root(DEFAULT_DIRECTORY_MODE);
        Self {
            path,
            owner_uid: ownership.uid,
            owner_gid: ownership.gid,
            mode: ownership.mode,
        }
    }

    pub fn set_ownership(&mut self, ownership: Ownership) {
        self.owner_uid = ownership.uid;
        self.owner_gid = ownership.gid;
        self.mode = ownership.mode;
    }
}

/// A file installed by a package (`R:` line and its `a:`/`Z:` lines)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    /// Path relative to the image root (`lib/ld-musl-x86_64.so.1`)
    pub path: String,
    pub owner_uid: u32,
    pub owner_gid: u32,
    pub mode: u32,
    pub checksum: Option<Checksum>,
}

impl FileEntry {
    /// Creates a file entry inside `directory` with apk's default ownership
    pub fn new(directory: &str, name: &str) -> Self {
        let path = if directory.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", directory.trim_end_matches('/'), name)
        };
        let ownership = Ownership::root(DEFAULT_FILE_MODE);
        Self {
            path,
            owner_uid: ownership.uid,
            owner_gid: ownership.gid,
            mode: ownership.mode,
            checksum: None,
        }
    }

    pub fn set_ownership(&mut self, ownership: Ownership) {
        self.owner_uid = ownership.uid;
        self.owner_gid = ownership.gid;
        self.mode = ownership.mode;
    }
}

/// One entry of the installed-package database, normalized for SBOM generation
///
/// Records are only produced by the package index parser, which guarantees
/// that `name` and `version` are non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PackageRecord {
    pub name: String,
    pub version: String,
    pub architecture: String,

    pub description: String,
    pub url: String,
    pub license: String,
    pub origin: String,
    pub maintainer: String,

    /// Bytes on disk once installed
    pub installed_size: u64,
    /// Bytes of the .apk archive
    pub compressed_size: u64,

    /// Seconds since the Unix epoch
    pub build_timestamp: u64,
    pub commit_hash: String,

    pub dependencies: Vec<String>,
    pub provides: Vec<String>,
    pub replaces: Vec<String>,
    pub install_if: Vec<String>,
    pub provider_priority: Option<u32>,
    pub replaces_priority: Option<u32>,

    pub checksum: Option<Checksum>,

    pub directories: Vec<DirectoryEntry>,
    pub files: Vec<FileEntry>,
}

impl PackageRecord {
    /// Package URL for this record, qualified by the image's OS identity
    ///
    /// `pkg:apk/alpine/musl@1.2.2-r7?arch=x86_64&distro=alpine-3.15.0`
    pub fn purl(&self, os: &OsIdentity) -> String {
        let mut purl = String::from("pkg:apk/");
        if !os.id.is_empty() {
            purl.push_str(&urlencoding::encode(&os.id));
            purl.push('/');
        }
        purl.push_str(&urlencoding::encode(&self.name));
        purl.push('@');
        purl.push_str(&urlencoding::encode(&self.version));

        let mut qualifiers = Vec::new();
        if !self.architecture.is_empty() {
            qualifiers.push(format!("arch={}", urlencoding::encode(&self.architecture)));
        }
        let distro = os.distro_qualifier();
        if !distro.is_empty() {
            qualifiers.push(format!("distro={}", urlencoding::encode(&distro)));
        }
        if !qualifiers.is_empty() {
            purl.push('?');
            purl.push_str(&qualifiers.join("&"));
        }

        purl
    }
}
