use serde::Serialize;

/// OsIdentity value object describing the operating system of an image
///
/// Populated from an os-release file. Fields whose key was absent stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OsIdentity {
    /// `ID` key, e.g. `alpine`
    pub id: String,
    /// `NAME` key, e.g. `Alpine Linux`
    pub name: String,
    /// `VERSION_ID` key, e.g. `3.15.0`
    pub version: String,
}

impl OsIdentity {
    pub fn new(id: String, name: String, version: String) -> Self {
        Self { id, name, version }
    }

    /// Distro qualifier used in package URLs (`alpine-3.15.0`)
    pub fn distro_qualifier(&self) -> String {
        match (self.id.is_empty(), self.version.is_empty()) {
            (false, false) => format!("{}-{}", self.id, self.version),
            (false, true) => self.id.clone(),
            _ => String::new(),
        }
    }
}
