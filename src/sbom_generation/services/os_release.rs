use crate::sbom_generation::domain::OsIdentity;

/// Applies the recognized keys of an os-release document to `target`
///
/// Each non-empty line is split on its first `=`; one layer of surrounding
/// double quotes is stripped from the value. `ID`, `NAME` and `VERSION_ID`
/// are mapped, every other key is ignored. Keys absent from `content` leave
/// the matching field of `target` untouched.
pub fn apply_release_data(content: &str, target: &mut OsIdentity) {
    for line in content.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };

        let value = unquote(value);
        match key {
            "ID" => target.id = value.to_string(),
            "NAME" => target.name = value.to_string(),
            "VERSION_ID" => target.version = value.to_string(),
            _ => {}
        }
    }
}

/// Strips one layer of surrounding double quotes
fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
