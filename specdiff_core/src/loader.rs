use specdiff_common::{Result, Spec, SpecDiffError};
use std::path::Path;
use tracing::debug;

/// Check if a file path appears to be JSON based on extension
pub fn is_json_file(path: &Path) -> bool {
    if let Some(ext) = path.extension() {
        let ext = ext.to_string_lossy().to_lowercase();
        matches!(ext.as_str(), "json")
    } else {
        false
    }
}

/// Check if a file path appears to be YAML based on extension
pub fn is_yaml_file(path: &Path) -> bool {
    if let Some(ext) = path.extension() {
        let ext = ext.to_string_lossy().to_lowercase();
        matches!(ext.as_str(), "yaml" | "yml")
    } else {
        false
    }
}

/// Load an API description from a JSON or YAML file.
///
/// The format is picked by extension; files with an unrecognized
/// extension are tried as JSON first and as YAML second.
pub fn load_spec(path: &Path) -> Result<Spec> {
    debug!("Loading API description from {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| {
        SpecDiffError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to read API description '{}': {}", path.display(), e),
        ))
    })?;

    if is_json_file(path) {
        return parse_json(&content, path);
    }
    if is_yaml_file(path) {
        return parse_yaml(&content, path);
    }

    match parse_json(&content, path) {
        Ok(spec) => Ok(spec),
        Err(_) => parse_yaml(&content, path),
    }
}

fn parse_json(content: &str, path: &Path) -> Result<Spec> {
    serde_json::from_str(content).map_err(|e| {
        SpecDiffError::Parse(format!(
            "Failed to parse JSON document '{}': {}",
            path.display(),
            e
        ))
    })
}

fn parse_yaml(content: &str, path: &Path) -> Result<Spec> {
    serde_yml::from_str(content).map_err(|e| {
        SpecDiffError::Parse(format!(
            "Failed to parse YAML document '{}': {}",
            path.display(),
            e
        ))
    })
}
