//! vr-project: scenario file format and validation.

pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{ValidationError, validate_scenario};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unsupported scenario file extension: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse and validate a scenario from YAML text.
pub fn from_yaml_str(content: &str) -> ProjectResult<Scenario> {
    let scenario: Scenario = serde_yaml::from_str(content)?;
    validate_scenario(&scenario)?;
    Ok(scenario)
}

/// Validate and render a scenario as YAML text.
pub fn to_yaml_string(scenario: &Scenario) -> ProjectResult<String> {
    validate_scenario(scenario)?;
    Ok(serde_yaml::to_string(scenario)?)
}

pub fn load_yaml(path: &std::path::Path) -> ProjectResult<Scenario> {
    let content = std::fs::read_to_string(path)?;
    from_yaml_str(&content)
}

pub fn save_yaml(path: &std::path::Path, scenario: &Scenario) -> ProjectResult<()> {
    let content = to_yaml_string(scenario)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ProjectResult<Scenario> {
    let content = std::fs::read_to_string(path)?;
    let scenario: Scenario = serde_json::from_str(&content)?;
    validate_scenario(&scenario)?;
    Ok(scenario)
}

pub fn save_json(path: &std::path::Path, scenario: &Scenario) -> ProjectResult<()> {
    validate_scenario(scenario)?;
    let content = serde_json::to_string_pretty(scenario)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load by extension: `.json` as JSON, `.yaml`/`.yml` as YAML.
pub fn load(path: &std::path::Path) -> ProjectResult<Scenario> {
    match extension_of(path).as_str() {
        "json" => load_json(path),
        "yaml" | "yml" => load_yaml(path),
        other => Err(ProjectError::UnsupportedFormat {
            extension: other.to_string(),
        }),
    }
}

/// Save by extension, see [`load`].
pub fn save(path: &std::path::Path, scenario: &Scenario) -> ProjectResult<()> {
    match extension_of(path).as_str() {
        "json" => save_json(path, scenario),
        "yaml" | "yml" => save_yaml(path, scenario),
        other => Err(ProjectError::UnsupportedFormat {
            extension: other.to_string(),
        }),
    }
}

fn extension_of(path: &std::path::Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}
