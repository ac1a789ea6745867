//! Reading sidebar definitions from disk.

use std::fs;
use std::path::Path;

use serde_json::Value;

/// Errors that can occur when reading a sidebars file.
#[derive(Debug, thiserror::Error)]
pub enum SidebarFileError {
    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error("Invalid JSON in {path}: {message}")]
    Json { path: String, message: String },

    #[error("Invalid YAML in {path}: {message}")]
    Yaml { path: String, message: String },

    #[error("Unsupported sidebars format: {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),
}

/// Read a sidebars file into its raw, unvalidated form.
pub fn read_sidebars(path: &Path) -> Result<Value, SidebarFileError> {
    let display = path.display().to_string();
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    if !matches!(ext, "json" | "yaml" | "yml") {
        return Err(SidebarFileError::UnsupportedFormat(display));
    }

    let content = fs::read_to_string(path).map_err(|e| SidebarFileError::Io {
        path: display.clone(),
        message: e.to_string(),
    })?;

    parse_sidebars(&content, ext).map_err(|message| {
        if ext == "json" {
            SidebarFileError::Json {
                path: display,
                message,
            }
        } else {
            SidebarFileError::Yaml {
                path: display,
                message,
            }
        }
    })
}

fn parse_sidebars(content: &str, ext: &str) -> Result<Value, String> {
    if ext == "json" {
        serde_json::from_str(content).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    }
}
