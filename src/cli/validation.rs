//! CLI argument validation functions

use std::fs;
use std::path::PathBuf;

use reqwest::Url;

/// Validate that a file path is accessible (exists and is readable)
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{}'", path_str));
    }

    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{}'", path_str));
    }

    match fs::File::open(&path) {
        Ok(_) => Ok(path),
        Err(e) => Err(format!("Cannot read configuration file '{}': {}", path_str, e)),
    }
}

/// Message content must contain something besides whitespace
pub fn validate_content(content: &str) -> Result<String, String> {
    if content.trim().is_empty() {
        return Err("Message content cannot be empty".to_string());
    }
    Ok(content.to_string())
}

/// Links must be absolute http(s) URLs
pub fn validate_link(link: &str) -> Result<String, String> {
    let url = Url::parse(link).map_err(|e| format!("Invalid link '{}': {}", link, e))?;
    match url.scheme() {
        "http" | "https" => Ok(link.to_string()),
        other => Err(format!("Link must use http or https, got '{}'", other)),
    }
}
