//! CLI argument validation functions
//!
//! Custom value parsers for arguments clap cannot check on its own.

use std::fs;
use std::path::PathBuf;

use crate::config::validation::MAX_EXPIRY_MS;

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

/// Validate a notification lifetime in milliseconds
pub fn validate_expiry_ms(value: &str) -> Result<u64, String> {
    let millis: u64 = value.parse().map_err(|_| {
        format!(
            "Expiry must be a whole number of milliseconds, got: '{}'",
            value
        )
    })?;

    if millis == 0 {
        return Err("Expiry must be greater than 0 milliseconds".to_string());
    }

    if millis > MAX_EXPIRY_MS {
        return Err(format!(
            "Expiry cannot exceed {} milliseconds (one hour)",
            MAX_EXPIRY_MS
        ));
    }

    Ok(millis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_validate_expiry_ms() {
        assert_eq!(validate_expiry_ms("5000"), Ok(5000));
        assert_eq!(validate_expiry_ms("1"), Ok(1));
        assert_eq!(validate_expiry_ms("3600000"), Ok(MAX_EXPIRY_MS));
        assert!(validate_expiry_ms("0").is_err());
        assert!(validate_expiry_ms("3600001").is_err());
        assert!(validate_expiry_ms("-5").is_err());
        assert!(validate_expiry_ms("5s").is_err());
    }

    #[test]
    fn test_validate_config_file_path_existing() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        assert_eq!(validate_config_file_path(path), Ok(PathBuf::from(path)));
    }

    #[test]
    fn test_validate_config_file_path_missing() {
        let err = validate_config_file_path("/no/such/config.toml").unwrap_err();
        assert!(err.contains("does not exist"));
    }

    #[test]
    fn test_validate_config_file_path_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = validate_config_file_path(dir.path().to_str().unwrap()).unwrap_err();
        assert!(err.contains("not a file"));
    }
}
