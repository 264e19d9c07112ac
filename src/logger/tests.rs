//! Tests for the logger module

use crate::logger::config::*;
use crate::logger::open_log_file;
use std::io::Write;
use std::path::PathBuf;

#[cfg(test)]
mod config_tests {
    use super::*;

    fn create_test_config() -> LoggerConfig {
        LoggerConfig {
            console: ConsoleConfig {
                enabled: true,
                colored: false,
            },
            file: FileConfig {
                enabled: false,
                path: PathBuf::from("test.log"),
                append: true,
                format: LogFormat::Full,
            },
            level: "info".to_string(),
        }
    }

    #[test]
    fn test_default_config_creation() {
        let config = LoggerConfig::default();
        assert!(config.console.enabled);
        assert!(!config.file.enabled);
        assert_eq!(config.file.format, LogFormat::Json);
        assert_eq!(config.level, "info");
    }

    #[test]
    fn test_config_validation() {
        let mut config = create_test_config();
        assert!(config.validate().is_ok());

        config.console.enabled = false;
        config.file.enabled = false;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_level_must_be_bare_level() {
        let mut config = create_test_config();
        config.level = "WARN".to_string();
        assert!(config.validate().is_ok());

        config.level = "push_rs=debug".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_enabled_file_requires_path() {
        let mut config = create_test_config();
        config.file.enabled = true;
        config.file.path = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert!("yaml".parse::<LogFormat>().is_err());
        assert_eq!(LogFormat::default().as_str(), "full");
    }
}

#[cfg(test)]
mod file_tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/push.log");
        let config = FileConfig::new(true, path.clone(), true, LogFormat::Json);

        let mut file = open_log_file(&config).unwrap();
        writeln!(file, "line").unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_truncate_when_not_appending() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("push.log");
        std::fs::write(&path, "old contents\n").unwrap();

        let config = FileConfig::new(true, path.clone(), false, LogFormat::Full);
        drop(open_log_file(&config).unwrap());

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_append_keeps_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("push.log");
        std::fs::write(&path, "first\n").unwrap();

        let config = FileConfig::new(true, path.clone(), true, LogFormat::Full);
        let mut file = open_log_file(&config).unwrap();
        writeln!(file, "second").unwrap();
        drop(file);

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_level_parse_is_case_insensitive(
            level in prop::sample::select(vec!["trace", "debug", "info", "warn", "error"]),
            upper in any::<bool>(),
        ) {
            let level = if upper { level.to_uppercase() } else { level.to_string() };
            let config = LoggerConfig { level, ..Default::default() };
            prop_assert!(config.parse_level().is_ok());
        }
    }
}
