//! Merges CLI flags into file/environment configuration
//!
//! CLI flags sit above every other configuration source.

use super::parser::{Cli, Commands};
use crate::config::{ConfigError, ConfigLoader, Settings};

pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Loads the base configuration honoring `--config` and `--env`
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut loader = ConfigLoader::new();
        if let Some(env) = cli.env {
            loader = loader.with_environment(env);
        }
        if let Some(ref path) = cli.config {
            loader = loader.with_config_file(path.clone());
        }

        tracing::debug!(environment = %loader.environment(), "Loading configuration");
        Ok(Self::new(loader.load()?))
    }

    /// Applies CLI overrides and re-validates
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        // A per-command level wins over the global flags
        if let Commands::Send {
            log_level: Some(level),
            ..
        } = &cli.command
        {
            config.logger.level = level.clone().into();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn merge(args: &[&str]) -> Settings {
        let cli = Cli::try_parse_from(args).unwrap();
        ConfigurationMerger::new(Settings::default())
            .merge_cli_args(&cli)
            .unwrap()
    }

    #[test]
    fn test_no_flags_keeps_base_level() {
        let settings = merge(&["push-rs", "check"]);
        assert_eq!(settings.logger.level, Settings::default().logger.level);
    }

    #[test]
    fn test_verbose_flag() {
        assert_eq!(merge(&["push-rs", "--verbose", "check"]).logger.level, "debug");
    }

    #[test]
    fn test_quiet_flag() {
        assert_eq!(merge(&["push-rs", "-q", "check"]).logger.level, "error");
    }

    #[test]
    fn test_command_log_level_overrides_global() {
        let settings = merge(&[
            "push-rs", "--verbose", "send", "-m", "meow", "--log-level", "warn", "hi",
        ]);
        assert_eq!(settings.logger.level, "warn");
    }

    #[test]
    fn test_merge_revalidates() {
        let mut base = Settings::default();
        base.retry.max_attempts = 0;
        let cli = Cli::try_parse_from(["push-rs", "check"]).unwrap();
        assert!(ConfigurationMerger::new(base).merge_cli_args(&cli).is_err());
    }

    #[test]
    fn test_config_accessor() {
        let merger = ConfigurationMerger::new(Settings::default());
        assert_eq!(merger.config().retry.max_attempts, 5);
    }
}
