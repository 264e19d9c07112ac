//! Configuration loader for push-rs
//!
//! Builds `Settings` from layered TOML files, `PUSH_*` variables and the bare
//! credential/proxy variables that notification scripts conventionally export.

use std::path::{Path, PathBuf};

use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

const CONFIG_DIR_ENV: &str = "PUSH_CONFIG_DIR";

const CONFIG_FILE_ENV: &str = "PUSH_CONFIG_FILE";

const DEFAULT_CONFIG_DIR: &str = "config";

const ENV_PREFIX: &str = "PUSH";

const ENV_SEPARATOR: &str = "__";

/// Loads settings with the following precedence (lowest first):
/// 1. `default.toml`
/// 2. `{environment}.toml`
/// 3. `local.toml`
/// 4. `PUSH_*` environment variables
/// 5. Credential and proxy variables (`PUSHPLUS_TOKEN`, `http_proxy`, ...)
///
/// When a single configuration file is selected it replaces steps 1-3.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Creates a loader from `PUSH_CONFIG_DIR`, `PUSH_CONFIG_FILE` and `PUSH_APP_ENV`
    pub fn new() -> Self {
        let config_dir = std::env::var(CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_DIR));

        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        Self {
            config_dir,
            config_file,
            environment: AppEnvironment::from_env(),
        }
    }

    pub fn with_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config_dir = dir.into();
        self
    }

    /// Loads a single file instead of the layered directory
    pub fn with_config_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.config_file = Some(file.into());
        self
    }

    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Loads, overlays process variables, and validates settings
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let mut settings: Settings = config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })?;

        apply_process_overrides(&mut settings, |key| std::env::var(key).ok());

        settings.validate()?;

        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = match self.config_file {
            Some(ref config_file) => self.add_file_source(builder, config_file, true)?,
            None => self.build_layered_config(builder)?,
        };

        // PUSH_CHANNELS__TELEGRAM__CHAT_ID -> channels.telegram.chat_id
        let builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        );

        builder.build().map_err(ConfigError::from)
    }

    fn build_layered_config(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let default_path = self.config_dir.join("default.toml");
        let builder = self.add_file_source(builder, &default_path, false)?;

        let env_path = self
            .config_dir
            .join(format!("{}.toml", self.environment.as_str()));
        let builder = self.add_file_source(builder, &env_path, false)?;

        let local_path = self.config_dir.join("local.toml");
        self.add_file_source(builder, &local_path, false)
    }

    fn add_file_source(
        &self,
        builder: ConfigBuilder<DefaultState>,
        path: &Path,
        required: bool,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        if required && !path.exists() {
            return Err(ConfigError::file_not_found(path.display().to_string()));
        }

        let name = path.to_str().ok_or_else(|| {
            ConfigError::ParseError(format!("Non UTF-8 configuration path: {}", path.display()))
        })?;

        Ok(builder.add_source(File::new(name, FileFormat::Toml).required(required)))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Overlays the conventional credential and proxy variables on `settings`.
///
/// Empty values are ignored. Lower-case proxy names win over upper-case ones.
pub fn apply_process_overrides<F>(settings: &mut Settings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    let channels = &mut settings.channels;
    if let Some(token) = get("PUSHPLUS_TOKEN") {
        channels.pushplus.token = token;
    }
    if let Some(token) = get("TELEGRAM_BOT_TOKEN") {
        channels.telegram.bot_token = token;
    }
    if let Some(chat_id) = get("TELEGRAM_CHAT_ID") {
        channels.telegram.chat_id = chat_id;
    }
    if let Some(spt) = get("WXPUSHER_SPT") {
        channels.wxpusher.spt = spt;
    }
    if let Some(token) = get("MEOW_TOKEN") {
        channels.meow.token = token;
    }

    if let Some(proxy) = get("http_proxy").or_else(|| get("HTTP_PROXY")) {
        settings.proxy.http = Some(proxy);
    }
    if let Some(proxy) = get("https_proxy").or_else(|| get("HTTPS_PROXY")) {
        settings.proxy.https = Some(proxy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Serializes tests that touch process environment variables
    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    fn setup_config_dir(files: &[(&str, &str)]) -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        for (name, content) in files {
            fs::write(temp_dir.path().join(name), content).expect("Failed to write config file");
        }
        temp_dir
    }

    struct EnvGuard {
        vars_to_restore: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        fn new() -> Self {
            Self {
                vars_to_restore: Vec::new(),
            }
        }

        fn set(&mut self, key: &str, value: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::set_var(key, value);
            }
        }

        fn remove(&mut self, key: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::remove_var(key);
            }
        }

        fn clear_push_vars(&mut self) {
            for key in [
                CONFIG_DIR_ENV,
                CONFIG_FILE_ENV,
                AppEnvironment::ENV_VAR,
                "PUSHPLUS_TOKEN",
                "TELEGRAM_BOT_TOKEN",
                "TELEGRAM_CHAT_ID",
                "WXPUSHER_SPT",
                "MEOW_TOKEN",
                "http_proxy",
                "https_proxy",
                "HTTP_PROXY",
                "HTTPS_PROXY",
                "PUSH_RETRY__MAX_ATTEMPTS",
            ] {
                self.remove(key);
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, original_value) in self.vars_to_restore.iter().rev() {
                unsafe {
                    match original_value {
                        Some(value) => std::env::set_var(key, value),
                        None => std::env::remove_var(key),
                    }
                }
            }
        }
    }

    #[test]
    fn test_overrides_fill_credentials() {
        let vars: HashMap<&str, &str> = [
            ("PUSHPLUS_TOKEN", "pp-token"),
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("TELEGRAM_CHAT_ID", "-100200"),
            ("WXPUSHER_SPT", "SPT_xyz"),
            ("MEOW_TOKEN", "meow-token"),
            ("https_proxy", "http://127.0.0.1:7890"),
        ]
        .into_iter()
        .collect();

        let mut settings = Settings::default();
        apply_process_overrides(&mut settings, |k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(settings.channels.pushplus.token, "pp-token");
        assert_eq!(settings.channels.telegram.bot_token, "123:abc");
        assert_eq!(settings.channels.telegram.chat_id, "-100200");
        assert_eq!(settings.channels.wxpusher.spt, "SPT_xyz");
        assert_eq!(settings.channels.meow.token, "meow-token");
        assert_eq!(settings.proxy.https.as_deref(), Some("http://127.0.0.1:7890"));
        assert!(settings.proxy.http.is_none());
    }

    #[test]
    fn test_overrides_ignore_empty_values() {
        let mut settings = Settings::default();
        settings.channels.meow.token = "from-file".to_string();

        apply_process_overrides(&mut settings, |k| {
            (k == "MEOW_TOKEN").then(|| "   ".to_string())
        });

        assert_eq!(settings.channels.meow.token, "from-file");
    }

    #[test]
    fn test_lowercase_proxy_wins() {
        let mut settings = Settings::default();
        apply_process_overrides(&mut settings, |k| match k {
            "http_proxy" => Some("http://lower:1".to_string()),
            "HTTP_PROXY" => Some("http://upper:2".to_string()),
            _ => None,
        });
        assert_eq!(settings.proxy.http.as_deref(), Some("http://lower:1"));
    }

    #[test]
    fn test_schemeless_proxy_env_keeps_settings_usable() {
        let mut settings = Settings::default();
        apply_process_overrides(&mut settings, |k| match k {
            "https_proxy" => Some("127.0.0.1:7890".to_string()),
            "http_proxy" => Some("localhost:7890".to_string()),
            _ => None,
        });

        assert!(settings.validate().is_ok());
        assert!(crate::external::HttpClients::new(&settings.http, &settings.proxy).is_ok());
    }

    #[test]
    fn test_load_without_any_files_uses_defaults() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        env.clear_push_vars();

        let temp_dir = setup_config_dir(&[]);
        let settings = ConfigLoader::new()
            .with_config_dir(temp_dir.path())
            .load()
            .expect("defaults should load");

        let defaults = Settings::default();
        assert_eq!(settings.retry, defaults.retry);
        assert_eq!(settings.channels, defaults.channels);
        assert!(!settings.proxy.is_configured());
    }

    #[test]
    fn test_layered_files_and_env_precedence() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        env.clear_push_vars();

        let temp_dir = setup_config_dir(&[
            (
                "default.toml",
                r#"
[retry]
max_attempts = 4

[channels.pushplus]
token = "default-token"
"#,
            ),
            (
                "production.toml",
                r#"
[channels.pushplus]
token = "prod-token"
"#,
            ),
        ]);

        env.set("PUSH_RETRY__MAX_ATTEMPTS", "2");
        env.set("MEOW_TOKEN", "env-meow");

        let settings = ConfigLoader::new()
            .with_config_dir(temp_dir.path())
            .with_environment(AppEnvironment::Production)
            .load()
            .expect("layered config should load");

        assert_eq!(settings.channels.pushplus.token, "prod-token");
        assert_eq!(settings.retry.max_attempts, 2);
        assert_eq!(settings.channels.meow.token, "env-meow");
    }

    #[test]
    fn test_missing_explicit_file() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        env.clear_push_vars();

        let result = ConfigLoader::new()
            .with_config_file("/definitely/not/here.toml")
            .load();

        assert!(matches!(result, Err(ConfigError::FileNotFound(msg)) if msg.contains("here.toml")));
    }

    #[test]
    fn test_single_file_mode_validates() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        env.clear_push_vars();

        let temp_dir = setup_config_dir(&[(
            "push.toml",
            r#"
[retry]
min_backoff_secs = 10
max_backoff_secs = 5
"#,
        )]);

        let result = ConfigLoader::new()
            .with_config_file(temp_dir.path().join("push.toml"))
            .load();

        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn test_environment_read_from_env() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        env.clear_push_vars();
        env.set(AppEnvironment::ENV_VAR, "prod");
        env.set(CONFIG_DIR_ENV, "/etc/push-rs");

        let loader = ConfigLoader::new();
        assert_eq!(loader.environment(), AppEnvironment::Production);
        assert_eq!(loader.config_dir(), Path::new("/etc/push-rs"));
    }
}
