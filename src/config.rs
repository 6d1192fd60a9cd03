use crate::opts;
use directories::UserDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the configuration file, looked up in the home directory
/// unless `--conf-file` overrides the full path.
pub const DEFAULT_CONF_FILE: &str = ".ovh-dynhost.conf";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("Config file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("No {0} given on the command line or in the config file")]
    Missing(&'static str),
}

/// The optional on-disk overrides. Only consulted for fields that were not
/// supplied on the command line, and never written back.
#[derive(Deserialize, Debug, Default)]
pub struct FileConfig {
    pub hostname: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// The fully resolved configuration. All fields are guaranteed non-empty.
#[derive(Debug, PartialEq, Eq)]
pub struct Config {
    pub hostname: String,
    pub username: String,
    pub password: String,
}

pub fn config_path(opts: &opts::Opts) -> PathBuf {
    opts.conf_file.as_ref().map(PathBuf::from).unwrap_or_else(|| {
        UserDirs::new()
            .map(|dirs| dirs.home_dir().join(DEFAULT_CONF_FILE))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONF_FILE))
    })
}

pub fn load_config(opts: &opts::Opts) -> Result<Config, ConfigError> {
    let path = config_path(opts);
    let file_config = read_file_config(&path)?;
    merge(opts, file_config)
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    if !path.exists() {
        tracing::warn!("No config file found at {}", path.display());
        return Ok(FileConfig::default());
    }
    let contents = fs::read_to_string(path)?;
    let config = serde_json::from_str(&contents)?;
    Ok(config)
}

/// Merges the command line arguments with the file overrides. Command line
/// values always win; the file only fills in fields left unset.
fn merge(opts: &opts::Opts, file: FileConfig) -> Result<Config, ConfigError> {
    Ok(Config {
        hostname: pick(&opts.hostname, file.hostname, "hostname")?,
        username: pick(&opts.username, file.username, "username")?,
        password: pick(&opts.password, file.password, "password")?,
    })
}

fn pick(
    cli: &Option<String>,
    file: Option<String>,
    field: &'static str,
) -> Result<String, ConfigError> {
    cli.clone()
        .or(file)
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::Missing(field))
}

#[cfg(test)]
mod tests {
    use std::env::temp_dir;
    use std::fs;

    use crate::{config, opts::Opts};

    use super::ConfigError;

    fn write_conf(name: &str, contents: &str) -> String {
        let temp = temp_dir().join("ovh-dynhost-test");
        fs::create_dir_all(&temp).expect("Failed to create test dir");
        let path = temp.join(name);
        fs::write(&path, contents).expect("Failed to write test config file");
        path.to_string_lossy().to_string()
    }

    #[test]
    fn cli_args_override_file_values() {
        let conf_file = write_conf(
            "precedence.conf",
            r#"{"hostname": "file.example.com", "username": "bob", "password": "p"}"#,
        );
        let opts = Opts {
            username: Some("alice".to_string()),
            conf_file: Some(conf_file),
            ..Opts::default()
        };

        let conf = config::load_config(&opts).expect("Failed to load config");
        assert_eq!(conf.hostname, "file.example.com");
        assert_eq!(conf.username, "alice");
        assert_eq!(conf.password, "p");
    }

    #[test]
    fn missing_file_keeps_cli_values() {
        let opts = Opts {
            hostname: Some("h.example.com".to_string()),
            username: Some("u".to_string()),
            password: Some("p".to_string()),
            conf_file: Some(
                temp_dir()
                    .join("ovh-dynhost-test")
                    .join("does-not-exist.conf")
                    .to_string_lossy()
                    .to_string(),
            ),
            ..Opts::default()
        };

        let conf = config::load_config(&opts).expect("Failed to load config");
        assert_eq!(conf.hostname, "h.example.com");
        assert_eq!(conf.username, "u");
        assert_eq!(conf.password, "p");
    }

    #[test]
    fn invalid_json_is_an_error() {
        let conf_file = write_conf("invalid.conf", "hostname = not json");
        let opts = Opts {
            hostname: Some("h.example.com".to_string()),
            username: Some("u".to_string()),
            password: Some("p".to_string()),
            conf_file: Some(conf_file),
            ..Opts::default()
        };

        let error = config::load_config(&opts).expect_err("Invalid JSON should not load");
        assert!(matches!(error, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_credential_after_merge_is_an_error() {
        let conf_file = write_conf("no-password.conf", r#"{"username": "bob"}"#);
        let opts = Opts {
            hostname: Some("h.example.com".to_string()),
            conf_file: Some(conf_file),
            ..Opts::default()
        };

        let error = config::load_config(&opts).expect_err("Missing password should not resolve");
        assert!(matches!(error, ConfigError::Missing("password")));
    }

    #[test]
    fn missing_file_and_missing_credential_is_an_error() {
        let opts = Opts {
            hostname: Some("h.example.com".to_string()),
            username: Some("u".to_string()),
            conf_file: Some(
                temp_dir()
                    .join("ovh-dynhost-test")
                    .join("also-does-not-exist.conf")
                    .to_string_lossy()
                    .to_string(),
            ),
            ..Opts::default()
        };

        let error = config::load_config(&opts).expect_err("Missing password should not resolve");
        assert!(matches!(error, ConfigError::Missing("password")));
    }

    #[test]
    fn empty_field_counts_as_missing() {
        let conf_file = write_conf("empty-username.conf", r#"{"username": ""}"#);
        let opts = Opts {
            hostname: Some("h.example.com".to_string()),
            password: Some("p".to_string()),
            conf_file: Some(conf_file),
            ..Opts::default()
        };

        let error = config::load_config(&opts).expect_err("Empty username should not resolve");
        assert!(matches!(error, ConfigError::Missing("username")));
    }
}
