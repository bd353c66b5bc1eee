//! Merging of configuration sources into [`AppSettings`].
//!
//! # Design
//! - Precedence, lowest first: built-in defaults, the optional JSON config
//!   file, then environment variables.
//! - The daemon's own `settings.json` is consulted last: when it enables a
//!   seed ratio limit, that value replaces whatever the merge produced.
//! - An explicitly named config file must exist; the daemon document is
//!   optional and skipped quietly when unreadable.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::model::{AppSettings, ErrorPolicy};

/// Load settings from the process environment and an optional config file.
///
/// # Errors
///
/// Returns a [`ConfigError`] when the named config file is unreadable or
/// malformed, when a source carries an unparseable value, or when a
/// required field is still absent after the merge.
pub fn load(config_path: Option<&Path>) -> ConfigResult<AppSettings> {
    load_from(config_path, std::env::vars())
}

/// [`load`] with the environment supplied by the caller.
///
/// # Errors
///
/// Same failure modes as [`load`].
pub fn load_from<I>(config_path: Option<&Path>, vars: I) -> ConfigResult<AppSettings>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut settings = AppSettings::default();
    if let Some(path) = config_path {
        apply_file(&mut settings, read_config_file(path)?);
    }
    apply_env(&mut settings, vars)?;
    apply_daemon_ratio(&mut settings);
    validate(&settings)?;
    Ok(settings)
}

/// Subset of [`AppSettings`] accepted from the JSON config file. Absent
/// keys keep the value from lower-precedence sources.
#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    ip_address: Option<String>,
    port: Option<u16>,
    login: Option<String>,
    password: Option<String>,
    ratio_limit: Option<f64>,
    limit_time: Option<u64>,
    allowed_media_extensions: Option<Vec<String>>,
    enforce_media_extensions: Option<bool>,
    error_policy: Option<ErrorPolicy>,
    log_level: Option<String>,
    log_file_path: Option<PathBuf>,
    settings_file_path: Option<PathBuf>,
}

fn read_config_file(path: &Path) -> ConfigResult<FileSettings> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        operation: "read_config_file",
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn apply_file(settings: &mut AppSettings, file: FileSettings) {
    if let Some(ip_address) = file.ip_address {
        settings.ip_address = ip_address;
    }
    if let Some(port) = file.port {
        settings.port = port;
    }
    if let Some(login) = file.login {
        settings.login = login;
    }
    if let Some(password) = file.password {
        settings.password = password;
    }
    if let Some(ratio_limit) = file.ratio_limit {
        settings.ratio_limit = ratio_limit;
    }
    if let Some(limit_time) = file.limit_time {
        settings.limit_time = limit_time;
    }
    if let Some(extensions) = file.allowed_media_extensions {
        settings.allowed_media_extensions = extensions;
    }
    if let Some(enforce) = file.enforce_media_extensions {
        settings.enforce_media_extensions = enforce;
    }
    if let Some(policy) = file.error_policy {
        settings.error_policy = policy;
    }
    if let Some(log_level) = file.log_level {
        settings.log_level = log_level;
    }
    if let Some(log_file_path) = file.log_file_path {
        settings.log_file_path = Some(log_file_path);
    }
    if let Some(settings_file_path) = file.settings_file_path {
        settings.settings_file_path = settings_file_path;
    }
}

fn apply_env<I>(settings: &mut AppSettings, vars: I) -> ConfigResult<()>
where
    I: IntoIterator<Item = (String, String)>,
{
    for (name, value) in vars {
        match name.as_str() {
            "IP_ADDRESS" => settings.ip_address = value,
            "PORT" => settings.port = parse_env(&name, &value, "must be an integer")?,
            "LOGIN" => settings.login = value,
            "PASSWORD" => settings.password = value,
            "RATIO_LIMIT" => settings.ratio_limit = parse_env(&name, &value, "must be a number")?,
            "LIMIT_TIME" => settings.limit_time = parse_env(&name, &value, "must be an integer")?,
            "LOG_LEVEL" => settings.log_level = value,
            "LOG_FILE_PATH" => settings.log_file_path = Some(PathBuf::from(value)),
            "SETTINGS_FILE_PATH" => settings.settings_file_path = PathBuf::from(value),
            "ALLOWED_MEDIA_EXTENSIONS" => {
                settings.allowed_media_extensions = split_extensions(&value);
            }
            "ENFORCE_MEDIA_EXTENSIONS" => {
                settings.enforce_media_extensions = parse_env_flag(&name, &value)?;
            }
            "ERROR_POLICY" => {
                settings.error_policy =
                    parse_env(&name, &value, "must be 'abort' or 'continue'")?;
            }
            _ => {}
        }
    }
    Ok(())
}

fn parse_env<T: FromStr>(name: &str, value: &str, reason: &'static str) -> ConfigResult<T> {
    value.trim().parse().map_err(|_| ConfigError::InvalidField {
        field: name.to_string(),
        value: Some(value.to_string()),
        reason,
    })
}

fn parse_env_flag(name: &str, value: &str) -> ConfigResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidField {
            field: name.to_string(),
            value: Some(value.to_string()),
            reason: "must be 'true' or 'false'",
        }),
    }
}

fn split_extensions(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|extension| !extension.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Replace the merged ratio limit with the daemon's own when the daemon
/// enforces one. A missing or unreadable document leaves the merge alone.
fn apply_daemon_ratio(settings: &mut AppSettings) {
    let path = &settings.settings_file_path;
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            debug!(path = %path.display(), error = %err, "daemon settings not readable");
            return;
        }
    };
    let document: Value = match serde_json::from_str(&raw) {
        Ok(document) => document,
        Err(err) => {
            debug!(path = %path.display(), error = %err, "daemon settings not valid JSON");
            return;
        }
    };
    if document.get("ratio-limit-enabled").and_then(Value::as_bool) != Some(true) {
        debug!(path = %path.display(), "daemon ratio limit disabled");
        return;
    }
    let Some(ratio_limit) = document.get("ratio-limit").and_then(Value::as_f64) else {
        debug!(path = %path.display(), "daemon ratio limit enabled but not numeric");
        return;
    };
    debug!(ratio_limit, "daemon ratio limit adopted");
    settings.ratio_limit = ratio_limit;
}

fn validate(settings: &AppSettings) -> ConfigResult<()> {
    if settings.login.is_empty() {
        return Err(ConfigError::MissingField { field: "login" });
    }
    if settings.password.is_empty() {
        return Err(ConfigError::MissingField { field: "password" });
    }
    if settings.port == 0 {
        return Err(ConfigError::InvalidField {
            field: "port".to_string(),
            value: Some("0".to_string()),
            reason: "must be between 1 and 65535",
        });
    }
    if i64::try_from(settings.limit_time).is_err() {
        return Err(ConfigError::InvalidField {
            field: "limit_time".to_string(),
            value: Some(settings.limit_time.to_string()),
            reason: "must fit within a 64-bit signed range",
        });
    }
    if settings.enforce_media_extensions && settings.allowed_media_extensions.is_empty() {
        return Err(ConfigError::InvalidField {
            field: "allowed_media_extensions".to_string(),
            value: None,
            reason: "must not be empty while enforcement is on",
        });
    }
    Ok(())
}
