use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "hcplog";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const MAX_TIMEOUT_SECS: u64 = 600;
pub const DEFAULT_USER_AGENT: &str = "hcplog";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend: BackendKind,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Local,
    Remote,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Local,
            api: ApiConfig {
                base_url: None,
                timeout_secs: DEFAULT_TIMEOUT_SECS,
                user_agent: DEFAULT_USER_AGENT.to_string(),
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid api.base_url value: {0}")]
    InvalidApiUrl(String),
    #[error("invalid api.timeout_secs value: {0}")]
    InvalidTimeout(u64),
    #[error("invalid api.user_agent value")]
    InvalidUserAgent,
    #[error("backend = \"remote\" requires api.base_url")]
    MissingApiUrl,
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    backend: Option<BackendKind>,
    api: Option<ApiFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ApiFile {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    user_agent: Option<String>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path.clone()) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

/// Checks an API base URL supplied outside the config file (for example on
/// the command line).
pub fn validate_api_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let has_scheme = trimmed.starts_with("http://") || trimmed.starts_with("https://");
    let host = trimmed.split_once("://").map(|(_, rest)| rest).unwrap_or("");
    if !has_scheme || host.is_empty() {
        return Err(ConfigError::InvalidApiUrl(raw.to_string()));
    }
    Ok(trimmed.to_string())
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(backend) = parsed.backend {
        config.backend = backend;
    }

    if let Some(api) = parsed.api {
        if let Some(base_url) = api.base_url {
            config.api.base_url = Some(validate_api_url(&base_url)?);
        }
        if let Some(timeout) = api.timeout_secs {
            if timeout == 0 || timeout > MAX_TIMEOUT_SECS {
                return Err(ConfigError::InvalidTimeout(timeout));
            }
            config.api.timeout_secs = timeout;
        }
        if let Some(user_agent) = api.user_agent {
            let trimmed = user_agent.trim();
            if trimmed.is_empty() {
                return Err(ConfigError::InvalidUserAgent);
            }
            config.api.user_agent = trimmed.to_string();
        }
    }

    if config.backend == BackendKind::Remote && config.api.base_url.is_none() {
        return Err(ConfigError::MissingApiUrl);
    }

    Ok(config)
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        load_at_path, merge_config, validate_api_url, ApiFile, BackendKind, ConfigError,
        ConfigFile, DEFAULT_TIMEOUT_SECS,
    };
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn restrict_permissions(path: &Path) {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path).expect("metadata").permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms).expect("chmod");
        }
    }

    #[test]
    fn merge_config_applies_values() {
        let parsed = ConfigFile {
            backend: Some(BackendKind::Remote),
            api: Some(ApiFile {
                base_url: Some("http://localhost:8000/".to_string()),
                timeout_secs: Some(10),
                user_agent: None,
            }),
        };
        let merged = merge_config(parsed).expect("merge");
        assert_eq!(merged.backend, BackendKind::Remote);
        assert_eq!(
            merged.api.base_url.as_deref(),
            Some("http://localhost:8000")
        );
        assert_eq!(merged.api.timeout_secs, 10);
        assert_eq!(merged.api.user_agent, "hcplog");
    }

    #[test]
    fn remote_backend_requires_url() {
        let parsed = ConfigFile {
            backend: Some(BackendKind::Remote),
            api: None,
        };
        let err = merge_config(parsed).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiUrl));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let parsed = ConfigFile {
            backend: None,
            api: Some(ApiFile {
                base_url: None,
                timeout_secs: Some(0),
                user_agent: None,
            }),
        };
        let err = merge_config(parsed).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout(0)));
    }

    #[test]
    fn api_url_needs_http_scheme() {
        assert!(validate_api_url("localhost:8000").is_err());
        assert!(validate_api_url("https://").is_err());
        assert_eq!(
            validate_api_url(" https://api.example.com/ ").unwrap(),
            "https://api.example.com"
        );
    }

    #[test]
    fn load_at_path_requires_file_when_requested() {
        let temp = TempDir::new().expect("tempdir");
        let missing = temp.path().join("config.toml");
        let err = load_at_path(&missing, true).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("config file not found"));
    }

    #[test]
    fn load_at_path_parses_toml() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "backend = \"remote\"\n[api]\nbase_url = \"http://127.0.0.1:8000\"\n",
        )
        .expect("write config");
        restrict_permissions(&path);

        let config = load_at_path(&path, true).expect("load").expect("config");
        assert_eq!(config.backend, BackendKind::Remote);
        assert_eq!(config.api.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn load_at_path_rejects_unknown_fields() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "retention_days = 5\n").expect("write config");
        restrict_permissions(&path);

        let err = load_at_path(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn load_at_path_rejects_world_readable_files() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "backend = \"local\"\n").expect("write config");
        let mut perms = fs::metadata(&path).expect("metadata").permissions();
        perms.set_mode(0o644);
        fs::set_permissions(&path, perms).expect("chmod");

        let err = load_at_path(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::InsecurePermissions(_)));
    }
}
