//! Database connection settings.
//!
//! Mode selection follows a single environment signal: a non-empty
//! `DB_HOST` means TCP, anything else means a Cloud SQL style Unix
//! socket directory. TCP mode falls back per-field to a local TOML
//! config file; socket mode reads the environment only, and a missing
//! variable yields a malformed target that fails on the first query.

use std::env;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Socket directory used when `DB_SOCKET_PATH` is unset.
const DEFAULT_SOCKET_DIR: &str = "/cloudsql";

/// Fallback connection values for TCP mode, read from a local TOML file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocalConfig {
    pub user: String,
    pub password: String,
    pub database: String,
    pub host: String,
    pub port: u16,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            user: "postgres".to_string(),
            password: "postgres".to_string(),
            database: "parkscout".to_string(),
            host: "localhost".to_string(),
            port: 5432,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

impl LocalConfig {
    /// Load fallback values from `path`. A missing file is not an
    /// error; built-in defaults apply. A file that exists but does not
    /// parse is.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

/// Resolved connection target, fixed for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbSettings {
    Tcp {
        host: String,
        port: u16,
        user: String,
        password: String,
        database: String,
    },
    /// `socket_dir` is the directory holding the `.s.PGSQL.5432`
    /// socket; Cloud SQL mounts one per instance under `/cloudsql`.
    UnixSocket {
        socket_dir: String,
        user: String,
        password: String,
        database: String,
    },
}

impl DbSettings {
    /// Resolve settings from the process environment.
    pub fn from_env(local: &LocalConfig) -> Self {
        Self::resolve(|key| env::var(key).ok(), local)
    }

    /// Short mode label, safe to log.
    pub fn mode_name(&self) -> &'static str {
        match self {
            Self::Tcp { .. } => "tcp",
            Self::UnixSocket { .. } => "unix-socket",
        }
    }

    fn resolve<F>(get: F, local: &LocalConfig) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty strings count as unset throughout.
        let get = |key: &str| get(key).filter(|value| !value.is_empty());

        match get("DB_HOST") {
            Some(addr) => {
                let mut parts = addr.splitn(2, ':');
                let host = parts.next().unwrap_or_default();
                let port = parts.next();

                Self::Tcp {
                    host: if host.is_empty() {
                        local.host.clone()
                    } else {
                        host.to_string()
                    },
                    port: port
                        .and_then(|p| p.parse().ok())
                        .unwrap_or(local.port),
                    user: get("DB_USER").unwrap_or_else(|| local.user.clone()),
                    password: get("DB_PASSWORD").unwrap_or_else(|| local.password.clone()),
                    database: get("DB_NAME").unwrap_or_else(|| local.database.clone()),
                }
            }
            None => Self::UnixSocket {
                socket_dir: format!(
                    "{}/{}",
                    get("DB_SOCKET_PATH").unwrap_or_else(|| DEFAULT_SOCKET_DIR.to_string()),
                    get("DB_CONNECTION_NAME").unwrap_or_default()
                ),
                user: get("DB_USER").unwrap_or_default(),
                password: get("DB_PASSWORD").unwrap_or_default(),
                database: get("DB_NAME").unwrap_or_default(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn resolve(vars: &HashMap<String, String>) -> DbSettings {
        DbSettings::resolve(|key| vars.get(key).cloned(), &LocalConfig::default())
    }

    #[test]
    fn tcp_mode_when_host_is_set() {
        let settings = resolve(&env(&[
            ("DB_HOST", "10.1.2.3:6432"),
            ("DB_USER", "svc"),
            ("DB_PASSWORD", "secret"),
            ("DB_NAME", "spots"),
        ]));

        assert_eq!(
            settings,
            DbSettings::Tcp {
                host: "10.1.2.3".to_string(),
                port: 6432,
                user: "svc".to_string(),
                password: "secret".to_string(),
                database: "spots".to_string(),
            }
        );
    }

    #[test]
    fn tcp_mode_falls_back_to_local_config() {
        let settings = resolve(&env(&[("DB_HOST", "db.internal")]));

        let local = LocalConfig::default();
        assert_eq!(
            settings,
            DbSettings::Tcp {
                host: "db.internal".to_string(),
                port: local.port,
                user: local.user,
                password: local.password,
                database: local.database,
            }
        );
    }

    #[test]
    fn database_name_falls_back_to_database_field() {
        let local = LocalConfig {
            password: "hunter2".to_string(),
            database: "spots".to_string(),
            ..LocalConfig::default()
        };
        let vars = env(&[("DB_HOST", "db.internal")]);
        let settings = DbSettings::resolve(|key| vars.get(key).cloned(), &local);

        match settings {
            DbSettings::Tcp { database, .. } => assert_eq!(database, "spots"),
            other => panic!("expected tcp settings, got {other:?}"),
        }
    }

    #[test]
    fn empty_host_segment_falls_back() {
        let settings = resolve(&env(&[("DB_HOST", ":9999")]));

        match settings {
            DbSettings::Tcp { host, port, .. } => {
                assert_eq!(host, "localhost");
                assert_eq!(port, 9999);
            }
            other => panic!("expected tcp settings, got {other:?}"),
        }
    }

    #[test]
    fn unparseable_port_falls_back() {
        let settings = resolve(&env(&[("DB_HOST", "db.internal:not-a-port")]));

        match settings {
            DbSettings::Tcp { port, .. } => assert_eq!(port, 5432),
            other => panic!("expected tcp settings, got {other:?}"),
        }
    }

    #[test]
    fn socket_mode_when_host_is_absent() {
        let settings = resolve(&env(&[
            ("DB_USER", "svc"),
            ("DB_PASSWORD", "secret"),
            ("DB_NAME", "spots"),
            ("DB_CONNECTION_NAME", "proj:region:instance"),
        ]));

        assert_eq!(
            settings,
            DbSettings::UnixSocket {
                socket_dir: "/cloudsql/proj:region:instance".to_string(),
                user: "svc".to_string(),
                password: "secret".to_string(),
                database: "spots".to_string(),
            }
        );
    }

    #[test]
    fn socket_mode_respects_socket_path_override() {
        let settings = resolve(&env(&[
            ("DB_SOCKET_PATH", "/var/run/pg"),
            ("DB_CONNECTION_NAME", "proj:region:instance"),
        ]));

        match settings {
            DbSettings::UnixSocket { socket_dir, .. } => {
                assert_eq!(socket_dir, "/var/run/pg/proj:region:instance");
            }
            other => panic!("expected socket settings, got {other:?}"),
        }
    }

    #[test]
    fn socket_mode_has_no_fallback() {
        // Missing variables become empty strings and a trailing-slash
        // socket dir; the failure surfaces on the first query.
        let settings = resolve(&env(&[]));

        assert_eq!(
            settings,
            DbSettings::UnixSocket {
                socket_dir: "/cloudsql/".to_string(),
                user: String::new(),
                password: String::new(),
                database: String::new(),
            }
        );
    }

    #[test]
    fn empty_host_variable_selects_socket_mode() {
        let settings = resolve(&env(&[("DB_HOST", "")]));
        assert_eq!(settings.mode_name(), "unix-socket");
    }

    #[test]
    fn local_config_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = LocalConfig::load(&dir.path().join("absent.toml")).expect("load");

        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 5432);
    }

    #[test]
    fn local_config_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("localconfig.toml");
        let mut file = fs::File::create(&path).expect("create");
        writeln!(file, "user = \"svc\"\nport = 6432").expect("write");

        let config = LocalConfig::load(&path).expect("load");
        assert_eq!(config.user, "svc");
        assert_eq!(config.port, 6432);
        assert_eq!(config.host, "localhost");
    }

    #[test]
    fn local_config_rejects_invalid_toml() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("localconfig.toml");
        fs::write(&path, "user = ").expect("write");

        assert!(matches!(
            LocalConfig::load(&path),
            Err(ConfigError::Parse(_))
        ));
    }
}
