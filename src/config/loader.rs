//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the service
//! configuration from a YAML file.

use std::fs;
use std::io;
use std::net::SocketAddr;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{AppConfig, LoggingConfig, ServerConfig, StorageConfig};

/// Loads and provides access to the service configuration.
///
/// # File Format
///
/// ```text
/// server:
///   host: 127.0.0.1
///   port: 8080
/// storage:
///   backend: sqlite      # or "memory"
///   path: employees.db
/// logging:
///   level: info
///   json: false
/// ```
///
/// # Example
///
/// ```
/// use payroll_engine::config::{ConfigLoader, StorageConfig};
///
/// let loader = ConfigLoader::from_yaml("storage:\n  backend: memory\n", "inline").unwrap();
/// assert_eq!(loader.storage(), &StorageConfig::Memory);
/// assert_eq!(loader.server().port, 8080);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file exists but cannot be read (`ConfigReadError`)
    /// - The file contains invalid YAML or unknown values (`ConfigParseError`)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use payroll_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/payroll.yaml")?;
    /// # Ok::<(), payroll_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => EngineError::ConfigNotFound {
                path: path_str.clone(),
            },
            _ => EngineError::ConfigReadError {
                path: path_str.clone(),
                message: e.to_string(),
            },
        })?;

        Self::from_yaml(&content, &path_str)
    }

    /// Parses configuration from YAML text; `source` names it in errors.
    pub fn from_yaml(content: &str, source: &str) -> EngineResult<Self> {
        // An empty document deserializes as unit, not as an empty mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: AppConfig =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: source.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self { config })
    }

    /// Returns the HTTP listener settings.
    pub fn server(&self) -> &ServerConfig {
        &self.config.server
    }

    /// Returns the storage backend selection.
    pub fn storage(&self) -> &StorageConfig {
        &self.config.storage
    }

    /// Returns the log settings.
    pub fn logging(&self) -> &LoggingConfig {
        &self.config.logging
    }

    /// Overrides the listen port.
    pub fn set_port(&mut self, port: u16) {
        self.config.server.port = port;
    }

    /// Overrides the log filter.
    pub fn set_log_level(&mut self, level: impl Into<String>) {
        self.config.logging.level = level.into();
    }

    /// The socket address to bind.
    pub fn listen_addr(&self) -> EngineResult<SocketAddr> {
        let server = self.server();
        format!("{}:{}", server.host, server.port)
            .parse()
            .map_err(|e| EngineError::ConfigParseError {
                path: "server".to_string(),
                message: format!("invalid listen address '{}:{}': {}", server.host, server.port, e),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_document_uses_defaults() {
        let loader = ConfigLoader::from_yaml("", "empty").unwrap();
        assert_eq!(loader.server().host, "127.0.0.1");
        assert_eq!(loader.server().port, 8080);
        assert_eq!(
            loader.storage(),
            &StorageConfig::Sqlite {
                path: "employees.db".to_string()
            }
        );
        assert_eq!(loader.logging().level, "info");
        assert!(!loader.logging().json);
    }

    #[test]
    fn test_full_document() {
        let yaml = r#"
server:
  host: 0.0.0.0
  port: 9000
storage:
  backend: sqlite
  path: /var/lib/payroll/payroll.db
logging:
  level: debug
  json: true
"#;
        let loader = ConfigLoader::from_yaml(yaml, "inline").unwrap();
        assert_eq!(loader.server().port, 9000);
        assert_eq!(
            loader.storage(),
            &StorageConfig::Sqlite {
                path: "/var/lib/payroll/payroll.db".to_string()
            }
        );
        assert_eq!(loader.logging().level, "debug");
        assert!(loader.logging().json);
        assert_eq!(
            loader.listen_addr().unwrap(),
            "0.0.0.0:9000".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_sqlite_path_defaults() {
        let loader = ConfigLoader::from_yaml("storage:\n  backend: sqlite\n", "inline").unwrap();
        assert_eq!(
            loader.storage(),
            &StorageConfig::Sqlite {
                path: "employees.db".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_backend_is_parse_error() {
        let err = ConfigLoader::from_yaml("storage:\n  backend: postgres\n", "inline").unwrap_err();
        assert!(matches!(err, EngineError::ConfigParseError { ref path, .. } if path == "inline"));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = ConfigLoader::load("/definitely/missing/payroll.yaml").unwrap_err();
        assert!(matches!(err, EngineError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_unreadable_path_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfigLoader::load(dir.path()).unwrap_err();
        assert!(matches!(err, EngineError::ConfigReadError { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "storage:\n  backend: memory\nserver:\n  port: 3100").unwrap();
        let loader = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(loader.storage(), &StorageConfig::Memory);
        assert_eq!(loader.server().port, 3100);
    }

    #[test]
    fn test_overrides() {
        let mut loader = ConfigLoader::default();
        loader.set_port(4000);
        loader.set_log_level("warn");
        assert_eq!(loader.server().port, 4000);
        assert_eq!(loader.logging().level, "warn");
    }

    #[test]
    fn test_bad_host_is_rejected() {
        let loader =
            ConfigLoader::from_yaml("server:\n  host: not an address\n", "inline").unwrap();
        assert!(loader.listen_addr().is_err());
    }
}
