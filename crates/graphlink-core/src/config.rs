//! Configuration management for GraphLink.
//!
//! Configuration is resolved per field in this order:
//! 1. Config file (`config.yaml` by default, any format the `config` crate reads)
//! 2. Environment variable, overriding the file (`neo4j.uri` → `NEO4J_URI`)
//! 3. Hard-coded default, applied when the value is still empty or zero

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{GraphLinkError, Result};

/// Keys that may be overridden from the environment.
const ENV_KEYS: &[&str] = &[
    "neo4j.uri",
    "neo4j.username",
    "neo4j.password",
    "neo4j.max_connections",
    "neo4j.fetch_size",
    "neo4j.query_timeout_secs",
    "grpc.host",
    "grpc.port",
    "grpc.request_timeout_secs",
    "log.format",
];

/// Extensions probed by `config::File::with_name`.
const FILE_EXTENSIONS: &[&str] = &["toml", "json", "yaml", "yml", "ini", "ron", "json5"];

const DEFAULT_NEO4J_URI: &str = "bolt://localhost:7687";
const DEFAULT_NEO4J_USERNAME: &str = "neo4j";
const DEFAULT_NEO4J_PASSWORD: &str = "password";
const DEFAULT_MAX_CONNECTIONS: usize = 16;
const DEFAULT_FETCH_SIZE: usize = 256;
const DEFAULT_GRPC_HOST: &str = "0.0.0.0";
const DEFAULT_GRPC_PORT: u16 = 50051;

/// Top-level GraphLink settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub neo4j: Neo4jSettings,

    #[serde(default)]
    pub grpc: GrpcSettings,

    #[serde(default)]
    pub log: LogSettings,
}

/// Neo4j connection settings.
#[derive(Clone, Default, Deserialize)]
pub struct Neo4jSettings {
    #[serde(default)]
    pub uri: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    /// Connection pool size.
    #[serde(default)]
    pub max_connections: usize,

    /// Rows fetched per PULL.
    #[serde(default)]
    pub fetch_size: usize,

    /// Upper bound on a single graph operation, 0 disables it.
    #[serde(default)]
    pub query_timeout_secs: u64,
}

/// gRPC listener settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GrpcSettings {
    /// IP literal to bind.
    #[serde(default)]
    pub host: String,

    #[serde(default)]
    pub port: u16,

    /// Server-side bound on every call, 0 disables it.
    #[serde(default)]
    pub request_timeout_secs: u64,
}

/// Logging output settings. Verbosity is controlled by `RUST_LOG`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogSettings {
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl Settings {
    /// Load settings from the file found by `file_prefix` and the process environment.
    pub fn load(file_prefix: &str) -> Result<Self> {
        Self::load_with_env(file_prefix, |name| std::env::var(name).ok())
    }

    /// Load settings, resolving environment variables through `env`.
    ///
    /// A missing config file is not an error. A malformed one is.
    pub fn load_with_env<F>(file_prefix: &str, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = ::config::Config::builder()
            .add_source(::config::File::with_name(file_prefix).required(false));

        for key in ENV_KEYS {
            let value = env(&env_var_name(key)).filter(|v| !v.is_empty());
            builder = builder.set_override_option(*key, value)?;
        }

        let settings: Settings = builder.build()?.try_deserialize()?;
        Ok(settings.with_defaults())
    }

    /// Fill every empty or zero field with its default.
    pub fn with_defaults(mut self) -> Self {
        fill(&mut self.neo4j.uri, DEFAULT_NEO4J_URI);
        fill(&mut self.neo4j.username, DEFAULT_NEO4J_USERNAME);
        fill(&mut self.neo4j.password, DEFAULT_NEO4J_PASSWORD);
        fill(&mut self.grpc.host, DEFAULT_GRPC_HOST);
        if self.neo4j.max_connections == 0 {
            self.neo4j.max_connections = DEFAULT_MAX_CONNECTIONS;
        }
        if self.neo4j.fetch_size == 0 {
            self.neo4j.fetch_size = DEFAULT_FETCH_SIZE;
        }
        if self.grpc.port == 0 {
            self.grpc.port = DEFAULT_GRPC_PORT;
        }
        self
    }
}

impl Neo4jSettings {
    pub fn query_timeout(&self) -> Option<Duration> {
        secs(self.query_timeout_secs)
    }
}

impl fmt::Debug for Neo4jSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Neo4jSettings")
            .field("uri", &self.uri)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("max_connections", &self.max_connections)
            .field("fetch_size", &self.fetch_size)
            .field("query_timeout_secs", &self.query_timeout_secs)
            .finish()
    }
}

impl GrpcSettings {
    /// The address to bind the gRPC listener on.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self.host.parse().map_err(|e| {
            GraphLinkError::InvalidConfig(format!("grpc.host {:?} is not an IP address: {e}", self.host))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        secs(self.request_timeout_secs)
    }
}

/// Whether `file_prefix` resolves to a config file on disk.
pub fn config_file_present(file_prefix: &str) -> bool {
    let path = Path::new(file_prefix);
    path.is_file()
        || FILE_EXTENSIONS
            .iter()
            .any(|ext| path.with_extension(ext).is_file())
}

/// `neo4j.max_connections` → `NEO4J_MAX_CONNECTIONS`.
pub fn env_var_name(key: &str) -> String {
    key.replace('.', "_").to_ascii_uppercase()
}

fn fill(field: &mut String, default: &str) {
    if field.is_empty() {
        *field = default.to_string();
    }
}

fn secs(n: u64) -> Option<Duration> {
    (n > 0).then(|| Duration::from_secs(n))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    fn write_config(dir: &tempfile::TempDir, body: &str) -> String {
        std::fs::write(dir.path().join("config.yaml"), body).unwrap();
        dir.path().join("config").to_string_lossy().into_owned()
    }

    #[test]
    fn test_defaults_without_file_or_env() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("config").to_string_lossy().into_owned();

        let settings = Settings::load_with_env(&prefix, no_env).unwrap();
        assert_eq!(settings.neo4j.uri, "bolt://localhost:7687");
        assert_eq!(settings.neo4j.username, "neo4j");
        assert_eq!(settings.neo4j.password, "password");
        assert_eq!(settings.grpc.port, 50051);
        assert_eq!(settings.grpc.host, "0.0.0.0");
        assert_eq!(settings.neo4j.max_connections, 16);
        assert_eq!(settings.neo4j.fetch_size, 256);
        assert_eq!(settings.neo4j.query_timeout(), None);
        assert_eq!(settings.log.format, LogFormat::Text);
        assert!(!config_file_present(&prefix));
    }

    #[test]
    fn test_file_values_are_used() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = write_config(
            &dir,
            "neo4j:\n  uri: bolt://graph:7687\n  username: admin\n  query_timeout_secs: 5\ngrpc:\n  port: 6000\nlog:\n  format: json\n",
        );

        let settings = Settings::load_with_env(&prefix, no_env).unwrap();
        assert!(config_file_present(&prefix));
        assert_eq!(settings.neo4j.uri, "bolt://graph:7687");
        assert_eq!(settings.neo4j.username, "admin");
        assert_eq!(settings.neo4j.password, "password");
        assert_eq!(settings.neo4j.query_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(settings.grpc.port, 6000);
        assert_eq!(settings.log.format, LogFormat::Json);
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = write_config(&dir, "neo4j:\n  uri: bolt://file:7687\ngrpc:\n  port: 6000\n");
        let env = env_from(&[
            ("NEO4J_URI", "bolt://env:7687"),
            ("GRPC_PORT", "7000"),
            ("NEO4J_MAX_CONNECTIONS", "4"),
        ]);

        let settings = Settings::load_with_env(&prefix, env).unwrap();
        assert_eq!(settings.neo4j.uri, "bolt://env:7687");
        assert_eq!(settings.grpc.port, 7000);
        assert_eq!(settings.neo4j.max_connections, 4);
    }

    #[test]
    fn test_empty_env_counts_as_unset() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = write_config(&dir, "neo4j:\n  password: from-file\n");
        let env = env_from(&[("NEO4J_PASSWORD", "")]);

        let settings = Settings::load_with_env(&prefix, env).unwrap();
        assert_eq!(settings.neo4j.password, "from-file");
    }

    #[test]
    fn test_zero_port_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = write_config(&dir, "grpc:\n  port: 0\n");

        let settings = Settings::load_with_env(&prefix, no_env).unwrap();
        assert_eq!(settings.grpc.port, 50051);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = write_config(&dir, "neo4j: [unclosed\n  uri: :\n");

        let err = Settings::load_with_env(&prefix, no_env).unwrap_err();
        assert!(matches!(err, GraphLinkError::Config(_)));
    }

    #[test]
    fn test_non_numeric_port_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("config").to_string_lossy().into_owned();
        let env = env_from(&[("GRPC_PORT", "not-a-port")]);

        assert!(Settings::load_with_env(&prefix, env).is_err());
    }

    #[test]
    fn test_env_var_names() {
        assert_eq!(env_var_name("neo4j.uri"), "NEO4J_URI");
        assert_eq!(env_var_name("grpc.port"), "GRPC_PORT");
        assert_eq!(
            env_var_name("neo4j.max_connections"),
            "NEO4J_MAX_CONNECTIONS"
        );
    }

    #[test]
    fn test_socket_addr() {
        let grpc = GrpcSettings {
            host: "127.0.0.1".to_string(),
            port: 50051,
            request_timeout_secs: 0,
        };
        assert_eq!(grpc.socket_addr().unwrap().to_string(), "127.0.0.1:50051");
        assert_eq!(grpc.request_timeout(), None);

        let bad = GrpcSettings {
            host: "not an ip".to_string(),
            ..grpc
        };
        assert!(matches!(
            bad.socket_addr(),
            Err(GraphLinkError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_debug_redacts_password() {
        let settings = Settings::default().with_defaults();
        let rendered = format!("{settings:?}");
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("\"password\""));
    }
}
