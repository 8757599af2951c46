//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `lastvalue.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use lastvalue_domain::error::LastValueError;
use lastvalue_domain::id::{ElementId, SourceId};
use lastvalue_domain::registry::Registry;
use lastvalue_domain::time::DisplayZone;

/// Name of the optional configuration file.
pub const CONFIG_FILE: &str = "lastvalue.toml";

/// Store locations tried, in order, when no path is configured.
pub const STORE_CANDIDATES: [&str; 2] = ["last_value.sqlite", "../DB/last_value.sqlite"];

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Store location and connection settings.
    pub store: StoreConfig,
    /// Timestamp rendering.
    pub display: DisplayConfig,
    /// HTML dashboard and static files.
    pub dashboard: DashboardConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Machines and elements shown on every page.
    pub registry: RegistryConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// `SQLite` store configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Explicit database file; discovered from [`STORE_CANDIDATES`] when unset.
    pub path: Option<PathBuf>,
    /// Seconds to wait on a lock held by the writer.
    pub busy_timeout_secs: u64,
}

/// Timestamp rendering configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// `local` or `utc`.
    pub timezone: DisplayZone,
}

/// Dashboard configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Reload interval of the HTML page, in seconds.
    pub refresh_seconds: Option<u32>,
    /// Directory holding `index.html` and assets served under `/static`.
    pub static_dir: PathBuf,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Ordered machine and element declarations.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub machines: Vec<MachineEntry>,
    pub elements: Vec<ElementEntry>,
}

/// `[[registry.machines]]` entry.
#[derive(Debug, Deserialize)]
pub struct MachineEntry {
    pub name: String,
    pub source_id: i64,
}

/// `[[registry.elements]]` entry.
#[derive(Debug, Deserialize)]
pub struct ElementEntry {
    pub id: i64,
    #[serde(default)]
    pub label: Option<String>,
}

impl Config {
    /// Load configuration from `lastvalue.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file(CONFIG_FILE)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("LASTVALUE_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("LASTVALUE_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("LASTVALUE_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Some(val) = var("LASTVALUE_DB") {
            self.store.path = Some(PathBuf::from(val));
        }
        if let Some(val) = var("LASTVALUE_STATIC_DIR") {
            self.dashboard.static_dir = PathBuf::from(val);
        }
        if let Some(val) = var("LASTVALUE_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.dashboard.refresh_seconds == Some(0) {
            return Err(ConfigError::Validation(
                "refresh_seconds must be non-zero".to_string(),
            ));
        }
        self.registry.build()?;
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Resolve the store file against `base`.
    ///
    /// An explicit path wins; otherwise the first existing candidate, or the
    /// first candidate when none exists so health reports where it was
    /// expected.
    #[must_use]
    pub fn store_path(&self, base: &Path) -> PathBuf {
        if let Some(path) = &self.store.path {
            return base.join(path);
        }
        STORE_CANDIDATES
            .iter()
            .map(|candidate| base.join(candidate))
            .find(|candidate| candidate.is_file())
            .unwrap_or_else(|| base.join(STORE_CANDIDATES[0]))
    }

    /// Lock wait applied to every store session.
    #[must_use]
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_secs(self.store.busy_timeout_secs)
    }
}

impl RegistryConfig {
    /// Build the validated [`Registry`], keeping declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Registry`] when no machine or element is
    /// declared, or when a machine name is empty or repeated.
    pub fn build(&self) -> Result<Registry, ConfigError> {
        let builder = self
            .machines
            .iter()
            .fold(Registry::builder(), |builder, machine| {
                builder.machine(machine.name.as_str(), SourceId::new(machine.source_id))
            });
        let builder = self
            .elements
            .iter()
            .fold(builder, |builder, element| match &element.label {
                Some(label) => builder.labelled_element(ElementId::new(element.id), label.as_str()),
                None => builder.element(ElementId::new(element.id)),
            });
        builder.build().map_err(ConfigError::Registry)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: None,
            busy_timeout_secs: 10,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh_seconds: None,
            static_dir: PathBuf::from("static"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "lastvalued=info,lastvalue=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        const MACHINES: [(&str, i64); 5] = [
            ("Schuler1", 982),
            ("Schuler2", 1028),
            ("Schuler3", 1029),
            ("Schuler4", 810),
            ("Schuler5", 1030),
        ];
        const ELEMENTS: [(i64, &str); 11] = [
            (69, "Barras.VelocidadAcunado.Valor"),
            (48, "DatosGen.ModoTrabajo.Led"),
            (116, "DatosGen.ModoTrabajo.Modo"),
            (154, "DatosGen.Denominacion"),
            (152, "DatosGen.OT"),
            (153, "DatosGen.Operador"),
            (52, "Tendencia.Avance"),
            (54, "OEE.Rendimiento"),
            (160, "Tendencia.MetaActual"),
            (137, "TiempoMuerto"),
            (50, "Tendencia.Programado"),
        ];

        Self {
            machines: MACHINES
                .iter()
                .map(|(name, source_id)| MachineEntry {
                    name: (*name).to_string(),
                    source_id: *source_id,
                })
                .collect(),
            elements: ELEMENTS
                .iter()
                .map(|(id, label)| ElementEntry {
                    id: *id,
                    label: Some((*label).to_string()),
                })
                .collect(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
    /// Machine or element declarations rejected.
    #[error("invalid registry")]
    Registry(#[source] LastValueError),
}
