//! Generated client configuration.
//!
//! The installer emits `config.json` with the schema the client reads at
//! startup: server connection, display behavior and template sourcing.
//! A server host supplied at install time becomes a literal string; absent,
//! the field is `null` and the client auto-discovers via UDP broadcast.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Set by the client's own configuration wizard, never by the installer.
    pub wizard_completed: bool,
    pub server: ServerSection,
    pub display: DisplaySection,
    pub templates: TemplatesSection,
}

/// Server connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    /// Server host; `None` means auto-discover.
    pub host: Option<String>,
    pub level_port: u16,
    pub volumio_port: u16,
    pub discovery_port: u16,
    /// Seconds to wait for a discovery response.
    pub discovery_timeout: u32,
}

/// Display behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySection {
    pub windowed: bool,
    /// `None` means centered, otherwise an explicit `[x, y]`.
    pub position: Option<[i32; 2]>,
    pub fullscreen: bool,
    pub monitor: u32,
}

/// Template sourcing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplatesSection {
    pub use_smb: bool,
    /// Local override path; `None` means use the SMB mount.
    pub local_path: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            wizard_completed: false,
            server: ServerSection {
                host: None,
                level_port: 5580,
                volumio_port: 3000,
                discovery_port: 5579,
                discovery_timeout: 10,
            },
            display: DisplaySection {
                windowed: true,
                position: None,
                fullscreen: false,
                monitor: 0,
            },
            templates: TemplatesSection {
                use_smb: true,
                local_path: None,
            },
        }
    }
}

impl ClientConfig {
    /// Default configuration with an optional pre-filled server host.
    pub fn with_server(host: Option<String>) -> Self {
        let mut config = Self::default();
        config.server.host = host;
        config
    }
}

/// Write the configuration file, overwriting any existing one.
pub fn write_config(path: &Path, server: Option<&str>) -> Result<()> {
    let config = ClientConfig::with_server(server.map(String::from));
    let json = serde_json::to_string_pretty(&config)
        .map_err(|e| anyhow::anyhow!("serializing client config: {e}"))?;
    std::fs::write(path, json + "\n")?;
    Ok(())
}
