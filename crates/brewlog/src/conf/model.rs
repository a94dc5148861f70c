//! Model — configuration structs and their defaults.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BrewlogConfig {
    pub server: ServerConfig,
    pub logs: LogsConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub brewery: BreweryConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub bind_address: String,
    pub write_timeout_secs: u64,
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

/// Where the brewing engine writes its CSV logs.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogsConfig {
    pub directory: String,
    pub action_log: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    pub output: LogOutput,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    Stdout,
    File { path: String },
}

/// Static brewery inventory served to the chart endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BreweryConfig {
    pub sensors: Vec<EntityConfig>,
    pub kettles: Vec<EntityConfig>,
    pub fermenters: Vec<EntityConfig>,
    /// Controller logic names that chart with the standard layout
    pub controllers: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EntityConfig {
    pub id: u32,
    pub name: String,
    /// Controller logic (kettles and fermenters only)
    #[serde(default)]
    pub logic: Option<String>,
    /// Sensor read by a kettle or fermenter
    #[serde(default)]
    pub sensor: Option<u32>,
}

impl Default for BreweryConfig {
    fn default() -> Self {
        Self {
            sensors: vec![],
            kettles: vec![],
            fermenters: vec![],
            controllers: vec!["Hysteresis".to_string()],
        }
    }
}

impl Default for BrewlogConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind_address: "0.0.0.0:5000".to_string(),
                write_timeout_secs: 30,
                enable_cors: true,
                cors_origins: vec![
                    "http://localhost:3000".to_string(),
                    "http://localhost:5173".to_string(),
                ],
            },
            logs: LogsConfig {
                directory: "./logs".to_string(),
                action_log: "action.log".to_string(),
            },
            logging: LoggingConfig {
                level: "info,brewlog=debug".to_string(),
                format: LogFormat::Pretty,
                output: LogOutput::Stdout,
            },
            brewery: BreweryConfig::default(),
        }
    }
}
