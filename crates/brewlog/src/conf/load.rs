//! Load — layered config loading (defaults, files, environment) and validation.

use anyhow::{Context, Result};
use std::collections::HashSet;

use super::model::{BrewlogConfig, EntityConfig};
use crate::logs::filename::is_valid_log_filename;

impl BrewlogConfig {
    /// Load configuration from brewlog.toml and environment variables
    pub fn load() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        // Compile-time defaults are the base layer, so a key missing from
        // files and env still resolves
        let defaults = config::Config::try_from(&BrewlogConfig::default())
            .context("Failed to serialize default configuration")?;

        let mut builder = config::Config::builder()
            .add_source(defaults);

        // Later paths override earlier ones
        let config_paths = vec![
            "/etc/brewlog/brewlog",
            "config/brewlog",
            "crates/brewlog/config/brewlog",
        ];

        for path in config_paths {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        // Double underscore for nested keys: BREWLOG_SERVER__BIND_ADDRESS
        builder = builder.add_source(
            config::Environment::with_prefix("BREWLOG")
                .separator("__")
                .try_parsing(true),
        );

        builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.server.bind_address.parse::<std::net::SocketAddr>()
            .context("Invalid bind_address")?;

        if self.logs.directory.trim().is_empty() {
            anyhow::bail!("logs.directory must not be empty");
        }
        if !is_valid_log_filename(&self.logs.action_log) {
            anyhow::bail!(
                "logs.action_log '{}' is not a plain log file name (expected NAME.log)",
                self.logs.action_log
            );
        }

        check_unique_ids("sensors", &self.brewery.sensors)?;
        check_unique_ids("kettles", &self.brewery.kettles)?;
        check_unique_ids("fermenters", &self.brewery.fermenters)?;

        Ok(())
    }
}

fn check_unique_ids(section: &str, entities: &[EntityConfig]) -> Result<()> {
    let mut seen = HashSet::new();
    for entity in entities {
        if !seen.insert(entity.id) {
            anyhow::bail!("brewery.{} has duplicate id {}", section, entity.id);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(id: u32, name: &str) -> EntityConfig {
        EntityConfig {
            id,
            name: name.to_string(),
            logic: None,
            sensor: None,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(BrewlogConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_bad_bind_address() {
        let mut config = BrewlogConfig::default();
        config.server.bind_address = "not-an-address".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("bind_address"));
    }

    #[test]
    fn test_validate_empty_log_directory() {
        let mut config = BrewlogConfig::default();
        config.logs.directory = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("logs.directory"));
    }

    #[test]
    fn test_validate_action_log_with_path() {
        let mut config = BrewlogConfig::default();
        config.logs.action_log = "../action.log".to_string();
        assert!(config.validate().is_err());

        config.logs.action_log = "actions.txt".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_duplicate_kettle_ids() {
        let mut config = BrewlogConfig::default();
        config.brewery.kettles = vec![entity(1, "Mash Tun"), entity(1, "Boil Kettle")];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("kettles"));
    }

    #[test]
    fn test_same_id_across_kinds_is_allowed() {
        let mut config = BrewlogConfig::default();
        config.brewery.sensors = vec![entity(1, "Mash Temp")];
        config.brewery.kettles = vec![entity(1, "Mash Tun")];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_brewery_section_from_toml() {
        let source = r#"
            [brewery]
            controllers = ["Hysteresis", "PIDBoil"]

            [[brewery.sensors]]
            id = 1
            name = "Mash Temp"

            [[brewery.kettles]]
            id = 2
            name = "Mash Tun"
            logic = "Hysteresis"
            sensor = 1
        "#;

        let defaults = config::Config::try_from(&BrewlogConfig::default()).unwrap();
        let config: BrewlogConfig = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.brewery.controllers, vec!["Hysteresis", "PIDBoil"]);
        assert_eq!(config.brewery.sensors.len(), 1);
        assert_eq!(config.brewery.kettles[0].logic.as_deref(), Some("Hysteresis"));
        assert_eq!(config.brewery.kettles[0].sensor, Some(1));
        assert_eq!(config.logs.directory, "./logs");
    }
}
