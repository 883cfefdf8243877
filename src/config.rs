//! Process configuration.
//!
//! Sources, lowest to highest precedence:
//! - built-in defaults (`Config::default`)
//! - TOML file: `catalog.toml`, or the path named by `CATALOG_CONFIG`
//! - environment: `CATALOG_<SECTION>__<KEY>`, e.g. `CATALOG_BASIC__API_KEY`
//!
//! The loaded value is immutable and handed to the router state at startup.

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

pub const DEFAULT_CONFIG_FILE: &str = "catalog.toml";
pub const CONFIG_PATH_ENV: &str = "CATALOG_CONFIG";
pub const ENV_PREFIX: &str = "CATALOG_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub basic: BasicConfig,
    pub catalog: CatalogConfig,
}

/// `[basic]` section: network, storage, logging and the shared secret.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BasicConfig {
    pub listen_addr: String,
    pub database_url: String,
    pub loglevel: String,
    /// Shared secret expected in the `X-Api-Key` header of mutating requests.
    pub api_key: String,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".to_string(),
            database_url: "sqlite:catalog.db".to_string(),
            loglevel: "info".to_string(),
            api_key: String::new(),
        }
    }
}

/// `[catalog]` section: listing defaults and request limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub default_page_size: u32,
    /// Insert the demo categories/products when the tables are empty.
    pub seed_demo_data: bool,
    /// Maximum accepted request body, in bytes.
    pub body_limit: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            seed_demo_data: true,
            body_limit: 1024 * 1024,
        }
    }
}

impl Config {
    /// Layered figment reading `path` as the TOML layer.
    pub fn figment_from(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Layered figment using the file named by `CATALOG_CONFIG`, or `catalog.toml`.
    pub fn figment() -> Figment {
        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::figment_from(&path)
    }

    pub fn load() -> Result<Self, CatalogError> {
        let cfg: Config = Self::figment().extract()?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.basic.api_key.trim().is_empty() {
            return Err(CatalogError::InvalidConfig(
                "basic.api_key must be set (CATALOG_BASIC__API_KEY)".to_string(),
            ));
        }
        if self.catalog.default_page_size == 0 {
            return Err(CatalogError::InvalidConfig(
                "catalog.default_page_size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = Config::default();
        assert_eq!(cfg.basic.listen_addr, "0.0.0.0:8000");
        assert_eq!(cfg.catalog.default_page_size, 10);
        assert!(cfg.catalog.seed_demo_data);
    }

    #[test]
    fn default_config_is_rejected_without_api_key() {
        let err = Config::default().validate().unwrap_err();
        assert!(matches!(err, CatalogError::InvalidConfig(_)));
    }

    #[test]
    fn zero_default_page_size_is_rejected() {
        let mut cfg = Config::default();
        cfg.basic.api_key = "k".to_string();
        cfg.catalog.default_page_size = 0;
        assert!(cfg.validate().is_err());

        cfg.catalog.default_page_size = 500;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn file_then_env_layers_override_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "catalog.toml",
                r#"
                [basic]
                api_key = "from-file"
                database_url = "sqlite:file.db"

                [catalog]
                default_page_size = 25
                "#,
            )?;
            jail.set_env("CATALOG_BASIC__API_KEY", "from-env");
            jail.set_env("CATALOG_CATALOG__SEED_DEMO_DATA", "false");

            let cfg: Config = Config::figment_from(Path::new("catalog.toml")).extract()?;
            assert_eq!(cfg.basic.api_key, "from-env");
            assert_eq!(cfg.basic.database_url, "sqlite:file.db");
            assert_eq!(cfg.catalog.default_page_size, 25);
            assert_eq!(cfg.catalog.body_limit, 1024 * 1024);
            assert!(!cfg.catalog.seed_demo_data);
            Ok(())
        });
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        Jail::expect_with(|_jail| {
            let cfg: Config = Config::figment_from(Path::new("absent.toml")).extract()?;
            assert_eq!(cfg.basic.loglevel, "info");
            assert!(cfg.basic.api_key.is_empty());
            Ok(())
        });
    }
}
