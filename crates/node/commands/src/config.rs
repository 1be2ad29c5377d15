//! Figment-based configuration loading.
//!
//! Configuration priority (highest wins):
//! 1. CLI arguments given explicitly (applied after Figment load)
//! 2. Config file (TOML)
//! 3. Environment variables (`FCR_` prefix, e.g. `FCR_ADMIN_KEY`)
//! 4. Defaults

use std::path::Path;

use clap::ArgMatches;
use clap::parser::ValueSource;
use eyre::{Result, WrapErr};
use fcr_node_core::constants::ENV_PREFIX;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::cli::AdminArgs;

/// Complete node configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Admin server configuration.
    pub admin: AdminArgs,
}

impl NodeConfig {
    /// Load configuration from defaults, environment, and config file.
    /// CLI overrides should be applied separately after loading.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new()
            .merge(Serialized::defaults(NodeConfig::default()))
            .merge(env_provider());

        if let Some(path) = config_path {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        figment.extract().wrap_err("Failed to load configuration")
    }

    /// Overwrite fields whose value was given on the command line.
    ///
    /// `matches` are the `node` subcommand's matches. Without them every CLI
    /// value is treated as explicit. Values clap read from the environment
    /// are skipped, the env layer is already merged below the config file.
    pub fn apply_cli(&mut self, args: &AdminArgs, matches: Option<&ArgMatches>) {
        let explicit = |id: &str| {
            matches.is_none_or(|m| m.value_source(id) == Some(ValueSource::CommandLine))
        };

        if explicit("addr") {
            self.admin.addr = args.addr.clone();
        }
        if explicit("key") {
            self.admin.key = args.key.clone();
        }
        if explicit("max_body_size") {
            self.admin.max_body_size = args.max_body_size;
        }
    }
}

/// `FCR_<SECTION>_<FIELD>` maps to `<section>.<field>`, with the remaining
/// underscores turned into the dashes of the kebab-case field names.
fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX).map(|key| {
        key.as_str()
            .replacen('_', ".", 1)
            .replace('_', "-")
            .into()
    })
}
