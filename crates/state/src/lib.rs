//! Configuration discovery and layering for skillrec.
//!
//! This crate provides utilities for:
//! - Locating the config file (`--config`, `SKILLREC_CONFIG`, `~/.skillrec/config.toml`).
//! - Parsing TOML or YAML into a [`RecommenderConfig`](skillrec_intelligence::RecommenderConfig).
//! - Applying `SKILLREC_<OPTION>` environment variables and `key=value` overrides.

pub mod env;
pub mod settings;

pub use env::{
    config_file_from_env, default_config_file, env_overrides, env_var_name, home_dir,
    profiles_from_env, ENV_PREFIX,
};
pub use settings::{
    load_config_file, parse_config, parse_override, render_toml, ConfigFormat, ConfigLoader,
    LoadedConfig,
};
