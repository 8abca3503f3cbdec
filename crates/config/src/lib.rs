//! Startup configuration: schema, YAML loader, env substitution, and the
//! cache-directory helpers for runtime state files.
//!
//! Config file: `moneta.yaml` (or `moneta.yml`), searched in `./` then
//! `~/.config/moneta/`. Supports `${ENV_VAR}` substitution in all string
//! values.

pub mod env_subst;
pub mod loader;
pub mod schema;

pub use {
    loader::{
        config_dir, custom_commands_path, data_dir, discover_and_load, find_config_file,
        load_config, token_cache_path,
    },
    schema::{BotConfig, IdentityConfig},
};
