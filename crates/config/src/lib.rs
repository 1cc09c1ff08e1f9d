//! Configuration loading for the squelch relay.
//!
//! Discovers `squelch.{toml,yaml,yml,json}` project-locally or under
//! `~/.config/squelch/`, applies `${ENV_VAR}` substitution, and falls
//! back to defaults when nothing is found.

pub mod env_subst;
pub mod loader;
pub mod schema;

pub use {
    loader::{clear_config_dir, discover_and_load, load_config, set_config_dir},
    schema::{GatewaySection, SquelchConfig},
};
