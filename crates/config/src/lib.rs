//! Configuration loading, env substitution, and diagnostics.
//!
//! Config files: `larkwire.toml`, `larkwire.yaml`, or `larkwire.json`
//! Searched in an explicit config dir if given, else `./` then
//! `~/.config/larkwire/`.
//!
//! Supports `${ENV_VAR}` substitution in all string values.

pub mod env_subst;
pub mod error;
pub mod loader;
pub mod schema;
pub mod validate;

pub use {
    error::{Error, Result},
    loader::{config_dir, discover_and_load, find_config_file, load_config},
    schema::{ChannelsConfig, LarkwireConfig},
    validate::{Diagnostic, Severity, ValidationResult},
};
