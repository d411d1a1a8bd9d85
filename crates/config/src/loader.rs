use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{
    env_subst::substitute_env,
    error::{Error, Result},
    schema::LarkwireConfig,
};

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &[
    "larkwire.toml",
    "larkwire.yaml",
    "larkwire.yml",
    "larkwire.json",
];

/// Load config from the given path (any supported format).
pub fn load_config(path: &Path) -> Result<LarkwireConfig> {
    let raw = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let raw = substitute_env(&raw);
    parse_config(&raw, path)
}

/// Discover and load config from standard locations.
///
/// Search order:
/// 1. `config_dir` when given (and nothing else)
/// 2. `./larkwire.{toml,yaml,yml,json}` (project-local)
/// 3. `~/.config/larkwire/larkwire.{toml,yaml,yml,json}` (user-global)
///
/// Returns `LarkwireConfig::default()` when no config file exists. A file
/// that exists but cannot be read or parsed is an error.
pub fn discover_and_load(config_dir: Option<&Path>) -> Result<LarkwireConfig> {
    match find_config_file(config_dir) {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            load_config(&path)
        },
        None => {
            debug!("no config file found, using defaults");
            Ok(LarkwireConfig::default())
        },
    }
}

/// Find the first config file in standard locations.
pub fn find_config_file(config_dir: Option<&Path>) -> Option<PathBuf> {
    if let Some(dir) = config_dir {
        return first_existing(dir);
    }

    // Project-local
    if let Some(path) = first_existing(Path::new(".")) {
        return Some(path);
    }

    // User-global: ~/.config/larkwire/
    self::config_dir().and_then(|dir| first_existing(&dir))
}

/// Returns the user-global config directory (`~/.config/larkwire/`).
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "larkwire").map(|d| d.config_dir().to_path_buf())
}

fn first_existing(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILENAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.is_file())
}

pub(crate) fn parse_config(raw: &str, path: &Path) -> Result<LarkwireConfig> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match ext {
        "toml" => toml::from_str(raw).map_err(|e| Error::parse(path, e)),
        "yaml" | "yml" => serde_yaml::from_str(raw).map_err(|e| Error::parse(path, e)),
        "json" => serde_json::from_str(raw).map_err(|e| Error::parse(path, e)),
        _ => Err(Error::UnsupportedFormat {
            extension: ext.to_string(),
        }),
    }
}
