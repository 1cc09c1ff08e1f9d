use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use tracing::{debug, warn};

use crate::{env_subst::substitute_env, schema::SquelchConfig};

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &["squelch.toml", "squelch.yaml", "squelch.yml", "squelch.json"];

/// Override for the config directory, set via `set_config_dir()`.
static CONFIG_DIR_OVERRIDE: Mutex<Option<PathBuf>> = Mutex::new(None);

/// Set a custom config directory. When set, config discovery only looks in
/// this directory (project-local and user-global paths are skipped).
/// Can be called multiple times (e.g. in tests) — each call replaces the
/// previous override.
pub fn set_config_dir(path: PathBuf) {
    if let Ok(mut guard) = CONFIG_DIR_OVERRIDE.lock() {
        *guard = Some(path);
    }
}

/// Clear the config directory override, restoring default discovery.
pub fn clear_config_dir() {
    if let Ok(mut guard) = CONFIG_DIR_OVERRIDE.lock() {
        *guard = None;
    }
}

fn config_dir_override() -> Option<PathBuf> {
    CONFIG_DIR_OVERRIDE.lock().ok().and_then(|g| g.clone())
}

/// Load config from the given path (any supported format).
pub fn load_config(path: &Path) -> anyhow::Result<SquelchConfig> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    let raw = substitute_env(&raw);
    parse_config(&raw, path)
}

/// Discover and load config from standard locations.
///
/// Search order:
/// 1. `./squelch.{toml,yaml,yml,json}` (project-local)
/// 2. `~/.config/squelch/squelch.{toml,yaml,yml,json}` (user-global)
///
/// Returns `SquelchConfig::default()` if no config file is found.
pub fn discover_and_load() -> SquelchConfig {
    if let Some(path) = find_config_file() {
        debug!(path = %path.display(), "loading config");
        match load_config(&path) {
            Ok(cfg) => return cfg,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
            },
        }
    }
    SquelchConfig::default()
}

/// Find the first config file in standard locations.
///
/// When a config dir override is set, only that directory is searched —
/// project-local and user-global paths are skipped for isolation.
fn find_config_file() -> Option<PathBuf> {
    if let Some(dir) = config_dir_override() {
        for name in CONFIG_FILENAMES {
            let p = dir.join(name);
            if p.exists() {
                return Some(p);
            }
        }
        // Override is set — don't fall through to other locations.
        return None;
    }

    // Project-local
    for name in CONFIG_FILENAMES {
        let p = PathBuf::from(name);
        if p.exists() {
            return Some(p);
        }
    }

    // User-global: ~/.config/squelch/
    if let Some(dir) = home_dir().map(|h| h.join(".config").join("squelch")) {
        for name in CONFIG_FILENAMES {
            let p = dir.join(name);
            if p.exists() {
                return Some(p);
            }
        }
    }

    None
}

fn home_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf())
}

fn parse_config(raw: &str, path: &Path) -> anyhow::Result<SquelchConfig> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match ext {
        "toml" => Ok(toml::from_str(raw)?),
        "yaml" | "yml" => Ok(serde_yaml::from_str(raw)?),
        "json" => Ok(serde_json::from_str(raw)?),
        _ => anyhow::bail!("unsupported config format: .{ext}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_toml() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("squelch.toml");
        std::fs::write(&path, "[gateway]\nbind = \"0.0.0.0\"\nport = 9000\n").expect("write");

        let config = load_config(&path).expect("load");
        assert_eq!(config.gateway.bind, "0.0.0.0");
        assert_eq!(config.gateway.port, 9000);
    }

    #[test]
    fn loads_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("squelch.json");
        std::fs::write(&path, r#"{"gateway": {"port": 8443}}"#).expect("write");

        let config = load_config(&path).expect("load");
        assert_eq!(config.gateway.port, 8443);
        assert_eq!(config.gateway.bind, "127.0.0.1");
    }

    // Single test for override-based discovery: the override is a
    // process-wide static, so parallel tests must not share it.
    #[test]
    fn discovery_honors_config_dir_override() {
        let dir = tempfile::tempdir().expect("tempdir");
        set_config_dir(dir.path().to_path_buf());

        // Empty override dir → defaults, no fallthrough to cwd/home.
        assert_eq!(discover_and_load().gateway.port, 3000);

        std::fs::write(dir.path().join("squelch.toml"), "[gateway]\nport = 5000\n")
            .expect("write");
        assert_eq!(discover_and_load().gateway.port, 5000);

        clear_config_dir();
    }

    #[test]
    fn rejects_unknown_extension() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("squelch.ini");
        std::fs::write(&path, "bind=1").expect("write");
        assert!(load_config(&path).is_err());
    }
}
