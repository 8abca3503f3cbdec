use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{env_subst::substitute_env, schema::BotConfig};

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &["moneta.yaml", "moneta.yml"];

/// Load and validate config from the given path.
pub fn load_config(path: &Path) -> anyhow::Result<BotConfig> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    let raw = substitute_env(&raw);
    let config: BotConfig = serde_yaml::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("failed to parse {}: {e}", path.display()))?;
    config.validate()?;
    Ok(config)
}

/// Discover and load config from standard locations.
///
/// Search order:
/// 1. `./moneta.{yaml,yml}` (project-local)
/// 2. `~/.config/moneta/moneta.{yaml,yml}` (user-global)
///
/// Unlike optional settings files this one is mandatory: without identities
/// there is nothing to run, so a missing config is an error.
pub fn discover_and_load() -> anyhow::Result<BotConfig> {
    let Some(path) = find_config_file() else {
        anyhow::bail!(
            "no config file found (looked for moneta.yaml in ./ and ~/.config/moneta/)"
        );
    };
    debug!(path = %path.display(), "loading config");
    load_config(&path)
}

/// Find the first config file in standard locations.
#[must_use]
pub fn find_config_file() -> Option<PathBuf> {
    for name in CONFIG_FILENAMES {
        let p = PathBuf::from(name);
        if p.exists() {
            return Some(p);
        }
    }

    let config_dir = config_dir()?;
    for name in CONFIG_FILENAMES {
        let p = config_dir.join(name);
        if p.exists() {
            return Some(p);
        }
    }

    None
}

/// The user-global config directory (`~/.config/moneta/`).
#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "moneta").map(|d| d.config_dir().to_path_buf())
}

/// The user-global data directory (`~/.local/share/moneta/`), home of the
/// runtime state files.
#[must_use]
pub fn data_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "moneta").map(|d| d.data_dir().to_path_buf())
}

/// Where one identity's refreshed token pair is cached.
#[must_use]
pub fn token_cache_path(identity: &str) -> Option<PathBuf> {
    data_dir().map(|d| d.join("tokens").join(format!("{identity}.json")))
}

/// Where the custom-command snapshot lives.
#[must_use]
pub fn custom_commands_path() -> Option<PathBuf> {
    data_dir().map(|d| d.join("custom_commands.json"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const SAMPLE: &str = r"
identities:
  - name: moneybot
    access_token: abc
    refresh_token: def
    client_id: cid
    client_secret: csec
    channels: [somechannel]
  - name: kairos
    access_token: ghi
    refresh_token: jkl
    client_id: cid
    client_secret: csec
    channels: ['#somechannel']
templates:
  moneybot:
    lurk:
      - have a good lurk
      - 'enjoy {gameName}'
";

    #[test]
    fn loads_a_full_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("moneta.yaml");
        std::fs::write(&path, SAMPLE).unwrap();

        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.identities.len(), 2);
        assert_eq!(cfg.identities[0].name, "moneybot");
        assert_eq!(cfg.identities[1].channels, ["#somechannel"]);

        let templates = cfg.templates_for("moneybot");
        assert_eq!(templates.get("lurk").map(Vec::len), Some(2));
        assert!(cfg.templates_for("kairos").is_empty());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(&dir.path().join("moneta.yaml")).is_err());
    }

    #[test]
    fn invalid_config_is_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("moneta.yaml");
        std::fs::write(&path, "identities: []\n").unwrap();
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn cache_paths_hang_off_the_data_dir() {
        let tokens = token_cache_path("moneybot").unwrap();
        assert!(tokens.ends_with("tokens/moneybot.json"));
        let commands = custom_commands_path().unwrap();
        assert!(commands.ends_with("custom_commands.json"));
    }
}
