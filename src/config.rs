use crate::store::DEFAULT_STORAGE_KEY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct QuizdeckConfig {
    pub database: Option<String>,
    pub storage_key: Option<String>,
}

/// Settings after merging CLI flags over the config file over defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSettings {
    pub database: PathBuf,
    pub storage_key: String,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("quizdeck.toml")
}

pub fn default_database_path_in(base: &Path) -> PathBuf {
    base.join(".quizdeck").join("quizdeck.db")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<QuizdeckConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: QuizdeckConfig = toml::from_str(&contents)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &QuizdeckConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

/// Merge `--database` over the config file over the defaults under `base`
pub fn resolve_settings(
    config: Option<&QuizdeckConfig>,
    database_flag: Option<PathBuf>,
    base: &Path,
) -> ResolvedSettings {
    let database = database_flag
        .or_else(|| config.and_then(|c| c.database.as_ref()).map(PathBuf::from))
        .unwrap_or_else(|| default_database_path_in(base));
    let storage_key = config
        .and_then(|c| c.storage_key.clone())
        .filter(|key| !key.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());

    ResolvedSettings { database, storage_key }
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
