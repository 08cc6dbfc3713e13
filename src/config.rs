use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CodescoutConfig {
    pub database: Option<String>,
    /// Page size for `contributors` when `--first` is not given
    pub default_first: Option<usize>,
}

impl CodescoutConfig {
    /// Database path from the config, relative paths resolved against `base`
    pub fn database_path_in(&self, base: &Path) -> PathBuf {
        match &self.database {
            Some(db) => base.join(db),
            None => default_database_path_in(base),
        }
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("codescout.toml")
}

pub fn default_database_path_in(base: &Path) -> PathBuf {
    base.join(".codescout").join("codescout.db")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<CodescoutConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: CodescoutConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &CodescoutConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config(Some(&dir.path().join("codescout.toml"))).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("codescout.toml");
        let config = CodescoutConfig {
            database: Some("data/searches.db".to_string()),
            default_first: Some(25),
        };

        write_config(&path, &config, false).unwrap();
        assert!(write_config(&path, &config, false).is_err());
        write_config(&path, &config, true).unwrap();

        let loaded = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(loaded.default_first, Some(25));
        assert_eq!(
            loaded.database_path_in(dir.path()),
            dir.path().join("data/searches.db")
        );
    }

    #[test]
    fn test_zero_default_first_matches_flag() {
        // `--first 0` is accepted, so the config value is too
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("codescout.toml");
        std::fs::write(&path, "default_first = 0\n").unwrap();
        let loaded = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(loaded.default_first, Some(0));
    }

    #[test]
    fn test_default_database_path() {
        let config = CodescoutConfig::default();
        assert_eq!(
            config.database_path_in(Path::new("/work")),
            PathBuf::from("/work/.codescout/codescout.db")
        );
    }

    #[test]
    fn test_ensure_db_dir_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested").join("codescout.db");
        ensure_db_dir(&db).unwrap();
        assert!(db.parent().unwrap().is_dir());
    }
}
