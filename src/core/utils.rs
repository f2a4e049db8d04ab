use dirs::home_dir;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::errors::Result;

const DEFAULT_DIR_NAME: &str = ".cashflow";
const DATA_FILE: &str = "finance.json";
const BACKUP_DIR: &str = "backups";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";

/// Resolves every on-disk location below one base directory.
pub struct PathResolver;

impl PathResolver {
    /// `$CASHFLOW_HOME`, else `~/.cashflow`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os("CASHFLOW_HOME") {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn data_file_in(base: &Path) -> PathBuf {
        base.join(DATA_FILE)
    }

    /// Backups sit next to the data file they protect.
    pub fn backup_dir_for(data_file: &Path) -> PathBuf {
        data_file
            .parent()
            .map(|parent| parent.join(BACKUP_DIR))
            .unwrap_or_else(|| PathBuf::from(BACKUP_DIR))
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        base.join(CONFIG_DIR).join(CONFIG_FILE)
    }
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backup_dir_is_sibling_of_data_file() {
        let data = PathResolver::data_file_in(Path::new("/tmp/cash"));
        assert_eq!(data, PathBuf::from("/tmp/cash/finance.json"));
        assert_eq!(
            PathResolver::backup_dir_for(&data),
            PathBuf::from("/tmp/cash/backups")
        );
        assert_eq!(
            PathResolver::config_file_in(Path::new("/tmp/cash")),
            PathBuf::from("/tmp/cash/config/config.json")
        );
    }
}
