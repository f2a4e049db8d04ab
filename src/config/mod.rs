use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{ensure_dir, PathResolver},
    errors::{LedgerError, Result},
};

const TMP_SUFFIX: &str = "tmp";
pub const DEFAULT_BACKUP_RETENTION: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub currency_symbol: String,
    /// Overrides `<base>/finance.json`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    pub backup_retention: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: "$".into(),
            data_file: None,
            backup_retention: DEFAULT_BACKUP_RETENTION,
        }
    }
}

impl Config {
    pub fn data_file(&self, base: &Path) -> PathBuf {
        self.data_file
            .clone()
            .unwrap_or_else(|| PathResolver::data_file_in(base))
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        let path = PathResolver::config_file_in(&base);
        Ok(Self { base, path })
    }

    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| {
            LedgerError::Config(format!("{}: {err}", self.path.display()))
        })
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        let mut file = File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.flush()?;
        fs::rename(&tmp, &self.path)?;
        tracing::info!(path = %self.path.display(), "saved configuration");
        Ok(())
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}
