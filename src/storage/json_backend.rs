use chrono::Datelike;
use serde::Deserialize;
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    config::DEFAULT_BACKUP_RETENTION,
    core::utils::{ensure_dir, PathResolver},
    errors::{LedgerError, Result},
    ledger::{format_date, parse_date, Ledger, MonthlyOverride, OneOffItem, RecurringItem},
    utils::{Clock, SystemClock},
};

use super::StorageBackend;

const BACKUP_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const TMP_SUFFIX: &str = "tmp";

/// Single-file JSON store using the camelCase `finance.json` layout.
#[derive(Clone)]
pub struct JsonStorage {
    path: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
    clock: Arc<dyn Clock>,
}

impl JsonStorage {
    pub fn new(path: PathBuf, retention: Option<usize>) -> Result<Self> {
        Self::with_clock(path, retention, Arc::new(SystemClock))
    }

    pub fn new_default() -> Result<Self> {
        let base = PathResolver::base_dir();
        Self::new(PathResolver::data_file_in(&base), None)
    }

    pub fn with_clock(
        path: PathBuf,
        retention: Option<usize>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        let backups_dir = PathResolver::backup_dir_for(&path);
        Ok(Self {
            path,
            backups_dir,
            retention: retention.unwrap_or(DEFAULT_BACKUP_RETENTION).max(1),
            clock,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backups_dir(&self) -> &Path {
        &self.backups_dir
    }

    fn backup_existing_file(&self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        ensure_dir(&self.backups_dir)?;
        let stem = self
            .path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("finance");
        let timestamp = self.clock.now().format(BACKUP_TIMESTAMP_FORMAT);
        let name = self.unused_backup_name(&format!("{stem}_{timestamp}"));
        fs::copy(&self.path, self.backups_dir.join(&name))?;
        tracing::info!(backup = %name, "backed up ledger before save");
        self.prune_backups()
    }

    /// Saves within the same second get a `_001`, `_002`... suffix, which
    /// still sorts after the unsuffixed name.
    fn unused_backup_name(&self, base: &str) -> String {
        let mut name = format!("{base}.{BACKUP_EXTENSION}");
        let mut counter = 0u32;
        while self.backups_dir.join(&name).exists() {
            counter += 1;
            name = format!("{base}_{counter:03}.{BACKUP_EXTENSION}");
        }
        name
    }

    fn prune_backups(&self) -> Result<()> {
        let backups = self.list_backups()?;
        for name in backups.iter().skip(self.retention) {
            if let Err(err) = fs::remove_file(self.backups_dir.join(name)) {
                tracing::warn!(backup = %name, error = %err, "failed to prune backup");
            }
        }
        Ok(())
    }

    fn write(&self, ledger: &Ledger) -> Result<()> {
        let json = serde_json::to_string_pretty(ledger)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl StorageBackend for JsonStorage {
    fn load(&self) -> Result<Ledger> {
        if !self.path.exists() {
            return Ok(Ledger::new());
        }
        let data = fs::read_to_string(&self.path)?;
        let stored: StoredLedger = serde_json::from_str(&data)?;
        let (ledger, repaired) = stored.repair(self.clock.today())?;
        if repaired {
            tracing::warn!(path = %self.path.display(), "repaired legacy ledger records");
            self.write(&ledger)?;
        }
        Ok(ledger)
    }

    fn save(&self, ledger: &Ledger) -> Result<()> {
        self.backup_existing_file()?;
        self.write(ledger)?;
        tracing::info!(
            path = %self.path.display(),
            recurring = ledger.recurring.len(),
            one_offs = ledger.one_offs.len(),
            overrides = ledger.overrides.len(),
            "saved ledger"
        );
        Ok(())
    }

    fn list_backups(&self) -> Result<Vec<String>> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.backups_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                entries.push(name.to_string());
            }
        }
        // timestamps are zero-padded so lexical order is chronological
        entries.sort_by(|a, b| b.cmp(a));
        Ok(entries)
    }

    fn restore(&self, backup_name: &str) -> Result<Ledger> {
        if backup_name.contains(['/', '\\']) {
            return Err(LedgerError::Storage(format!(
                "invalid backup name `{backup_name}`"
            )));
        }
        let source = self.backups_dir.join(backup_name);
        if !source.exists() {
            return Err(LedgerError::NotFound(format!("backup `{backup_name}`")));
        }
        let data = fs::read_to_string(&source)?;
        self.backup_existing_file()?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &data)?;
        fs::rename(&tmp, &self.path)?;
        tracing::info!(backup = %backup_name, "restored ledger from backup");
        self.load()
    }
}

/// On-disk shape before repair: older files may lack `overrides`, `day` or
/// `startDate`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredLedger {
    #[serde(default)]
    recurring: Vec<StoredRecurring>,
    #[serde(default)]
    one_offs: Vec<OneOffItem>,
    overrides: Option<Vec<MonthlyOverride>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredRecurring {
    id: String,
    name: String,
    amount: f64,
    day: Option<u32>,
    start_date: Option<String>,
}

impl StoredLedger {
    fn repair(self, today: chrono::NaiveDate) -> Result<(Ledger, bool)> {
        let mut repaired = self.overrides.is_none();
        let mut recurring = Vec::with_capacity(self.recurring.len());

        for stored in self.recurring {
            let start_date = match stored.start_date {
                Some(raw) if !raw.trim().is_empty() => raw,
                _ => {
                    repaired = true;
                    format_date(today)
                }
            };
            let day = match parse_date(&start_date, &stored.id, "startDate") {
                Ok(parsed) => parsed.day(),
                // left for the engine to report, unless there is nothing to fall back on
                Err(err) => match stored.day {
                    Some(day) => day,
                    None => return Err(err),
                },
            };
            if stored.day != Some(day) {
                repaired = true;
            }
            recurring.push(RecurringItem {
                id: stored.id,
                name: stored.name,
                amount: stored.amount,
                day,
                start_date,
            });
        }

        let ledger = Ledger {
            recurring,
            one_offs: self.one_offs,
            overrides: self.overrides.unwrap_or_default(),
        };
        Ok((ledger, repaired))
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

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
