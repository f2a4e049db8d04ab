pub mod json_backend;

use crate::{errors::Result, ledger::Ledger};

/// Store collaborator: supplies ledger snapshots and persists edits.
pub trait StorageBackend: Send + Sync {
    /// Loads the current snapshot, repairing legacy records on the way.
    fn load(&self) -> Result<Ledger>;
    fn save(&self, ledger: &Ledger) -> Result<()>;
    /// Backup file names, newest first.
    fn list_backups(&self) -> Result<Vec<String>>;
    fn restore(&self, backup_name: &str) -> Result<Ledger>;
}

pub use json_backend::JsonStorage;
