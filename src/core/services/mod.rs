pub mod entry_service;
pub mod summary_service;

pub use entry_service::{EntryDraft, EntryService};
pub use summary_service::{MonthlyOverview, SummaryService};
