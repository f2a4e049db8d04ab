#![doc(test(attr(deny(warnings))))]

//! Cashflow Core projects a personal ledger of recurring and one-off items
//! onto 20th-to-20th billing cycles and calendar-month summaries.
//!
//! The computations in [`ledger`] are pure: they take a [`ledger::Ledger`]
//! snapshot and a date or year and never touch storage. Loading, repairing
//! and saving snapshots is the job of [`storage`].

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Cashflow Core tracing initialized.");
    });
}
