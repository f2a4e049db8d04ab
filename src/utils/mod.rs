pub mod build_info;
pub mod time;

use std::sync::Once;

use tracing_subscriber::EnvFilter;

pub use time::{Clock, FixedClock, SystemClock};

static TRACING_INIT: Once = Once::new();

const DEFAULT_FILTER: &str = "cashflow_core=info";

/// Initializes the global tracing subscriber. `RUST_LOG`, when set, replaces
/// the default `cashflow_core=info` filter.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = env_filter(std::env::var("RUST_LOG").ok().as_deref());

        // stdout carries command output
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

fn env_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .map(str::trim)
        .filter(|spec| !spec.is_empty())
        .and_then(|spec| EnvFilter::try_new(spec).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_log_replaces_default_filter() {
        let custom = env_filter(Some("cashflow_core=debug")).to_string();
        assert!(custom.contains("cashflow_core=debug"), "{custom}");
        assert!(!custom.contains("cashflow_core=info"), "{custom}");
    }

    #[test]
    fn blank_rust_log_uses_default_filter() {
        for unset in [None, Some(""), Some("  ")] {
            let filter = env_filter(unset).to_string();
            assert!(filter.contains(DEFAULT_FILTER), "{filter}");
        }
    }
}
