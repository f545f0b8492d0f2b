//! Tracing setup for the test binaries.
//!
//! Scenario and driver logs go through `tracing`; this wires them to the
//! test harness output. `RUST_LOG` overrides the default filter.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the subscriber once per process.
///
/// Every test calls this on entry; the first call wins and the rest are
/// no-ops, so tests stay order-independent.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("qatool_uat=info,qatool_browser_test=info"));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_test_writer()
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
