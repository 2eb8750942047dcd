// SPDX-License-Identifier: GPL-3.0-only

use std::sync::Once;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "storage_contracts=debug,warn";

static INIT: Once = Once::new();

/// Route client tracing output to the test harness. `RUST_LOG` overrides
/// the default filter. Safe to call from every test.
pub fn init() {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        // The embedding test binary may already own the global subscriber.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}
