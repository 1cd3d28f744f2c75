// 🪵 Telemetry - logging setup shared by the CLI and the server

use std::sync::Once;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Install the global subscriber.
///
/// Reads `SALARY_LOG` (e.g. `SALARY_LOG=salary_insights=debug`), falling back to
/// `salary_insights=info`. Safe to call more than once.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("SALARY_LOG")
            .unwrap_or_else(|_| EnvFilter::new("salary_insights=info"));

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(filter)
            .init();
    });
}
