//! Logger bootstrap.
//!
//! Centralizes `env_logger` initialization so the binary and tests agree on
//! one diagnostic channel behind the `log` facade.

use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
///
/// `filter` follows the `env_logger` syntax (e.g. `"info"`,
/// `"shapebox_host=debug,wasmtime=warn"`). When absent, `RUST_LOG` is
/// honored, falling back to info-level visibility.
pub fn init_logging(filter: Option<&str>) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = filter {
            builder.parse_filters(filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        builder.init();
        log::debug!("logging initialized");
    });
}
