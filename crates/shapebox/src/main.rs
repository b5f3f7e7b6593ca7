use anyhow::Result;

use shapebox_host::config::HostConfig;
use shapebox_host::logging::init_logging;
use shapebox_host::window::Runtime;

fn main() -> Result<()> {
    init_logging(None);

    let mut config = HostConfig::default();
    if let Some(path) = std::env::args_os().nth(1) {
        config.module_path = path.into();
    }

    log::info!("hosting simulation module {}", config.module_path.display());
    Runtime::run(config)
}
