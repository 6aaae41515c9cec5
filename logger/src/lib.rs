use log::LevelFilter;

/// Installs the process-wide logger.
///
/// Logs at `info` unless `RUST_LOG` says otherwise.
pub fn init() {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();
}
