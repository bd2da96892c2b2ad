// logveil/src/logger.rs
//! Logger setup for the logveil binary.

use log::LevelFilter;

/// Initializes `env_logger`. A forced level wins over `RUST_LOG`; without one,
/// `RUST_LOG` decides and defaults to `warn`. Safe to call more than once.
pub fn init_logger(forced_level: Option<LevelFilter>) {
    let env = env_logger::Env::default().default_filter_or("warn");
    let mut builder = env_logger::Builder::from_env(env);
    if let Some(level) = forced_level {
        builder.filter_level(level);
    }
    builder.format_timestamp_millis().try_init().ok();
}

/// Maps the `--quiet` / `--debug` flags onto a forced level.
pub fn level_from_flags(quiet: bool, debug: bool) -> Option<LevelFilter> {
    match (quiet, debug) {
        (true, _) => Some(LevelFilter::Off),
        (false, true) => Some(LevelFilter::Debug),
        (false, false) => None,
    }
}
