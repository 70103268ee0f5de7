//! Logging utilities and structured logging support

/// Initialize the logging system with a fallback filter
///
/// `RUST_LOG` still wins when it is set; otherwise `default_filter` (for example
/// the `log_level` from [`crate::core::config::EngineConfig`]) is used. Calling
/// this twice is harmless: the second initialization is ignored.
pub fn init_with_filter(default_filter: &str) {
    let env = env_logger::Env::default().default_filter_or(default_filter);
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("Logger already initialized, keeping existing configuration");
    }
}
