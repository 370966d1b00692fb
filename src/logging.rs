use env_logger::Env;

/// Diagnostics go to stderr; stdout carries the capture log stream.
pub fn init() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();
}
