//! Logging setup and panic reporting.

use tracing::Level;

/// Environment variable overriding the configured log level.
pub const LOG_ENV: &str = "HT_LOG";

fn parse_level(raw: &str) -> Option<Level> {
    raw.trim().parse().ok()
}

/// Level from `HT_LOG` if set and valid, else the configured one, else info.
pub fn resolve_level(env_value: Option<&str>, configured: &str) -> Level {
    env_value
        .and_then(parse_level)
        .or_else(|| parse_level(configured))
        .unwrap_or(Level::INFO)
}

/// Install the global subscriber. Logs go to stderr so command output on
/// stdout stays machine-readable.
pub fn init(configured: &str) {
    let env_value = std::env::var(LOG_ENV).ok();
    let level = resolve_level(env_value.as_deref(), configured);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    if parse_level(configured).is_none() {
        tracing::warn!("Unknown log level '{configured}', using {level}");
    }
}

/// Report panics through tracing, then defer to the default hook.
pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!("panic: {info}");
        default_hook(info);
    }));
}
