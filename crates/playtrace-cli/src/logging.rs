//! Tracing subscriber setup.

use color_eyre::eyre::eyre;
use playtrace_core::LogConfig;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init(config: &LogConfig) -> color_eyre::Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.level))?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    let result = if config.is_json() {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| eyre!(e))
}
