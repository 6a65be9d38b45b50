use std::time::Duration;

pub(crate) const DEFAULT_USER_AGENT: &str = concat!("loadrig/", env!("CARGO_PKG_VERSION"));

/// Default config filenames checked when `--config` is not given.
pub(crate) const DEFAULT_CONFIG_FILES: [&str; 2] = ["loadrig.toml", "loadrig.json"];

/// Timeout used when none was requested: the whole run duration.
pub(crate) const fn default_timeout(duration: Duration) -> Duration {
    duration
}
