use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Filter variable checked before `RUST_LOG`.
const LOG_ENV: &str = "LOADRIG_LOG";

/// Installs the global subscriber. Logs go to stderr so the summary on
/// stdout stays machine readable.
pub fn init_logging(verbose: bool) {
    let filter = std::env::var(LOG_ENV)
        .or_else(|_| std::env::var("RUST_LOG"))
        .map_or_else(
            |_| default_filter(verbose),
            |value| EnvFilter::try_new(value).unwrap_or_else(|_| default_filter(verbose)),
        );

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}

fn default_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_logging_is_idempotent() -> Result<(), String> {
        init_logging(false);
        init_logging(true);
        if !tracing::dispatcher::has_been_set() {
            return Err("global subscriber was not installed".to_owned());
        }
        let replacement = FmtSubscriber::builder().finish();
        if tracing::subscriber::set_global_default(replacement).is_ok() {
            return Err("global subscriber was replaced".to_owned());
        }
        Ok(())
    }
}
