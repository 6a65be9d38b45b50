use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{LoadArgs, PositiveU64, PositiveUsize, parse_header, parse_method};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments that were not set on the
/// command line.
///
/// # Errors
///
/// Returns an error when a config value is invalid.
pub fn apply_config(
    args: &mut LoadArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_cli(matches, "url")
        && let Some(url) = config.url.clone()
    {
        args.url = Some(url);
    }

    if !is_cli(matches, "method")
        && let Some(method) = config.method.as_deref()
    {
        args.method = parse_method(method).map_err(|err| {
            AppError::config(ConfigError::InvalidField {
                field: "method",
                source: err,
            })
        })?;
    }

    if !is_cli(matches, "headers")
        && let Some(headers) = config.headers.as_ref()
    {
        let mut parsed = Vec::with_capacity(headers.len());
        for header in headers {
            parsed.push(parse_header(header).map_err(|err| {
                AppError::config(ConfigError::InvalidField {
                    field: "headers",
                    source: err,
                })
            })?);
        }
        args.headers = parsed;
    }

    apply_value(&mut args.host, matches, "host", config.host.clone());
    apply_value(&mut args.playback_file, matches, "playback_file", config.playback.clone());
    apply_value(&mut args.cert, matches, "cert", config.cert.clone());
    apply_value(&mut args.key, matches, "key", config.key.clone());
    apply_value(&mut args.ca, matches, "ca", config.ca.clone());

    if !is_cli(matches, "body")
        && let Some(body) = config.body.clone()
    {
        args.body = body;
    }

    if !is_cli(matches, "concurrency")
        && let Some(concurrency) = config.concurrency
    {
        args.concurrency = PositiveUsize::try_from(concurrency).map_err(|err| {
            AppError::config(ConfigError::InvalidField {
                field: "concurrency",
                source: err,
            })
        })?;
    }

    if !is_cli(matches, "duration_secs")
        && let Some(duration) = config.duration
    {
        args.duration_secs = ensure_positive_u64(duration, "duration")?;
    }

    if !is_cli(matches, "timeout_ms")
        && let Some(timeout) = config.timeout
    {
        args.timeout_ms = Some(ensure_positive_u64(timeout, "timeout")?);
    }

    apply_flag(&mut args.allow_redirects, matches, "allow_redirects", config.redirects);
    apply_flag(
        &mut args.redirect_errors,
        matches,
        "redirect_errors",
        config.redirect_errors,
    );
    apply_flag(
        &mut args.disable_compression,
        matches,
        "disable_compression",
        config.disable_compression,
    );
    apply_flag(
        &mut args.disable_keepalive,
        matches,
        "disable_keepalive",
        config.disable_keepalive,
    );
    apply_flag(&mut args.insecure, matches, "insecure", config.insecure);
    apply_flag(&mut args.http2, matches, "http2", config.http2);

    if !is_cli(matches, "client_ips")
        && let Some(ips) = config.client_ips.clone()
    {
        args.client_ips = ips;
    }

    if !is_cli(matches, "server_ips")
        && let Some(ips) = config.server_ips.clone()
    {
        args.server_ips = ips;
    }

    if !is_cli(matches, "output_format")
        && let Some(format) = config.output_format
    {
        args.output_format = format;
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn apply_value(
    target: &mut Option<String>,
    matches: &ArgMatches,
    name: &str,
    value: Option<String>,
) {
    if !is_cli(matches, name)
        && let Some(value) = value
    {
        *target = Some(value);
    }
}

fn apply_flag(target: &mut bool, matches: &ArgMatches, name: &str, value: Option<bool>) {
    if !is_cli(matches, name)
        && let Some(value) = value
    {
        *target = value;
    }
}

fn ensure_positive_u64(value: u64, field: &'static str) -> AppResult<PositiveU64> {
    PositiveU64::try_from(value)
        .map_err(|err| AppError::config(ConfigError::InvalidField { field, source: err }))
}
