use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::args::{LoadArgs, default_timeout};
use crate::error::{AppError, AppResult, ConfigError};
use crate::session::{SessionParams, TransportFlags};

/// Prefix marking a body argument as a file path.
const BODY_FILE_PREFIX: char = '@';

/// Target URL from the playback file when given, else the positional URL.
/// `Ok(None)` means no target was supplied at all.
///
/// # Errors
///
/// Returns an error when the playback file is unreadable or blank.
pub(crate) fn resolve_target(args: &LoadArgs) -> AppResult<Option<String>> {
    if let Some(path) = args.playback_file.as_deref() {
        return read_playback(Path::new(path)).map(Some);
    }
    Ok(args
        .url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_owned))
}

/// Turns parsed CLI arguments into raw session parameters.
///
/// # Errors
///
/// Returns an error when an `@file` body cannot be read.
pub(crate) fn resolve_params(args: &LoadArgs, url: String) -> AppResult<SessionParams> {
    let duration = Duration::from_secs(args.duration_secs.get());
    let timeout = args
        .timeout_ms
        .map_or_else(|| default_timeout(duration), |ms| Duration::from_millis(ms.get()));

    Ok(SessionParams {
        url,
        method: args.method.clone(),
        headers: args.headers.clone(),
        host: args.host.clone(),
        body: resolve_body(&args.body)?,
        duration,
        concurrency: args.concurrency.get(),
        timeout,
        flags: TransportFlags {
            allow_redirects: args.allow_redirects,
            redirect_errors: args.redirect_errors,
            disable_compression: args.disable_compression,
            disable_keepalive: args.disable_keepalive,
            insecure: args.insecure,
            http2: args.http2,
        },
        cert: args.cert.as_deref().map(PathBuf::from),
        key: args.key.as_deref().map(PathBuf::from),
        ca: args.ca.as_deref().map(PathBuf::from),
        client_ips: args.client_ips.clone(),
        server_ips: args.server_ips.clone(),
    })
}

fn resolve_body(body: &str) -> AppResult<Vec<u8>> {
    match body.strip_prefix(BODY_FILE_PREFIX) {
        Some(path) => std::fs::read(path).map_err(|err| {
            AppError::config(ConfigError::ReadBodyFile {
                path: PathBuf::from(path),
                source: err,
            })
        }),
        None => Ok(body.as_bytes().to_vec()),
    }
}

fn read_playback(path: &Path) -> AppResult<String> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::config(ConfigError::ReadPlaybackFile {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    let url = content.trim();
    if url.is_empty() {
        return Err(AppError::config(ConfigError::PlaybackFileEmpty {
            path: path.to_path_buf(),
        }));
    }
    Ok(url.to_owned())
}
