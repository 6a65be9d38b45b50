//! Immutable per-run session configuration and its validation.
mod ip;
mod target;

#[cfg(test)]
mod tests;

use std::net::IpAddr;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use bytes::Bytes;
use reqwest::Method;
use reqwest::header::{HOST, HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::error::ConfigError;

pub use ip::{ensure_local_ip, parse_ip_pool, round_robin};
pub use target::{SERVER_IP_PLACEHOLDER, UrlTemplate};

/// Transport switches shared by every worker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransportFlags {
    pub allow_redirects: bool,
    pub redirect_errors: bool,
    pub disable_compression: bool,
    pub disable_keepalive: bool,
    pub insecure: bool,
    pub http2: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectMode {
    /// Redirects are chased by the client.
    Follow,
    /// A redirect response ends the request successfully.
    Terminal,
    /// A redirect response counts as a failed request.
    Error,
}

impl TransportFlags {
    #[must_use]
    pub const fn redirect_mode(&self) -> RedirectMode {
        if self.allow_redirects {
            RedirectMode::Follow
        } else if self.redirect_errors {
            RedirectMode::Error
        } else {
            RedirectMode::Terminal
        }
    }
}

/// PEM material read from disk while the session is built.
#[derive(Debug, Clone, Default)]
pub struct TlsMaterial {
    pub identity: Option<ClientIdentity>,
    pub ca_cert: Option<Vec<u8>>,
}

#[derive(Debug, Clone)]
pub struct ClientIdentity {
    pub cert_pem: Vec<u8>,
    pub key_pem: Vec<u8>,
}

/// Raw, already-parsed run parameters as they come from the CLI or config.
#[derive(Debug, Clone)]
pub struct SessionParams {
    pub url: String,
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub host: Option<String>,
    pub body: Vec<u8>,
    pub duration: Duration,
    pub concurrency: usize,
    pub timeout: Duration,
    pub flags: TransportFlags,
    pub cert: Option<PathBuf>,
    pub key: Option<PathBuf>,
    pub ca: Option<PathBuf>,
    pub client_ips: Vec<String>,
    pub server_ips: Vec<String>,
}

impl SessionParams {
    /// Parameters for a plain GET run with default flags.
    #[must_use]
    pub fn new(url: impl Into<String>, duration: Duration, concurrency: usize) -> Self {
        Self {
            url: url.into(),
            method: Method::GET,
            headers: Vec::new(),
            host: None,
            body: Vec::new(),
            duration,
            concurrency,
            timeout: duration,
            flags: TransportFlags {
                http2: true,
                ..TransportFlags::default()
            },
            cert: None,
            key: None,
            ca: None,
            client_ips: Vec::new(),
            server_ips: Vec::new(),
        }
    }
}

/// Validated run configuration, shared read-only by all workers.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub target: UrlTemplate,
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Bytes,
    pub duration: Duration,
    pub concurrency: NonZeroUsize,
    pub timeout: Duration,
    pub flags: TransportFlags,
    pub tls: TlsMaterial,
    pub client_ips: Vec<IpAddr>,
    pub server_ips: Vec<IpAddr>,
}

/// The client/server addresses handed to one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerAssignment {
    pub index: usize,
    pub client_ip: Option<IpAddr>,
    pub server_ip: Option<IpAddr>,
}

impl SessionConfig {
    /// Validates `params` and builds the session.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for a zero duration/concurrency/timeout, an
    /// empty or unparsable URL, a server IP pool without the placeholder, an
    /// invalid or non-local client IP, invalid headers, or unreadable TLS
    /// material.
    pub fn new(params: SessionParams) -> Result<Self, ConfigError> {
        if params.duration.is_zero() {
            return Err(ConfigError::DurationZero);
        }
        let concurrency =
            NonZeroUsize::new(params.concurrency).ok_or(ConfigError::ConcurrencyZero)?;
        if params.timeout.is_zero() {
            return Err(ConfigError::TimeoutZero);
        }
        if params.url.trim().is_empty() {
            return Err(ConfigError::EmptyUrl);
        }
        let target = UrlTemplate::new(params.url.trim().to_owned());

        let client_ips = parse_ip_pool(&params.client_ips)?;
        let server_ips = parse_ip_pool(&params.server_ips)?;
        if !server_ips.is_empty() && !target.has_placeholder() {
            return Err(ConfigError::MissingServerIpPlaceholder {
                placeholder: SERVER_IP_PLACEHOLDER,
            });
        }
        for ip in &client_ips {
            ensure_local_ip(*ip)?;
        }
        validate_url(&target.resolve(server_ips.first().copied()))?;

        let headers = build_headers(&params.headers, params.host.as_deref())?;
        let tls = load_tls_material(
            params.cert.as_deref(),
            params.key.as_deref(),
            params.ca.as_deref(),
        )?;

        Ok(Self {
            target,
            method: params.method,
            headers,
            body: Bytes::from(params.body),
            duration: params.duration,
            concurrency,
            timeout: params.timeout,
            flags: params.flags,
            tls,
            client_ips,
            server_ips,
        })
    }

    /// Round-robin assignment of pool entries to worker `index`.
    #[must_use]
    pub fn assignment(&self, index: usize) -> WorkerAssignment {
        WorkerAssignment {
            index,
            client_ip: round_robin(&self.client_ips, index),
            server_ip: round_robin(&self.server_ips, index),
        }
    }
}

fn validate_url(candidate: &str) -> Result<(), ConfigError> {
    let parsed = Url::parse(candidate).map_err(|err| ConfigError::InvalidUrl {
        url: candidate.to_owned(),
        source: err,
    })?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ConfigError::UnsupportedScheme {
                url: candidate.to_owned(),
                scheme: other.to_owned(),
            });
        }
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(ConfigError::UrlMissingHost {
            url: candidate.to_owned(),
        });
    }
    Ok(())
}

fn build_headers(
    headers: &[(String, String)],
    host: Option<&str>,
) -> Result<HeaderMap, ConfigError> {
    let mut map = HeaderMap::with_capacity(headers.len().saturating_add(1));
    for (key, value) in headers {
        let name = HeaderName::from_bytes(key.as_bytes()).map_err(|err| {
            ConfigError::InvalidHeaderName {
                header: key.clone(),
                source: err,
            }
        })?;
        let val = HeaderValue::from_str(value).map_err(|err| ConfigError::InvalidHeaderValue {
            header: key.clone(),
            source: err,
        })?;
        map.insert(name, val);
    }
    if let Some(host) = host
        && !map.contains_key(HOST)
    {
        let val = HeaderValue::from_str(host).map_err(|err| ConfigError::InvalidHeaderValue {
            header: HOST.as_str().to_owned(),
            source: err,
        })?;
        map.insert(HOST, val);
    }
    Ok(map)
}

fn load_tls_material(
    cert: Option<&Path>,
    key: Option<&Path>,
    ca: Option<&Path>,
) -> Result<TlsMaterial, ConfigError> {
    let identity = match (cert, key) {
        (Some(cert), Some(key)) => Some(ClientIdentity {
            cert_pem: read_tls_file(cert)?,
            key_pem: read_tls_file(key)?,
        }),
        (Some(_), None) => return Err(ConfigError::CertRequiresKey),
        (None, Some(_)) => return Err(ConfigError::KeyRequiresCert),
        (None, None) => None,
    };
    let ca_cert = ca.map(read_tls_file).transpose()?;
    Ok(TlsMaterial { identity, ca_cert })
}

fn read_tls_file(path: &Path) -> Result<Vec<u8>, ConfigError> {
    std::fs::read(path).map_err(|err| ConfigError::ReadTlsFile {
        path: path.to_path_buf(),
        source: err,
    })
}
