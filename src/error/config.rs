use std::net::IpAddr;
use std::path::PathBuf;

use thiserror::Error;

use super::ValidationError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Duration must be > 0.")]
    DurationZero,
    #[error("Concurrency must be > 0.")]
    ConcurrencyZero,
    #[error("Timeout must be > 0.")]
    TimeoutZero,
    #[error("Target URL must not be empty.")]
    EmptyUrl,
    #[error("multi-server-IP requires placeholder in URL (use '{placeholder}' instead of a real server IP)")]
    MissingServerIpPlaceholder { placeholder: &'static str },
    #[error("client IP not available locally: {ip}")]
    ClientIpUnavailable { ip: IpAddr },
    #[error("Failed to check client IP {ip}: {source}")]
    ClientIpProbe {
        ip: IpAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid IP literal '{value}': {source}")]
    InvalidIpLiteral {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Unsupported URL scheme '{scheme}' in '{url}'. Use http or https.")]
    UnsupportedScheme { url: String, scheme: String },
    #[error("URL '{url}' has no host.")]
    UrlMissingHost { url: String },
    #[error("--cert requires --key.")]
    CertRequiresKey,
    #[error("--key requires --cert.")]
    KeyRequiresCert,
    #[error("Failed to read TLS file '{path}': {source}")]
    ReadTlsFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid header name '{header}': {source}")]
    InvalidHeaderName {
        header: String,
        #[source]
        source: reqwest::header::InvalidHeaderName,
    },
    #[error("Invalid header value for '{header}': {source}")]
    InvalidHeaderValue {
        header: String,
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },
    #[error("could not read file '{path}': {source}")]
    ReadBodyFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read playback file '{path}': {source}")]
    ReadPlaybackFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Playback file '{path}' was empty.")]
    PlaybackFileEmpty { path: PathBuf },
    #[error("Failed to read config '{path}': {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse TOML config '{path}': {source}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to parse JSON config '{path}': {source}")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Unsupported config extension '{ext}'. Use .toml or .json.")]
    UnsupportedExtension { ext: String },
    #[error("Config file must have .toml or .json extension.")]
    MissingExtension,
    #[error("Invalid config field '{field}': {source}")]
    InvalidField {
        field: &'static str,
        #[source]
        source: ValidationError,
    },
}
