use serde::Deserialize;

use crate::args::OutputFormat;

/// File-level equivalent of the CLI flags. Every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub method: Option<String>,
    pub headers: Option<Vec<String>>,
    pub host: Option<String>,
    pub body: Option<String>,
    pub playback: Option<String>,
    pub concurrency: Option<usize>,
    /// Seconds.
    pub duration: Option<u64>,
    /// Milliseconds.
    pub timeout: Option<u64>,
    #[serde(alias = "redir")]
    pub redirects: Option<bool>,
    pub redirect_errors: Option<bool>,
    pub disable_compression: Option<bool>,
    #[serde(alias = "disable_keep_alive")]
    pub disable_keepalive: Option<bool>,
    pub insecure: Option<bool>,
    pub cert: Option<String>,
    pub key: Option<String>,
    pub ca: Option<String>,
    pub http2: Option<bool>,
    pub client_ips: Option<Vec<String>>,
    pub server_ips: Option<Vec<String>>,
    pub output_format: Option<OutputFormat>,
}
