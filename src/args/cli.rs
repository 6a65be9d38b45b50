use clap::{ArgAction, Parser};
use reqwest::Method;

use super::parsers::{
    parse_bool_env, parse_header, parse_method, parse_positive_u64, parse_positive_usize,
};
use super::types::{OutputFormat, PositiveU64, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Async HTTP load generator: fixed-duration concurrent request streams with merged latency and throughput statistics.",
    next_help_heading = "Advanced Options"
)]
pub struct LoadArgs {
    /// Target URL (use <ServerIP> as the host when --msp is set)
    #[arg(value_name = "URL", help_heading = "Common Options")]
    pub url: Option<String>,

    /// Number of concurrent workers (connections)
    #[arg(
        long = "concurrency",
        short = 'c',
        default_value = "10",
        value_parser = parse_positive_usize,
        help_heading = "Common Options"
    )]
    pub concurrency: PositiveUsize,

    /// Duration of the test in seconds
    #[arg(
        long = "duration",
        short = 'd',
        default_value = "10",
        value_parser = parse_positive_u64,
        help_heading = "Common Options"
    )]
    pub duration_secs: PositiveU64,

    /// Socket/request timeout in ms (defaults to the test duration)
    #[arg(
        long = "timeout",
        short = 'T',
        value_parser = parse_positive_u64,
        help_heading = "Common Options"
    )]
    pub timeout_ms: Option<PositiveU64>,

    /// HTTP method
    #[arg(
        long = "method",
        short = 'M',
        default_value = "GET",
        value_parser = parse_method,
        help_heading = "Common Options"
    )]
    pub method: Method,

    /// Header to add to each request (repeatable, 'Name: Value')
    #[arg(
        long = "header",
        short = 'H',
        value_parser = parse_header,
        help_heading = "Common Options"
    )]
    pub headers: Vec<(String, String)>,

    /// Host header override
    #[arg(long = "host")]
    pub host: Option<String>,

    /// Request body string or @filename
    #[arg(long = "body", default_value = "")]
    pub body: String,

    /// Playback file containing the target URL
    #[arg(long = "playback", short = 'f')]
    pub playback_file: Option<String>,

    /// Follow redirects
    #[arg(long = "redir")]
    pub allow_redirects: bool,

    /// Count redirects that are not followed as errors
    #[arg(long = "redir-err")]
    pub redirect_errors: bool,

    /// Disable compression (do not send Accept-Encoding)
    #[arg(long = "no-c")]
    pub disable_compression: bool,

    /// Disable keep-alive (no TCP connection reuse between requests)
    #[arg(long = "no-ka")]
    pub disable_keepalive: bool,

    /// Skip verifying the server TLS certificate
    #[arg(long = "no-vr")]
    pub insecure: bool,

    /// Client certificate file (PEM)
    #[arg(long = "cert")]
    pub cert: Option<String>,

    /// Client private key file (PEM, PKCS#8)
    #[arg(long = "key")]
    pub key: Option<String>,

    /// CA certificate file to verify the peer against (PEM)
    #[arg(long = "ca")]
    pub ca: Option<String>,

    /// Negotiate HTTP/2 when the server offers it
    #[arg(
        long = "http",
        default_value_t = true,
        action = ArgAction::Set,
        value_parser = parse_bool_env
    )]
    pub http2: bool,

    /// Comma-separated client IP pool (example: 192.168.1.1,192.168.1.2)
    #[arg(long = "mcp", value_delimiter = ',')]
    pub client_ips: Vec<String>,

    /// Comma-separated server IP pool (example: 192.168.1.1,192.168.1.2)
    #[arg(long = "msp", value_delimiter = ',')]
    pub server_ips: Vec<String>,

    /// Path to a TOML or JSON config file
    #[arg(long = "config")]
    pub config: Option<String>,

    /// Summary output format
    #[arg(long = "output-format", default_value = "text", value_enum)]
    pub output_format: OutputFormat,

    /// Enable debug logging
    #[arg(
        long = "verbose",
        env = "LOADRIG_VERBOSE",
        default_value_t = false,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = parse_bool_env
    )]
    pub verbose: bool,
}
