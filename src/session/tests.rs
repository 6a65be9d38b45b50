use super::*;
use std::net::Ipv4Addr;
use tempfile::tempdir;

fn params(url: &str) -> SessionParams {
    SessionParams::new(url, Duration::from_secs(1), 2)
}

fn expect_err(result: Result<SessionConfig, ConfigError>) -> Result<ConfigError, String> {
    match result {
        Ok(_) => Err("Expected configuration error".to_owned()),
        Err(err) => Ok(err),
    }
}

#[test]
fn session_builds_from_minimal_params() -> Result<(), String> {
    let session = SessionConfig::new(params("http://127.0.0.1:8080/ping"))
        .map_err(|err| err.to_string())?;
    if session.concurrency.get() != 2 || session.duration != Duration::from_secs(1) {
        return Err("Unexpected session values".to_owned());
    }
    if !session.client_ips.is_empty() || !session.server_ips.is_empty() {
        return Err("Expected empty pools".to_owned());
    }
    Ok(())
}

#[test]
fn session_rejects_zero_duration_and_concurrency() -> Result<(), String> {
    let mut zero_duration = params("http://localhost");
    zero_duration.duration = Duration::ZERO;
    if !matches!(
        expect_err(SessionConfig::new(zero_duration))?,
        ConfigError::DurationZero
    ) {
        return Err("Expected DurationZero".to_owned());
    }

    let mut zero_workers = params("http://localhost");
    zero_workers.concurrency = 0;
    if !matches!(
        expect_err(SessionConfig::new(zero_workers))?,
        ConfigError::ConcurrencyZero
    ) {
        return Err("Expected ConcurrencyZero".to_owned());
    }
    Ok(())
}

#[test]
fn session_rejects_empty_url() -> Result<(), String> {
    if !matches!(
        expect_err(SessionConfig::new(params("   ")))?,
        ConfigError::EmptyUrl
    ) {
        return Err("Expected EmptyUrl".to_owned());
    }
    Ok(())
}

#[test]
fn server_pool_requires_placeholder() -> Result<(), String> {
    let mut raw = params("http://10.0.0.1/ping");
    raw.server_ips = vec!["10.0.0.1".to_owned(), "10.0.0.2".to_owned()];
    let err = expect_err(SessionConfig::new(raw))?;
    if !matches!(err, ConfigError::MissingServerIpPlaceholder { .. }) {
        return Err(format!("Unexpected error: {}", err));
    }
    if !err.to_string().contains("placeholder") {
        return Err("Expected placeholder in message".to_owned());
    }
    Ok(())
}

#[test]
fn invalid_ip_literal_is_rejected() -> Result<(), String> {
    let mut raw = params("http://<ServerIP>/ping");
    raw.server_ips = vec!["10.0.0.300".to_owned()];
    if !matches!(
        expect_err(SessionConfig::new(raw))?,
        ConfigError::InvalidIpLiteral { .. }
    ) {
        return Err("Expected InvalidIpLiteral for server pool".to_owned());
    }

    let mut raw = params("http://localhost/ping");
    raw.client_ips = vec!["not-an-ip".to_owned()];
    if !matches!(
        expect_err(SessionConfig::new(raw))?,
        ConfigError::InvalidIpLiteral { .. }
    ) {
        return Err("Expected InvalidIpLiteral for client pool".to_owned());
    }
    Ok(())
}

#[test]
fn loopback_client_ip_is_available() -> Result<(), String> {
    let mut raw = params("http://localhost/ping");
    raw.client_ips = vec!["127.0.0.1".to_owned()];
    let session = SessionConfig::new(raw).map_err(|err| err.to_string())?;
    if session.client_ips != [IpAddr::V4(Ipv4Addr::LOCALHOST)] {
        return Err("Unexpected client pool".to_owned());
    }
    Ok(())
}

#[test]
fn foreign_client_ip_is_unavailable() -> Result<(), String> {
    // 192.0.2.0/24 is reserved for documentation and never configured locally.
    let mut raw = params("http://localhost/ping");
    raw.client_ips = vec!["192.0.2.77".to_owned()];
    if !matches!(
        expect_err(SessionConfig::new(raw))?,
        ConfigError::ClientIpUnavailable { .. }
    ) {
        return Err("Expected ClientIpUnavailable".to_owned());
    }
    Ok(())
}

#[test]
fn client_and_server_pools_assign_round_robin() -> Result<(), String> {
    let mut raw = params("http://<ServerIP>/ping");
    raw.concurrency = 5;
    raw.client_ips = vec!["127.0.0.1".to_owned(), "127.0.0.2".to_owned()];
    raw.server_ips = vec![
        "10.0.0.1".to_owned(),
        "10.0.0.2".to_owned(),
        "10.0.0.3".to_owned(),
    ];
    // 127.0.0.2 is only bindable where the whole loopback /8 is routed locally.
    let session = match SessionConfig::new(raw) {
        Ok(session) => session,
        Err(ConfigError::ClientIpUnavailable { .. }) => return Ok(()),
        Err(err) => return Err(err.to_string()),
    };

    for index in 0..5 {
        let assignment = session.assignment(index);
        let expected_client = session.client_ips.get(index % 2).copied();
        let expected_server = session.server_ips.get(index % 3).copied();
        if assignment.client_ip != expected_client || assignment.server_ip != expected_server {
            return Err(format!("Unexpected assignment for worker {}", index));
        }
    }
    Ok(())
}

#[test]
fn empty_pools_assign_nothing() -> Result<(), String> {
    let session = SessionConfig::new(params("http://localhost")).map_err(|err| err.to_string())?;
    let assignment = session.assignment(3);
    if assignment.client_ip.is_some() || assignment.server_ip.is_some() {
        return Err("Expected no explicit addresses".to_owned());
    }
    if round_robin::<u8>(&[], 0).is_some() {
        return Err("Expected empty pool to yield None".to_owned());
    }
    Ok(())
}

#[test]
fn placeholder_is_substituted_per_assignment() -> Result<(), String> {
    let template = UrlTemplate::new("http://<ServerIP>/ping".to_owned());
    let pool: Vec<IpAddr> = vec![
        IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)),
        IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2)),
    ];
    let urls: Vec<String> = (0..4)
        .map(|index| template.resolve(round_robin(&pool, index)).into_owned())
        .collect();
    let expected = [
        "http://10.0.0.1/ping",
        "http://10.0.0.2/ping",
        "http://10.0.0.1/ping",
        "http://10.0.0.2/ping",
    ];
    if urls != expected {
        return Err(format!("Unexpected urls {:?}", urls));
    }

    let v6 = "::1".parse::<IpAddr>().map_err(|err| err.to_string())?;
    if template.resolve(Some(v6)) != "http://[::1]/ping" {
        return Err("Expected bracketed IPv6 host".to_owned());
    }
    if template.resolve(None) != "http://<ServerIP>/ping" {
        return Err("Expected template untouched without server IP".to_owned());
    }
    Ok(())
}

#[test]
fn host_override_does_not_replace_explicit_header() -> Result<(), String> {
    let mut raw = params("http://localhost");
    raw.host = Some("override.example".to_owned());
    let session = SessionConfig::new(raw.clone()).map_err(|err| err.to_string())?;
    if session.headers.get(HOST).map(HeaderValue::as_bytes) != Some(b"override.example".as_slice())
    {
        return Err("Expected host override".to_owned());
    }

    raw.headers = vec![("host".to_owned(), "explicit.example".to_owned())];
    let session = SessionConfig::new(raw).map_err(|err| err.to_string())?;
    if session.headers.get(HOST).map(HeaderValue::as_bytes) != Some(b"explicit.example".as_slice())
    {
        return Err("Expected explicit Host header to win".to_owned());
    }
    Ok(())
}

#[test]
fn duplicate_header_keys_keep_last_value() -> Result<(), String> {
    let mut raw = params("http://localhost");
    raw.headers = vec![
        ("X-Env".to_owned(), "a".to_owned()),
        ("x-env".to_owned(), "b".to_owned()),
    ];
    let session = SessionConfig::new(raw).map_err(|err| err.to_string())?;
    let values: Vec<&HeaderValue> = session.headers.get_all("x-env").iter().collect();
    if values.len() != 1 || values.first().map(|value| value.as_bytes()) != Some(b"b".as_slice())
    {
        return Err(format!("Unexpected header values {:?}", values));
    }
    Ok(())
}

#[test]
fn cert_and_key_are_all_or_nothing() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let cert = dir.path().join("client.pem");
    std::fs::write(&cert, "pem").map_err(|err| format!("write failed: {}", err))?;

    let mut raw = params("https://localhost");
    raw.cert = Some(cert.clone());
    if !matches!(
        expect_err(SessionConfig::new(raw))?,
        ConfigError::CertRequiresKey
    ) {
        return Err("Expected CertRequiresKey".to_owned());
    }

    let mut raw = params("https://localhost");
    raw.key = Some(cert);
    if !matches!(
        expect_err(SessionConfig::new(raw))?,
        ConfigError::KeyRequiresCert
    ) {
        return Err("Expected KeyRequiresCert".to_owned());
    }
    Ok(())
}

#[test]
fn unreadable_ca_is_a_config_error() -> Result<(), String> {
    let mut raw = params("https://localhost");
    raw.ca = Some(PathBuf::from("/nonexistent/loadrig/ca.pem"));
    if !matches!(
        expect_err(SessionConfig::new(raw))?,
        ConfigError::ReadTlsFile { .. }
    ) {
        return Err("Expected ReadTlsFile".to_owned());
    }
    Ok(())
}

#[test]
fn unsupported_scheme_is_rejected() -> Result<(), String> {
    if !matches!(
        expect_err(SessionConfig::new(params("ftp://localhost/file")))?,
        ConfigError::UnsupportedScheme { .. }
    ) {
        return Err("Expected UnsupportedScheme".to_owned());
    }
    Ok(())
}

#[test]
fn redirect_mode_follows_flags() -> Result<(), String> {
    let mut flags = TransportFlags::default();
    if flags.redirect_mode() != RedirectMode::Terminal {
        return Err("Expected Terminal by default".to_owned());
    }
    flags.redirect_errors = true;
    if flags.redirect_mode() != RedirectMode::Error {
        return Err("Expected Error".to_owned());
    }
    flags.allow_redirects = true;
    if flags.redirect_mode() != RedirectMode::Follow {
        return Err("Expected Follow".to_owned());
    }
    Ok(())
}
