use super::{apply_config, load_config_file};
use clap::{CommandFactory, FromArgMatches};
use reqwest::Method;
use tempfile::tempdir;

use crate::args::{LoadArgs, OutputFormat};

fn parse_with_matches(argv: &[&str]) -> Result<(LoadArgs, clap::ArgMatches), String> {
    let matches = LoadArgs::command()
        .try_get_matches_from(argv)
        .map_err(|err| format!("parse failed: {}", err))?;
    let args = LoadArgs::from_arg_matches(&matches).map_err(|err| err.to_string())?;
    Ok((args, matches))
}

#[test]
fn parse_toml_config() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("loadrig.toml");
    let content = r#"
url = "http://<ServerIP>:8080/ping"
method = "post"
headers = ["X-Run: nightly"]
concurrency = 4
duration = 2
timeout = 50
redir = true
disable_keep_alive = true
server_ips = ["10.0.0.1", "10.0.0.2"]
output_format = "json"
"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let config = load_config_file(&path).map_err(|err| err.to_string())?;
    if config.url.as_deref() != Some("http://<ServerIP>:8080/ping") {
        return Err("Unexpected url".to_owned());
    }
    if config.redirects != Some(true) || config.disable_keepalive != Some(true) {
        return Err("Expected aliases to be honored".to_owned());
    }
    if config.server_ips.as_ref().map(Vec::len) != Some(2) {
        return Err("Unexpected server_ips".to_owned());
    }
    if config.output_format != Some(OutputFormat::Json) {
        return Err("Unexpected output_format".to_owned());
    }
    Ok(())
}

#[test]
fn parse_json_config() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("loadrig.json");
    std::fs::write(&path, r#"{"url":"http://localhost","concurrency":3,"http2":false}"#)
        .map_err(|err| format!("write failed: {}", err))?;

    let config = load_config_file(&path).map_err(|err| err.to_string())?;
    if config.concurrency != Some(3) || config.http2 != Some(false) {
        return Err("Unexpected json config values".to_owned());
    }
    Ok(())
}

#[test]
fn config_rejects_unknown_extension() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("loadrig.yaml");
    std::fs::write(&path, "url: x").map_err(|err| format!("write failed: {}", err))?;
    if load_config_file(&path).is_ok() {
        return Err("Expected unsupported extension error".to_owned());
    }
    Ok(())
}

#[test]
fn config_values_do_not_override_cli() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("loadrig.toml");
    std::fs::write(
        &path,
        "url = \"http://config\"\nconcurrency = 7\nduration = 3\nmethod = \"PUT\"\n",
    )
    .map_err(|err| format!("write failed: {}", err))?;
    let config = load_config_file(&path).map_err(|err| err.to_string())?;

    let (mut args, matches) = parse_with_matches(&["loadrig", "-c", "2", "http://cli"])?;
    apply_config(&mut args, &matches, &config).map_err(|err| err.to_string())?;

    if args.url.as_deref() != Some("http://cli") {
        return Err("CLI url should win".to_owned());
    }
    if args.concurrency.get() != 2 {
        return Err("CLI concurrency should win".to_owned());
    }
    if args.duration_secs.get() != 3 {
        return Err("Config duration should apply".to_owned());
    }
    if args.method != Method::PUT {
        return Err("Config method should apply".to_owned());
    }
    Ok(())
}

#[test]
fn config_rejects_zero_concurrency() -> Result<(), String> {
    let config = super::types::ConfigFile {
        concurrency: Some(0),
        ..Default::default()
    };
    let (mut args, matches) = parse_with_matches(&["loadrig", "http://cli"])?;
    if apply_config(&mut args, &matches, &config).is_ok() {
        return Err("Expected zero concurrency to be rejected".to_owned());
    }
    Ok(())
}
