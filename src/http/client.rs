use std::time::Duration;

use reqwest::header::{CONNECTION, HeaderValue};
use reqwest::{Client, redirect};
use tracing::error;

use crate::args::DEFAULT_USER_AGENT;
use crate::error::HttpError;
use crate::session::{RedirectMode, SessionConfig, WorkerAssignment};

use super::tls::apply_tls_settings;
use super::transport::ReqwestTransport;

/// Redirect hops followed when redirects are enabled.
const MAX_REDIRECTS: usize = 10;

/// Builds a dedicated client for one worker.
///
/// # Errors
///
/// Returns an error when the TLS material is invalid or the client cannot be
/// constructed.
pub fn build_client(
    session: &SessionConfig,
    assignment: &WorkerAssignment,
) -> Result<Client, HttpError> {
    let mut builder = Client::builder()
        .timeout(session.timeout)
        .user_agent(DEFAULT_USER_AGENT)
        .local_address(assignment.client_ip);

    builder = match session.flags.redirect_mode() {
        RedirectMode::Follow => builder.redirect(redirect::Policy::limited(MAX_REDIRECTS)),
        RedirectMode::Terminal | RedirectMode::Error => builder.redirect(redirect::Policy::none()),
    };

    if session.flags.disable_keepalive {
        builder = builder
            .pool_max_idle_per_host(0)
            .pool_idle_timeout(Some(Duration::from_secs(0)));
    }

    if session.flags.disable_compression {
        builder = builder.no_gzip();
    }

    builder = apply_tls_settings(builder, session)?;

    builder.build().map_err(|err| {
        error!("Failed to build HTTP client for worker {}: {}", assignment.index, err);
        HttpError::BuildClientFailed {
            worker: assignment.index,
            source: err,
        }
    })
}

/// Builds the transport used by one worker.
///
/// # Errors
///
/// Returns an error when the underlying client cannot be built.
pub fn build_transport(
    session: &SessionConfig,
    assignment: &WorkerAssignment,
) -> Result<ReqwestTransport, HttpError> {
    let client = build_client(session, assignment)?;
    let mut headers = session.headers.clone();
    if session.flags.disable_keepalive && !headers.contains_key(CONNECTION) {
        headers.insert(CONNECTION, HeaderValue::from_static("close"));
    }
    Ok(ReqwestTransport::new(
        client,
        session.method.clone(),
        headers,
        session.body.clone(),
        session.flags.redirect_mode(),
    ))
}
