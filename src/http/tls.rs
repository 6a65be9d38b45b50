use reqwest::ClientBuilder;

use crate::error::HttpError;
use crate::session::SessionConfig;

pub(super) fn apply_tls_settings(
    mut builder: ClientBuilder,
    session: &SessionConfig,
) -> Result<ClientBuilder, HttpError> {
    if let Some(bytes) = session.tls.ca_cert.as_ref() {
        let cert = reqwest::Certificate::from_pem(bytes)
            .map_err(|err| HttpError::InvalidCacert { source: err })?;
        builder = builder.add_root_certificate(cert);
    }

    if let Some(identity) = session.tls.identity.as_ref() {
        let identity = reqwest::Identity::from_pkcs8_pem(&identity.cert_pem, &identity.key_pem)
            .map_err(|err| HttpError::InvalidIdentity { source: err })?;
        builder = builder.identity(identity);
    }

    if session.flags.insecure {
        builder = builder
            .danger_accept_invalid_certs(true)
            .danger_accept_invalid_hostnames(true);
    }

    // h2 is offered through ALPN; without it the client stays on HTTP/1.1.
    if !session.flags.http2 {
        builder = builder.http1_only();
    }

    Ok(builder)
}
