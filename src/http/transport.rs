use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;

use crate::session::RedirectMode;

use super::execution::{drain_response_body, estimate_headers_size};

/// One completed request as seen by a worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exchange {
    pub latency: Duration,
    /// Body bytes plus the estimated size of the response header block.
    pub bytes: u64,
    pub status: u16,
}

/// Per-request failure. Counted by the worker, never fatal.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("request timed out")]
    Timeout,
    #[error("connection failed: {source}")]
    Connect {
        #[source]
        source: reqwest::Error,
    },
    #[error("request failed: {source}")]
    Transport {
        #[source]
        source: reqwest::Error,
    },
    #[error("redirect not followed (status {status})")]
    RedirectNotFollowed { status: u16 },
    #[error("unexpected status {status}")]
    UnexpectedStatus { status: u16 },
}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connect { source: err }
        } else {
            Self::Transport { source: err }
        }
    }
}

/// The capability a worker needs from its HTTP stack.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues one request to `url` and waits for the full response.
    ///
    /// # Errors
    ///
    /// Returns a `RequestError` on timeout, transport failure, or a status the
    /// redirect policy does not accept.
    async fn send(&self, url: &str) -> Result<Exchange, RequestError>;
}

/// `Transport` backed by a dedicated `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
    redirect_mode: RedirectMode,
}

impl ReqwestTransport {
    #[must_use]
    pub const fn new(
        client: Client,
        method: Method,
        headers: HeaderMap,
        body: Bytes,
        redirect_mode: RedirectMode,
    ) -> Self {
        Self {
            client,
            method,
            headers,
            body,
            redirect_mode,
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, url: &str) -> Result<Exchange, RequestError> {
        let start = Instant::now();
        let mut request = self
            .client
            .request(self.method.clone(), url)
            .headers(self.headers.clone());
        if !self.body.is_empty() {
            request = request.body(self.body.clone());
        }

        let response = request.send().await?;
        let status = response.status();
        let header_bytes = estimate_headers_size(response.headers());
        let body_bytes = drain_response_body(response).await?;
        let latency = start.elapsed();

        accept_status(status, self.redirect_mode)?;
        Ok(Exchange {
            latency,
            bytes: body_bytes.saturating_add(header_bytes),
            status: status.as_u16(),
        })
    }
}

pub(super) fn accept_status(status: StatusCode, mode: RedirectMode) -> Result<(), RequestError> {
    if status.is_success() {
        return Ok(());
    }
    if status.is_redirection() {
        return match mode {
            RedirectMode::Error => Err(RequestError::RedirectNotFollowed {
                status: status.as_u16(),
            }),
            RedirectMode::Terminal | RedirectMode::Follow => Ok(()),
        };
    }
    Err(RequestError::UnexpectedStatus {
        status: status.as_u16(),
    })
}
