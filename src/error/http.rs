use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Invalid CA certificate: {source}")]
    InvalidCacert {
        #[source]
        source: reqwest::Error,
    },
    #[error("Invalid cert/key: {source}")]
    InvalidIdentity {
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to build HTTP client for worker {worker}: {source}")]
    BuildClientFailed {
        worker: usize,
        #[source]
        source: reqwest::Error,
    },
}
