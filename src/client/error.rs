use thiserror::Error;

/// Closed error taxonomy for outbound API calls. Every member is returned to
/// the caller as a distinct value; nothing is swallowed. Transport covers
/// connection failures, DNS failures and request timeouts alike.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not authorized (bad credentials)")]
    NotAuthorized,
    #[error("access forbidden")]
    Forbidden,
    #[error("internal server error")]
    ServerError,
    #[error("resource not found")]
    NotFound,
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unexpected status={0}")]
    UnexpectedStatus(u16),
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
}
