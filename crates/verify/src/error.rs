/// Errors from the verification integrations.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// The caller supplied a malformed identifier.
    #[error("{0}")]
    InvalidInput(String),

    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("{service} request failed: {source}")]
    Request {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The upstream service returned a non-2xx status code.
    #[error("{service} returned HTTP {status}")]
    HttpStatus { service: &'static str, status: u16 },

    /// The upstream response could not be understood.
    #[error("{service} response could not be decoded: {message}")]
    Decode {
        service: &'static str,
        message: String,
    },
}

impl VerifyError {
    /// Whether the failure is the caller's fault rather than upstream.
    pub fn is_client_error(&self) -> bool {
        matches!(self, VerifyError::InvalidInput(_))
    }

    /// The upstream service involved, if any.
    pub fn service(&self) -> Option<&'static str> {
        match self {
            VerifyError::InvalidInput(_) => None,
            VerifyError::Request { service, .. }
            | VerifyError::HttpStatus { service, .. }
            | VerifyError::Decode { service, .. } => Some(service),
        }
    }
}
