use thiserror::Error;

/// Failure talking to the address registry or the grid-operator proxy.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("{service} returned HTTP {status}")]
    Status { service: &'static str, status: u16 },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("address {id} has no access-point coordinates")]
    MissingCoordinates { id: String },
}

impl LookupError {
    pub fn status(service: &'static str, status: reqwest::StatusCode) -> Self {
        Self::Status {
            service,
            status: status.as_u16(),
        }
    }
}
