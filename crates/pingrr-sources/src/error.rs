use thiserror::Error;

/// Failure talking to an external collaborator
#[derive(Debug, Error)]
pub enum SourceError {
    /// Timeout or connection failure; the service could not be reached at all
    #[error("{service} is unavailable: {message}")]
    Unavailable { service: &'static str, message: String },

    #[error("{service} returned HTTP {status}: {message}")]
    Api {
        service: &'static str,
        status: u16,
        message: String,
    },

    #[error("{service} request failed: {source}")]
    Http {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("could not parse {service} response: {message}")]
    Parse { service: &'static str, message: String },

    #[error("{service} response is missing `{field}`")]
    MissingField { service: &'static str, field: &'static str },
}

impl SourceError {
    /// Classify a reqwest error; timeouts and refused connections become
    /// [`SourceError::Unavailable`]
    pub fn from_reqwest(service: &'static str, err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            SourceError::Unavailable {
                service,
                message: err.to_string(),
            }
        } else if err.is_decode() {
            SourceError::Parse {
                service,
                message: err.to_string(),
            }
        } else {
            SourceError::Http { service, source: err }
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, SourceError::Unavailable { .. })
    }
}

/// Turn a non-2xx response into [`SourceError::Api`], keeping the body for the log
pub(crate) async fn check_status(
    service: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, SourceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(SourceError::Api {
        service,
        status: status.as_u16(),
        message,
    })
}
