use thiserror::Error;

/// Errors returned by the places client and aggregator.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Network, timeout, or non-2xx failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream envelope reported a status other than `OK`/`ZERO_RESULTS`.
    #[error("places API error: {status} - {message}")]
    Upstream { status: String, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Rejected before any network call.
    #[error("validation error: {0}")]
    Validation(String),

    /// Geocoding found nothing for the query.
    #[error("location not found ({details}): {message}")]
    LocationNotFound { details: String, message: String },

    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),
}

impl PlacesError {
    /// Short label used when logging why the fallback set was served.
    #[must_use]
    pub fn fallback_reason(&self) -> &'static str {
        match self {
            Self::Http(e) if e.is_connect() || e.is_timeout() => "network error",
            Self::Upstream { status, .. } if status == "REQUEST_DENIED" => "api key denied",
            Self::Http(_) | Self::Upstream { .. } => "upstream error",
            Self::Deserialize { .. } => "malformed response",
            Self::Validation(_) | Self::LocationNotFound { .. } | Self::InvalidBaseUrl(_) => {
                "unexpected error"
            }
        }
    }
}
