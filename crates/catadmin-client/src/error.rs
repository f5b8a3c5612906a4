use catadmin_core::FormError;
use thiserror::Error;

/// Errors returned by the catalog API client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with `success: false` or a non-2xx status and a
    /// readable envelope. Carries the service message, or `"API error"`.
    #[error("catalog API error: {0}")]
    Api(String),

    /// A non-2xx status whose body was not a catalog envelope.
    #[error("unexpected HTTP status {status} for {context}")]
    UnexpectedStatus { status: u16, context: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A successful envelope arrived without the `data` member.
    #[error("response for {0} carried no data")]
    MissingData(String),

    /// A mutating call was attempted without a bearer token.
    #[error("no token found; log in before changing the catalog")]
    MissingToken,

    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error(transparent)]
    Form(#[from] FormError),
}
