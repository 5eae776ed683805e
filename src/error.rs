use crate::forms::FieldErrors;
use thiserror::Error;

/// Fallback shown whenever a failure carries no usable message.
pub const FALLBACK_MESSAGE: &str = "Something went wrong. Please try again.";

/// Shown for transport failures; the underlying detail only goes to the log.
pub const NETWORK_MESSAGE: &str = "Network error. Please check your connection and try again.";

/// Every way a dashboard request can fail. Nothing here is fatal: pages turn
/// these into a banner or inline field errors and stay usable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// The form did not pass its schema; no request was sent.
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(FieldErrors),

    /// The request never produced an HTTP response.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The server answered with `success: false` or a non-2xx status.
    #[error("server rejected request ({status}): {message}")]
    Server { status: u16, message: String },

    /// Anything else, e.g. a body we could not make sense of.
    #[error("unexpected failure: {0}")]
    Unexpected(String),

    /// The response arrived after the view stopped caring about it.
    #[error("request superseded")]
    Cancelled,
}

impl ClientError {
    /// Text for the page-level banner.
    pub fn banner_message(&self) -> String {
        match self {
            ClientError::Validation(_) => "Please fix the highlighted fields.".to_string(),
            ClientError::Transport(_) => NETWORK_MESSAGE.to_string(),
            ClientError::Server { message, .. } => message.clone(),
            ClientError::Unexpected(_) | ClientError::Cancelled => FALLBACK_MESSAGE.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Server { status: 404, .. })
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Unexpected(err.to_string())
    }
}

impl From<gloo_net::Error> for ClientError {
    fn from(err: gloo_net::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}
