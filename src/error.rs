//! Error type shared by the client, the response model and the commands.

use thiserror::Error;

use crate::api::StatusClass;

#[derive(Error, Debug)]
pub enum CanvasError {
    #[error("API token cannot be empty")]
    EmptyToken,
    #[error("endpoint URL cannot be empty")]
    EmptyEndpoint,
    #[error("invalid endpoint URL '{endpoint}': {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid header value for {name}")]
    Header {
        name: &'static str,
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },
    #[error("request failed when running {context}: {source}")]
    Request {
        context: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("HTTP request was interrupted")]
    Interrupted,
    #[error("{class} with status code {status}")]
    HttpStatus { status: u16, class: StatusClass },
    #[error("malformed response: {message} | response body snippet: {snippet}")]
    BadResponseSerde { message: String, snippet: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CanvasError {
    /// Whether the error stems from a closed standard output.
    #[must_use]
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == std::io::ErrorKind::BrokenPipe)
    }

    /// Whether the client or a command already logged this failure at warn
    /// or above.
    ///
    /// Informational and redirect statuses are only logged at info by the
    /// client, so they still need reporting when they end a command.
    #[must_use]
    pub fn logged_at_source(&self) -> bool {
        match self {
            Self::Request { .. } | Self::Interrupted | Self::BadResponseSerde { .. } => true,
            Self::HttpStatus { class, .. } => {
                !matches!(class, StatusClass::Informational | StatusClass::Redirect)
            }
            Self::EmptyToken
            | Self::EmptyEndpoint
            | Self::InvalidEndpoint { .. }
            | Self::Header { .. }
            | Self::Io(_) => false,
        }
    }
}
