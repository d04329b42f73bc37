//! Classification of HTTP responses by status-code family.

use std::fmt;

use log::{error, info, warn};

use crate::CanvasError;

/// The family a status code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Informational,
    Success,
    Redirect,
    ClientError,
    ServerError,
    Unknown,
}

impl StatusClass {
    #[must_use]
    pub fn of(status: u16) -> Self {
        match status {
            100..=199 => Self::Informational,
            200..=299 => Self::Success,
            300..=399 => Self::Redirect,
            400..=499 => Self::ClientError,
            500..=599 => Self::ServerError,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for StatusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Informational => "informational response",
            Self::Success => "success",
            Self::Redirect => "redirection",
            Self::ClientError => "client error",
            Self::ServerError => "server error",
            Self::Unknown => "unexpected response",
        })
    }
}

/// What a single round-trip produced.
///
/// Only [`HttpOutcome::Success`] carries the body; every other family keeps
/// just the status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpOutcome {
    Informational(u16),
    Success(String),
    Redirect(u16),
    ClientError(u16),
    ServerError(u16),
    Unknown(u16),
}

impl HttpOutcome {
    #[must_use]
    pub fn classify(status: u16, body: String) -> Self {
        match StatusClass::of(status) {
            StatusClass::Informational => Self::Informational(status),
            StatusClass::Success => Self::Success(body),
            StatusClass::Redirect => Self::Redirect(status),
            StatusClass::ClientError => Self::ClientError(status),
            StatusClass::ServerError => Self::ServerError(status),
            StatusClass::Unknown => Self::Unknown(status),
        }
    }

    #[must_use]
    pub fn class(&self) -> StatusClass {
        match self {
            Self::Informational(_) => StatusClass::Informational,
            Self::Success(_) => StatusClass::Success,
            Self::Redirect(_) => StatusClass::Redirect,
            Self::ClientError(_) => StatusClass::ClientError,
            Self::ServerError(_) => StatusClass::ServerError,
            Self::Unknown(_) => StatusClass::Unknown,
        }
    }

    /// Log the outcome at the severity of its status family.
    pub(super) fn log(&self, operation: &str) {
        match self {
            Self::Success(_) => {}
            Self::Informational(s) => {
                info!("informational response for {operation} with status code {s}");
            }
            Self::Redirect(s) => info!("redirection for {operation} with status code {s}"),
            Self::ClientError(s) => warn!("client error for {operation} with status code {s}"),
            Self::ServerError(s) => error!("server error for {operation} with status code {s}"),
            Self::Unknown(s) => error!("unexpected response status code for {operation}: {s}"),
        }
    }

    /// Take the body of a successful response.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::HttpStatus`] for every non-2xx outcome.
    pub fn into_body(self) -> Result<String, CanvasError> {
        let class = self.class();
        match self {
            Self::Success(body) => Ok(body),
            Self::Informational(status)
            | Self::Redirect(status)
            | Self::ClientError(status)
            | Self::ServerError(status)
            | Self::Unknown(status) => Err(CanvasError::HttpStatus { status, class }),
        }
    }
}
