//! Canvas GraphQL client and request orchestration.

mod helpers;
mod outcome;
mod transcript;
mod types;

use std::path::PathBuf;
use std::time::Duration;

use log::{debug, error};
use reqwest::header::HeaderMap;

use crate::CanvasError;

use self::helpers::{build_headers, operation_name};
use self::transcript::{TranscriptWriter, open_transcript};

pub(crate) use self::helpers::{BODY_SNIPPET_LEN, snippet};
pub use self::outcome::{HttpOutcome, StatusClass};
pub use self::types::{CANVAS_GRAPHQL_URL, Endpoint, Payload, Query, Token};


/// Status and body of a response before classification.
#[derive(Debug)]
struct HttpResponse {
    status: u16,
    body: String,
}

/// Optional knobs applied when building the underlying HTTP client.
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    /// Write one JSON line per round-trip to this file.
    pub transcript: Option<PathBuf>,
    /// Overall timeout for each request.
    pub request_timeout: Option<Duration>,
    /// Timeout for establishing the connection.
    pub connect_timeout: Option<Duration>,
}

/// Client for the Canvas GraphQL endpoint.
///
/// Holds the bearer token headers and endpoint fixed at construction; every
/// call is a single POST with no retries.
pub struct CanvasClient {
    client: reqwest::Client,
    headers: HeaderMap,
    endpoint: Endpoint,
    transcript: Option<TranscriptWriter>,
}

impl CanvasClient {
    /// Create a client for `endpoint` authenticated with `token`.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::EmptyToken`] or [`CanvasError::EmptyEndpoint`]
    /// when either argument is blank, [`CanvasError::InvalidEndpoint`] when the
    /// endpoint is not an absolute URL, and [`CanvasError::Header`] when the
    /// token cannot be used in an `Authorization` header.
    pub fn new(
        token: impl Into<Token>,
        endpoint: impl Into<Endpoint>,
        options: ClientOptions,
    ) -> Result<Self, CanvasError> {
        let token = token.into();
        let endpoint = endpoint.into();
        if token.is_blank() {
            return Err(CanvasError::EmptyToken);
        }
        if endpoint.is_blank() {
            return Err(CanvasError::EmptyEndpoint);
        }
        endpoint.validate()?;
        let headers = build_headers(&token)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = options.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let client = builder.build().map_err(|source| CanvasError::Request {
            context: "building HTTP client".to_string(),
            source,
        })?;

        Ok(Self {
            client,
            headers,
            endpoint,
            transcript: open_transcript(options.transcript.as_deref()),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Wrap `query` in a `{"query": ...}` envelope and send it.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Request`] on transport failure and
    /// [`CanvasError::Interrupted`] when interrupted while waiting.
    pub async fn send_course_query(&self, query: &Query) -> Result<HttpOutcome, CanvasError> {
        self.post(&query.to_payload()).await
    }

    /// Send an already-built request envelope.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Request`] on transport failure and
    /// [`CanvasError::Interrupted`] when interrupted while waiting.
    pub async fn send_assignment_query(
        &self,
        payload: &Payload,
    ) -> Result<HttpOutcome, CanvasError> {
        self.post(payload).await
    }

    #[expect(
        clippy::integer_division_remainder_used,
        reason = "tokio::select! uses % internally"
    )]
    async fn post(&self, payload: &Payload) -> Result<HttpOutcome, CanvasError> {
        let operation = payload
            .query()
            .and_then(operation_name)
            .unwrap_or("anonymous query")
            .to_string();
        debug!("POST {} ({operation})", self.endpoint.as_str());

        let response = tokio::select! {
            res = self.execute(payload) => res.map_err(|source| {
                error!("I/O error during HTTP communication for {operation}: {source}");
                CanvasError::Request {
                    context: operation.clone(),
                    source,
                }
            })?,
            Ok(()) = tokio::signal::ctrl_c() => {
                error!("HTTP request for {operation} was interrupted");
                return Err(CanvasError::Interrupted);
            }
        };

        self.log_transcript(payload, &operation, &response);
        let outcome = HttpOutcome::classify(response.status, response.body);
        outcome.log(&operation);
        Ok(outcome)
    }

    async fn execute(&self, payload: &Payload) -> Result<HttpResponse, reqwest::Error> {
        let response = self
            .client
            .post(self.endpoint.as_str())
            .headers(self.headers.clone())
            .json(payload.as_value())
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}
