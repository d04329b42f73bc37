//! Access to the Canvas GraphQL endpoint.
//!
//! [`CanvasClient`] posts request envelopes and reports each round-trip as an
//! [`HttpOutcome`] tagged by status-code family. Turning a successful body
//! into typed data is left to [`crate::models`].

mod client;

pub(crate) use client::{BODY_SNIPPET_LEN, snippet};
pub use client::{
    CANVAS_GRAPHQL_URL, CanvasClient, ClientOptions, Endpoint, HttpOutcome, Payload, Query,
    StatusClass, Token,
};
