//! Library behind the `canvasgraphql` binary.
//!
//! Exposes the client, response model, filters and commands so integration
//! tests can drive them directly.

pub mod api;
pub mod cli_args;
pub mod commands;
pub mod due_date;
mod error;
pub mod filters;
pub mod graphql_queries;
pub mod models;
pub mod printer;
#[cfg(test)]
mod test_utils;

pub use api::{CanvasClient, ClientOptions};
pub use cli_args::{Cli, Command, FilterArgs, GlobalArgs, ListAssignmentsArgs};
pub use commands::CommandContext;
pub use error::CanvasError;
pub use filters::ListFilter;
