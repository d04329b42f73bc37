//! Command-line argument structures.
//!
//! Isolates clap derivations so `main.rs` stays focused on runtime logic.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::api::{CANVAS_GRAPHQL_URL, ClientOptions};
use crate::filters::{ACTIVE_TERM, ListFilter};

/// Top-level parser for `canvasgraphql`.
#[derive(Parser, Debug)]
#[command(
    name = "canvasgraphql",
    version,
    about = "List Canvas LMS courses and assignments over GraphQL"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,
    #[command(subcommand)]
    pub command: Command,
}

/// Options that apply to every sub-command.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Canvas API access token
    #[arg(short = 't', long, env = "CANVAS_API_TOKEN", hide_env_values = true)]
    pub token: String,
    /// GraphQL endpoint of the Canvas instance
    #[arg(long, env = "CANVAS_GRAPHQL_URL", default_value = CANVAS_GRAPHQL_URL)]
    pub endpoint: String,
    /// Term whose courses count as active
    #[arg(long, env = "CANVAS_ACTIVE_TERM", default_value = ACTIVE_TERM)]
    pub active_term: String,
    /// Write HTTP transcript to this file for debugging
    #[arg(long)]
    pub transcript: Option<PathBuf>,
    /// HTTP request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub http_timeout: Option<u64>,
    /// HTTP connection timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub connect_timeout: Option<u64>,
    /// Log level used when `RUST_LOG` is unset
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,
}

impl GlobalArgs {
    /// Client settings derived from the transcript and timeout flags.
    #[must_use]
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            transcript: self.transcript.clone(),
            request_timeout: self.http_timeout.map(Duration::from_secs),
            connect_timeout: self.connect_timeout.map(Duration::from_secs),
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List course names in (or outside) the active term
    ListCourses(FilterArgs),
    /// List assignments of the course whose name contains COURSE
    ListAssignments(ListAssignmentsArgs),
}

/// The `--active`/`--no-active` pair shared by both sub-commands.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct FilterArgs {
    /// List active items (the default)
    #[arg(long)]
    pub active: bool,
    /// List non-active items instead; wins over --active
    #[arg(long = "no-active")]
    pub no_active: bool,
}

impl FilterArgs {
    #[must_use]
    pub fn filter(self) -> ListFilter {
        ListFilter::from_flags(self.active, self.no_active)
    }
}

#[derive(Args, Debug, Clone)]
pub struct ListAssignmentsArgs {
    /// Case-insensitive fragment of the course name
    pub course: String,
    #[command(flatten)]
    pub filter: FilterArgs,
}
