//! Entry point for the `canvasgraphql` command-line tool.

use std::process::ExitCode;

use canvasgraphql::commands::{run_list_assignments, run_list_courses};
use canvasgraphql::{CanvasClient, CanvasError, Cli, Command, CommandContext};
use clap::Parser;
use env_logger::Env;
use log::{debug, error};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(cli.global.log_level.as_str()))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_broken_pipe() => {
            debug!("stdout closed early: {e}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            if !e.logged_at_source() {
                error!("{e}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CanvasError> {
    let client = CanvasClient::new(
        cli.global.token.as_str(),
        cli.global.endpoint.as_str(),
        cli.global.client_options(),
    )?;
    let stdout = std::io::stdout();
    match cli.command {
        Command::ListCourses(flags) => {
            let ctx = CommandContext::new(flags.filter(), cli.global.active_term);
            run_list_courses(&client, &ctx, stdout).await
        }
        Command::ListAssignments(args) => {
            let ctx = CommandContext::new(args.filter.filter(), cli.global.active_term);
            run_list_assignments(&client, &args.course, &ctx, stdout).await
        }
    }
}
