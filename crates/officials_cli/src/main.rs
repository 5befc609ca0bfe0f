//! `officials` command-line entry point.
//!
//! # Responsibility
//! - Expose lifecycle operations over a local SQLite database.
//! - Print machine-readable JSON for every command except `ping`.
//!
//! # Invariants
//! - Failures are reported as operation-scoped messages and a non-zero exit
//!   code; the process never panics on bad input.

mod cli;
mod response;

use clap::Parser;
use log::warn;
use officials_core::{
    default_log_level, init_logging, LifecycleError, LifecycleService, MetricsService,
    OfficialDraft, OfficialListQuery, SqliteRecordStore,
};
use serde::Serialize;
use std::process::ExitCode;
use std::sync::Arc;

use crate::cli::{Cli, Commands};
use crate::response::{ActionResponse, MetricsResponse};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Commands::Ping = cli.command {
        println!("officials_core ping={}", officials_core::ping());
        println!("officials_core version={}", officials_core::core_version());
        return ExitCode::SUCCESS;
    }

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let store = match SqliteRecordStore::open(&cli.db) {
        Ok(store) => Arc::new(store),
        Err(err) => {
            return print_action(ActionResponse::failure(format!(
                "failed to open database `{}`: {err}",
                cli.db.display()
            )))
        }
    };

    run(cli.command, store).await
}

async fn run(command: Commands, store: Arc<SqliteRecordStore>) -> ExitCode {
    let lifecycle = LifecycleService::new(store.clone());

    match command {
        Commands::Ping => ExitCode::SUCCESS,
        Commands::Create {
            name,
            age,
            document,
            position,
            profession,
            procedure,
            status,
            entry_date,
        } => {
            let draft = OfficialDraft {
                full_name: name.unwrap_or_default(),
                age,
                document_id: document.unwrap_or_default(),
                position: position.unwrap_or_default(),
                profession: profession.unwrap_or_default(),
                procedure: procedure.unwrap_or_default(),
                status,
                entry_date,
            };
            let response = match lifecycle.create_official(draft).await {
                Ok(official_id) => ActionResponse::success("Official created.", official_id),
                Err(err) => failure_response("create", err),
            };
            print_action(response)
        }
        Commands::Status {
            official_id,
            status,
        } => {
            let response = match lifecycle.change_status(official_id, status).await {
                Ok(change) => ActionResponse::success(
                    format!(
                        "Status changed from {} to {}; {} event(s) scheduled.",
                        change.from,
                        change.to,
                        change.scheduled_events.len()
                    ),
                    official_id,
                ),
                Err(err) => failure_response("status", err),
            };
            print_action(response)
        }
        Commands::Delete { official_id } => {
            let response = match lifecycle.delete_official(official_id).await {
                Ok(summary) => ActionResponse::success(
                    format!(
                        "Official deleted with {} role(s), {} inventory item(s), {} event(s).",
                        summary.roles_removed, summary.inventory_removed, summary.events_removed
                    ),
                    official_id,
                ),
                Err(err) => failure_response("delete", err),
            };
            print_action(response)
        }
        Commands::Officials {
            search,
            status,
            procedure,
        } => {
            let query = OfficialListQuery {
                search,
                status,
                procedure,
            };
            match lifecycle.list_officials(&query).await {
                Ok(officials) => print_json(&officials),
                Err(err) => print_action(failure_response("officials", err)),
            }
        }
        Commands::Events { official } => match lifecycle.list_events(official).await {
            Ok(events) => print_json(&events),
            Err(err) => print_action(failure_response("events", err)),
        },
        Commands::Metrics => {
            let report = MetricsService::new(store).aggregate().await;
            let response = MetricsResponse::from(report);
            if emit_json(&response) && response.ok {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn failure_response(command: &str, err: LifecycleError) -> ActionResponse {
    warn!("event=cli_command module=cli status=error command={command} error={err}");
    let message = format!("{command} failed: {err}");
    match err {
        LifecycleError::SchedulingFailed { official_id, .. }
        | LifecycleError::CascadeInterrupted { official_id, .. }
        | LifecycleError::OrphanedDependents { official_id, .. } => {
            ActionResponse::partial(message, official_id)
        }
        _ => ActionResponse::failure(message),
    }
}

fn print_action(response: ActionResponse) -> ExitCode {
    if emit_json(&response) && response.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn print_json<T: Serialize>(value: &T) -> ExitCode {
    if emit_json(value) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn emit_json<T: Serialize>(value: &T) -> bool {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            true
        }
        Err(err) => {
            eprintln!("failed to encode output: {err}");
            false
        }
    }
}
