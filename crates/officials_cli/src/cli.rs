//! Command-line arguments for the `officials` binary.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use officials_core::EmploymentStatus;
use std::path::PathBuf;
use uuid::Uuid;

/// Officials lifecycle engine - personnel records, schedules, and metrics
#[derive(Parser, Debug)]
#[command(name = "officials")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// SQLite database file; created and migrated on first use
    #[arg(long, env = "OFFICIALS_DB", default_value = "officials.sqlite3", global = true)]
    pub db: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "OFFICIALS_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, env = "OFFICIALS_LOG_DIR", global = true)]
    pub log_dir: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check core linkage and print the core version
    Ping,

    /// Register an official and schedule its mandatory events
    Create {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        age: Option<u32>,

        /// Identity document number
        #[arg(long)]
        document: Option<String>,

        #[arg(long)]
        position: Option<String>,

        #[arg(long)]
        profession: Option<String>,

        /// Hiring procedure label
        #[arg(long)]
        procedure: Option<String>,

        /// PROVISIONAL, POSITIONED, INACTIVE or FOLLOW_UP
        #[arg(long, value_parser = parse_status)]
        status: Option<EmploymentStatus>,

        /// Entry date as YYYY-MM-DD
        #[arg(long, value_parser = parse_date)]
        entry_date: Option<NaiveDate>,
    },

    /// Change an official's employment status
    Status {
        official_id: Uuid,

        #[arg(value_parser = parse_status)]
        status: EmploymentStatus,
    },

    /// Delete an official with its roles, inventory, and events
    Delete { official_id: Uuid },

    /// List officials as JSON
    Officials {
        /// Case-insensitive match on name, document, or position
        #[arg(long)]
        search: Option<String>,

        #[arg(long, value_parser = parse_status)]
        status: Option<EmploymentStatus>,

        #[arg(long)]
        procedure: Option<String>,
    },

    /// List scheduled events as JSON
    Events {
        /// Only events of this official
        #[arg(long)]
        official: Option<Uuid>,
    },

    /// Print dashboard metrics as JSON
    Metrics,
}

fn parse_status(value: &str) -> Result<EmploymentStatus, String> {
    let normalized = value.trim().to_ascii_uppercase().replace('-', "_");
    EmploymentStatus::parse(&normalized).ok_or_else(|| {
        format!("unknown status `{value}`; expected PROVISIONAL|POSITIONED|INACTIVE|FOLLOW_UP")
    })
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|err| format!("invalid date `{value}`: {err}"))
}

#[cfg(test)]
mod tests {
    use super::{parse_date, parse_status, Cli};
    use clap::CommandFactory;
    use officials_core::EmploymentStatus;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn status_parsing_is_case_insensitive() {
        assert_eq!(parse_status("follow-up"), Ok(EmploymentStatus::FollowUp));
        assert_eq!(parse_status(" positioned"), Ok(EmploymentStatus::Positioned));
        assert!(parse_status("retired").is_err());
    }

    #[test]
    fn dates_use_iso_format() {
        assert!(parse_date("2024-02-29").is_ok());
        assert!(parse_date("29/02/2024").is_err());
    }
}
