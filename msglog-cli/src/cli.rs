//! CLI parser.

use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use storage::period::{parse_period, PERIOD_FORMAT};

#[derive(Parser, Debug)]
#[command(name = "msglog")]
#[command(about = "Message log store CLI", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Overrides DATABASE_URL.
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Create the tables if missing.
    Init {
        /// Also insert DEBUG, INFO, WARN and ERROR levels when absent.
        #[arg(long)]
        seed_levels: bool,
    },
    /// Manage severity levels.
    Level {
        #[command(subcommand)]
        action: NameAction,
    },
    /// Manage source objects.
    Object {
        #[command(subcommand)]
        action: NameAction,
    },
    /// Record a message stamped with the current time.
    Log {
        #[arg(short, long)]
        level: String,
        #[arg(short, long)]
        object: String,
        text: String,
    },
    /// Print every message ordered by period.
    List {
        #[arg(long)]
        json: bool,
    },
    /// Print one page of messages with periods in [from, to] and the total in range.
    Range {
        /// Inclusive lower bound, "YYYY-MM-DD HH:MM:SS".
        #[arg(long, value_parser = parse_timestamp)]
        from: NaiveDateTime,
        /// Inclusive upper bound, "YYYY-MM-DD HH:MM:SS".
        #[arg(long, value_parser = parse_timestamp)]
        to: NaiveDateTime,
        /// Page size; defaults to MSGLOG_PAGE_SIZE.
        #[arg(long)]
        limit: Option<i64>,
        #[arg(long, default_value = "0")]
        offset: i64,
        #[arg(long)]
        json: bool,
    },
    /// Delete every message.
    Clear,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum NameAction {
    Add { name: String },
    List,
}

pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, String> {
    parse_period(value).map_err(|e| format!("expected {}: {}", PERIOD_FORMAT, e))
}
