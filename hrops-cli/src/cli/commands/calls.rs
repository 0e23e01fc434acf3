use anyhow::Result;
use chrono::Utc;
use clap::{Args, Subcommand};

use crate::cli::output::{self, OutputFormat};
use crate::config::Config;
use crate::workflows::enquiry::{self, CallLog};

#[derive(Subcommand)]
pub enum CallsCommands {
    /// Enquiries awaiting a call
    List(ListArgs),
    /// Record a call outcome
    Log(LogArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Show completed calls instead of pending ones
    #[arg(long)]
    pub history: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct LogArgs {
    /// Candidate enquiry number
    #[arg(long)]
    pub enquiry_no: String,

    /// Indent number the enquiry belongs to
    #[arg(long, default_value = "")]
    pub indent_no: String,

    /// Call outcome status (e.g. Joining, Reject, Call Back)
    #[arg(long)]
    pub status: String,

    /// What the candidate said
    #[arg(long)]
    pub says: String,

    /// Next call date (DD/MM/YYYY or YYYY-MM-DD)
    #[arg(long, default_value = "")]
    pub next_date: String,
}

const COLUMNS: &[(&str, &str)] = &[
    ("enquiry_no", "Enquiry"),
    ("candidate_name", "Candidate"),
    ("candidate_phone", "Phone"),
    ("applying_for_post", "Post"),
    ("department", "Department"),
    ("last_status", "Status"),
    ("next_call_date", "Next Call"),
];

pub async fn handle(command: CallsCommands) -> Result<()> {
    let config = Config::load()?;
    let client = crate::cli::build_client(&config)?;

    match command {
        CallsCommands::List(args) => {
            let board = enquiry::load(&client).await?;
            let records = if args.history {
                board.history
            } else {
                board.pending
            };
            output::print_records(&records, COLUMNS, args.format)
        }
        CallsCommands::Log(args) => {
            let log = CallLog {
                enquiry_no: args.enquiry_no,
                indent_no: args.indent_no,
                status: args.status,
                candidate_says: args.says,
                next_date: args.next_date,
            };
            enquiry::log_call(&client, &log, Utc::now()).await?;
            output::print_success(&format!("Call logged for {}", log.enquiry_no));
            Ok(())
        }
    }
}
