use anyhow::Result;
use chrono::Utc;
use clap::{Args, Subcommand};

use crate::cli::output::{self, OutputFormat};
use crate::config::Config;
use crate::workflows::leaving::{self, LeavingForm};

#[derive(Subcommand)]
pub enum LeavingCommands {
    /// Employees with a leave planned (or already left, with --history)
    List(ListArgs),
    /// Record an employee's leaving
    Submit(SubmitArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Show employees who already left
    #[arg(long)]
    pub history: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct SubmitArgs {
    /// Employee code (PMMPL-###)
    #[arg(long)]
    pub employee_code: String,

    /// Date of leaving
    #[arg(long)]
    pub date: String,

    /// Last working date
    #[arg(long)]
    pub last_working_date: String,

    #[arg(long)]
    pub reason: String,

    /// Type of leave (Resignation, Termination, ...)
    #[arg(long)]
    pub type_of_leave: String,

    #[arg(long, default_value = "")]
    pub mobile: String,

    #[arg(long, default_value = "")]
    pub working_days: String,

    /// Settlement amount
    #[arg(long, default_value = "")]
    pub amount: String,
}

const COLUMNS: &[(&str, &str)] = &[
    ("employee_code", "Code"),
    ("candidate_name", "Name"),
    ("designation", "Designation"),
    ("department", "Department"),
    ("leaving_planned", "Planned"),
    ("leaving_actual", "Actual"),
];

pub async fn handle(command: LeavingCommands) -> Result<()> {
    let config = Config::load()?;
    let client = crate::cli::build_client(&config)?;

    match command {
        LeavingCommands::List(args) => {
            let buckets = leaving::load(&client).await?;
            let records = if args.history {
                buckets.history
            } else {
                buckets.pending
            };
            output::print_records(&records, COLUMNS, args.format)
        }
        LeavingCommands::Submit(args) => {
            let employee = leaving::find_employee(&client, &args.employee_code).await?;
            let form = LeavingForm {
                date_of_leaving: args.date,
                last_working_date: args.last_working_date,
                reason: args.reason,
                type_of_leave: args.type_of_leave,
                mobile_no: args.mobile,
                working_days: args.working_days,
                amount: args.amount,
            };
            leaving::submit(&client, &employee, &form, Utc::now()).await?;
            output::print_success(&format!(
                "Recorded leaving of {}",
                employee.trimmed("candidate_name")
            ));
            Ok(())
        }
    }
}
