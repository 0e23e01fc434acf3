use anyhow::Result;
use chrono::Utc;
use clap::{Args, Subcommand};

use crate::cli::output::{self, OutputFormat};
use crate::config::Config;
use crate::workflows::after_leaving::{self, Department};
use crate::workflows::leaving;

#[derive(Subcommand)]
pub enum AfterLeavingCommands {
    /// Clearance boards for all three departments
    List(ListArgs),
    /// Record one department's clearance
    Complete(CompleteArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Only this department (admin, account or store)
    #[arg(long)]
    pub department: Option<Department>,

    /// Show cleared employees instead of pending ones
    #[arg(long)]
    pub history: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct CompleteArgs {
    /// Department recording the clearance
    #[arg(long)]
    pub department: Department,

    /// Employee code (PMMPL-###)
    #[arg(long)]
    pub employee_code: String,

    /// What was collected or settled
    #[arg(long)]
    pub summary: String,
}

const COLUMNS: &[(&str, &str)] = &[
    ("employee_code", "Code"),
    ("candidate_name", "Name"),
    ("department", "Department"),
    ("leaving_actual", "Left"),
    ("advance_amount", "Advance"),
];

pub async fn handle(command: AfterLeavingCommands) -> Result<()> {
    let config = Config::load()?;
    let client = crate::cli::build_client(&config)?;

    match command {
        AfterLeavingCommands::List(args) => {
            let boards = after_leaving::load(&client).await?;
            for (name, buckets) in &boards {
                if let Some(wanted) = args.department {
                    if name != wanted.name() {
                        continue;
                    }
                }
                println!("== {} ==", name);
                let records = if args.history {
                    &buckets.history
                } else {
                    &buckets.pending
                };
                output::print_records(records, COLUMNS, args.format)?;
            }
            Ok(())
        }
        AfterLeavingCommands::Complete(args) => {
            let employee = leaving::find_employee(&client, &args.employee_code).await?;
            after_leaving::complete_step(
                &client,
                args.department,
                &employee,
                &args.summary,
                Utc::now(),
            )
            .await?;
            output::print_success(&format!(
                "{} clearance recorded for {}",
                args.department.name(),
                args.employee_code
            ));
            Ok(())
        }
    }
}
