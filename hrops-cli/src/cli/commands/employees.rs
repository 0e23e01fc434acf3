use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::output::{self, OutputFormat};
use crate::config::Config;
use crate::workflows::employees;

#[derive(Subcommand)]
pub enum EmployeesCommands {
    /// List the employee roster
    List(ListArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Substring filter over id, name, designation and mobile
    #[arg(long, default_value = "")]
    pub query: String,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

const COLUMNS: &[(&str, &str)] = &[
    ("employee_id", "Id"),
    ("name", "Name"),
    ("designation", "Designation"),
    ("mobile_no", "Mobile"),
    ("join_date", "Joined"),
    ("status", "Status"),
];

pub async fn handle(command: EmployeesCommands) -> Result<()> {
    let config = Config::load()?;
    let client = crate::cli::build_client(&config)?;

    match command {
        EmployeesCommands::List(args) => {
            let records = employees::list(&client).await?;
            let matches: Vec<_> = employees::search(&records, &args.query)
                .into_iter()
                .cloned()
                .collect();
            output::print_records(&matches, COLUMNS, args.format)
        }
    }
}
