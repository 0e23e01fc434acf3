use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Subcommand};

use crate::cache::{self, MemoryCache};
use crate::cli::output::{self, OutputFormat};
use crate::config::Config;
use crate::workflows::after_joining::{self, OnboardingUpdate};

#[derive(Subcommand)]
pub enum AfterJoiningCommands {
    /// Joined employees awaiting onboarding
    List(ListArgs),
    /// Next free employee code
    NextCode,
    /// Complete onboarding for one joining serial
    Complete(CompleteArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Show onboarded employees instead of pending ones
    #[arg(long)]
    pub history: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct CompleteArgs {
    /// Joining serial number (SN-###)
    #[arg(long)]
    pub joining_no: String,

    /// Employee code; generated when omitted
    #[arg(long)]
    pub employee_code: Option<String>,

    #[arg(long)]
    pub reporting_officer: String,

    #[arg(long, default_value = "")]
    pub salary_confirmation: String,

    #[arg(long, default_value = "")]
    pub base_address: String,

    #[arg(long, default_value = "")]
    pub punch_code: String,

    #[arg(long, default_value = "")]
    pub official_email: String,

    #[arg(long, default_value = "")]
    pub email_password: String,

    #[arg(long, default_value = "")]
    pub pf_esic: String,

    #[arg(long, default_value = "")]
    pub incentive_category: String,

    #[arg(long, default_value = "")]
    pub laptop: String,

    #[arg(long, default_value = "")]
    pub mobile: String,
}

const COLUMNS: &[(&str, &str)] = &[
    ("joining_no", "Serial"),
    ("candidate_name", "Name"),
    ("date_of_joining", "Joined"),
    ("designation", "Designation"),
    ("department", "Department"),
    ("employee_code", "Code"),
];

pub async fn handle(command: AfterJoiningCommands) -> Result<()> {
    let config = Config::load()?;
    let client = crate::cli::build_client(&config)?;
    let mut cache = MemoryCache::new(cache::TTL_AFTER_JOINING_MS);

    match command {
        AfterJoiningCommands::List(args) => {
            let buckets =
                after_joining::load(&client, &mut cache, cache::wall_clock_ms()).await?;
            let records = if args.history {
                buckets.history
            } else {
                buckets.pending
            };
            output::print_records(&records, COLUMNS, args.format)
        }
        AfterJoiningCommands::NextCode => {
            let buckets =
                after_joining::load(&client, &mut cache, cache::wall_clock_ms()).await?;
            let all: Vec<_> = buckets
                .pending
                .iter()
                .chain(buckets.history.iter())
                .cloned()
                .collect();
            println!("{}", after_joining::next_employee_code(&all));
            Ok(())
        }
        AfterJoiningCommands::Complete(args) => {
            let buckets =
                after_joining::load(&client, &mut cache, cache::wall_clock_ms()).await?;
            let all: Vec<_> = buckets
                .pending
                .iter()
                .chain(buckets.history.iter())
                .cloned()
                .collect();
            let record = all
                .iter()
                .find(|r| r.trimmed("joining_no") == args.joining_no.trim())
                .with_context(|| format!("Joining '{}' not found", args.joining_no))?;

            let employee_code = args
                .employee_code
                .clone()
                .unwrap_or_else(|| after_joining::next_employee_code(&all));
            let update = OnboardingUpdate {
                employee_code: employee_code.clone(),
                salary_confirmation: args.salary_confirmation,
                reporting_officer: args.reporting_officer,
                base_address: args.base_address,
                punch_code: args.punch_code,
                official_email: args.official_email,
                email_password: args.email_password,
                pf_esic: args.pf_esic,
                id_proof_copy: String::new(),
                joining_letter: String::new(),
                incentive_category: args.incentive_category,
                laptop_details: args.laptop,
                mobile_name: args.mobile,
                manual_image_url: String::new(),
            };
            after_joining::record_onboarding(&client, &mut cache, record, &update, Utc::now())
                .await?;
            output::print_success(&format!(
                "Onboarded {} as {}",
                record.trimmed("candidate_name"),
                employee_code
            ));
            Ok(())
        }
    }
}
