use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::{Args, Subcommand};
use colored::*;

use crate::api::UploadMetadata;
use crate::config::Config;
use crate::cli::output;
use crate::workflows::policy;

#[derive(Subcommand)]
pub enum PolicyCommands {
    /// List policy documents
    List,
    /// Upload a policy document
    Upload(UploadArgs),
    /// Delete a policy document
    Delete(DeleteArgs),
}

#[derive(Args)]
pub struct UploadArgs {
    /// Local file to upload
    #[arg(long)]
    pub file: PathBuf,

    #[arg(long)]
    pub title: String,

    /// Policy category (Leave, Conduct, Safety, ...)
    #[arg(long)]
    pub category: String,

    #[arg(long, default_value = "")]
    pub description: String,

    #[arg(long, default_value = "1.0")]
    pub version: String,

    /// Effective date; today when omitted
    #[arg(long, default_value = "")]
    pub effective_date: String,

    #[arg(long, default_value = "")]
    pub uploaded_by: String,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Drive file id
    #[arg(long)]
    pub file_id: String,
}

pub async fn handle(command: PolicyCommands) -> Result<()> {
    let config = Config::load()?;
    let client = crate::cli::build_client(&config)?;
    let folder_id = config.require_policy_folder()?;

    match command {
        PolicyCommands::List => {
            let files = policy::list(&client, folder_id).await?;
            if files.is_empty() {
                println!("{}", "No policy documents".dimmed());
                return Ok(());
            }
            for file in &files {
                println!(
                    "{}  {}  {}",
                    file.id.dimmed(),
                    file.name.bold(),
                    file.view_url()
                );
            }
            println!("{}", format!("{} document(s)", files.len()).dimmed());
            Ok(())
        }
        PolicyCommands::Upload(args) => {
            let effective_date = if args.effective_date.is_empty() {
                Utc::now().format("%d/%m/%Y").to_string()
            } else {
                args.effective_date.clone()
            };
            let meta = UploadMetadata {
                title: args.title,
                category: args.category,
                description: args.description,
                version: args.version,
                effective_date,
                uploaded_by: args.uploaded_by,
            };
            let url = policy::upload(&client, folder_id, &args.file, &meta).await?;
            output::print_success(&format!("Uploaded: {}", url));
            Ok(())
        }
        PolicyCommands::Delete(args) => {
            policy::delete(&client, &args.file_id).await?;
            output::print_success(&format!("Deleted {}", args.file_id));
            Ok(())
        }
    }
}
