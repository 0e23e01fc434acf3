use anyhow::Result;
use clap::Args;

use crate::cli::output;
use crate::config::Config;

#[derive(Args)]
pub struct SetupArgs {
    /// Apps Script web app URL
    #[arg(long)]
    pub endpoint_url: Option<String>,

    /// Drive folder id for policy documents
    #[arg(long)]
    pub policy_folder_id: Option<String>,

    /// Drive folder id for uploaded candidate files
    #[arg(long)]
    pub upload_folder_id: Option<String>,

    /// Print the current configuration instead of changing it
    #[arg(long)]
    pub show: bool,
}

pub async fn handle(args: SetupArgs) -> Result<()> {
    let mut config = Config::load()?;

    if args.show {
        println!("config file: {:?}", Config::config_path()?);
        println!("endpoint_url: {}", config.endpoint_url);
        println!("policy_folder_id: {}", config.policy_folder_id);
        println!("upload_folder_id: {}", config.upload_folder_id);
        return Ok(());
    }

    if let Some(url) = args.endpoint_url {
        config.endpoint_url = url;
    }
    if let Some(id) = args.policy_folder_id {
        config.policy_folder_id = id;
    }
    if let Some(id) = args.upload_folder_id {
        config.upload_folder_id = id;
    }
    config.save()?;
    output::print_success(&format!("Configuration saved to {:?}", Config::config_path()?));
    Ok(())
}
