//! Command-line interface
//!
//! One subcommand per HR workflow. Handlers live next to their argument
//! structs under `commands`; everything funnels through the shared client
//! built from the loaded configuration.

pub mod commands;
pub mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::api::{RequestConfig, SheetsClient};
use crate::config::Config;

#[derive(Parser)]
#[command(name = "hrops", about = "HR operations over the sheet endpoint", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Store endpoint and folder configuration
    Setup(commands::setup::SetupArgs),
    /// Enquiry call tracking
    #[command(subcommand)]
    Calls(commands::calls::CallsCommands),
    /// Recruitment indents
    #[command(subcommand)]
    Indent(commands::indent::IndentCommands),
    /// Joining pipeline
    #[command(subcommand)]
    Joining(commands::joining::JoiningCommands),
    /// Post-joining onboarding
    #[command(subcommand, name = "after-joining")]
    AfterJoining(commands::after_joining::AfterJoiningCommands),
    /// Leaving workflow
    #[command(subcommand)]
    Leaving(commands::leaving::LeavingCommands),
    /// Department clearance after leaving
    #[command(subcommand, name = "after-leaving")]
    AfterLeaving(commands::after_leaving::AfterLeavingCommands),
    /// HR policy documents
    #[command(subcommand)]
    Policy(commands::policy::PolicyCommands),
    /// Employee registry
    #[command(subcommand)]
    Employees(commands::employees::EmployeesCommands),
}

pub async fn run(cli: Cli) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Setup(args) => commands::setup::handle(args).await,
        Commands::Calls(cmd) => commands::calls::handle(cmd).await,
        Commands::Indent(cmd) => commands::indent::handle(cmd).await,
        Commands::Joining(cmd) => commands::joining::handle(cmd).await,
        Commands::AfterJoining(cmd) => commands::after_joining::handle(cmd).await,
        Commands::Leaving(cmd) => commands::leaving::handle(cmd).await,
        Commands::AfterLeaving(cmd) => commands::after_leaving::handle(cmd).await,
        Commands::Policy(cmd) => commands::policy::handle(cmd).await,
        Commands::Employees(cmd) => commands::employees::handle(cmd).await,
    }
}

/// Client over the configured endpoint with the uniform request policy.
pub(crate) fn build_client(config: &Config) -> Result<SheetsClient> {
    let endpoint = config.require_endpoint()?;
    Ok(SheetsClient::new(endpoint, RequestConfig::default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_structure_is_valid() {
        Cli::command().debug_assert();
    }
}
