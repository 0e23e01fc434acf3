use anyhow::Result;
use chrono::Utc;
use clap::{Args, Subcommand};

use crate::cli::output::{self, OutputFormat};
use crate::config::Config;
use crate::workflows::indent::{self, NewIndent};

#[derive(Subcommand)]
pub enum IndentCommands {
    /// Open indents (completed ones hidden unless --all)
    List(ListArgs),
    /// Raise a new indent
    Create(CreateArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Include completed indents
    #[arg(long)]
    pub all: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub post: String,

    #[arg(long)]
    pub department: String,

    /// Number of posts to fill
    #[arg(long)]
    pub posts: String,

    #[arg(long, default_value = "")]
    pub gender: String,

    #[arg(long, default_value = "")]
    pub prefer: String,

    #[arg(long, default_value = "")]
    pub company: String,

    /// Target completion date
    #[arg(long, default_value = "")]
    pub completion_date: String,

    #[arg(long, default_value = "")]
    pub experience: String,
}

const COLUMNS: &[(&str, &str)] = &[
    ("indent_number", "Indent"),
    ("post", "Post"),
    ("department", "Department"),
    ("no_of_posts", "Posts"),
    ("status", "Status"),
    ("pending_post", "Pending"),
    ("total_joined", "Joined"),
];

pub async fn handle(command: IndentCommands) -> Result<()> {
    let config = Config::load()?;
    let client = crate::cli::build_client(&config)?;

    match command {
        IndentCommands::List(args) => {
            let records = indent::list(&client, args.all).await?;
            output::print_records(&records, COLUMNS, args.format)
        }
        IndentCommands::Create(args) => {
            let new_indent = NewIndent {
                post: args.post,
                gender: args.gender,
                department: args.department,
                prefer: args.prefer,
                company: args.company,
                no_of_posts: args.posts,
                completion_date: args.completion_date,
                experience: args.experience,
            };
            let number = indent::create(&client, &new_indent, Utc::now()).await?;
            output::print_success(&format!("Created indent {}", number));
            Ok(())
        }
    }
}
