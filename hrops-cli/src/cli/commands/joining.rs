use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Subcommand};

use crate::cache::{self, DiskCache, SheetCache};
use crate::cli::output::{self, OutputFormat};
use crate::config::Config;
use crate::workflows::joining::{self, FileUpload, JoiningForm};

#[derive(Subcommand)]
pub enum JoiningCommands {
    /// Confirmed enquiries still waiting to join
    Pending(ListArgs),
    /// Everyone who joined
    History(ListArgs),
    /// Submit a joining form from a TOML file
    Submit(SubmitArgs),
    /// Email a joined candidate's documents
    Share(ShareArgs),
}

#[derive(Args)]
pub struct ListArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Bypass the cached snapshot
    #[arg(long)]
    pub fresh: bool,
}

#[derive(Args)]
pub struct SubmitArgs {
    /// TOML file with the filled joining form
    #[arg(long)]
    pub file: PathBuf,

    /// Aadhar card photo to upload
    #[arg(long)]
    pub aadhar_photo: Option<PathBuf>,

    /// Candidate photo to upload
    #[arg(long)]
    pub photo: Option<PathBuf>,

    /// Bank passbook photo to upload
    #[arg(long)]
    pub passbook: Option<PathBuf>,
}

#[derive(Args)]
pub struct ShareArgs {
    /// Joining serial number (SN-###)
    #[arg(long)]
    pub joining_no: String,

    /// Recipient email address
    #[arg(long)]
    pub to: String,
}

const PENDING_COLUMNS: &[(&str, &str)] = &[
    ("enquiry_no", "Enquiry"),
    ("candidate_name", "Candidate"),
    ("applying_for_post", "Post"),
    ("department", "Department"),
    ("candidate_phone", "Phone"),
];

const HISTORY_COLUMNS: &[(&str, &str)] = &[
    ("joining_no", "Serial"),
    ("candidate_name", "Name"),
    ("date_of_joining", "Joined"),
    ("designation", "Designation"),
    ("department", "Department"),
    ("employee_code", "Code"),
];

pub async fn handle(command: JoiningCommands) -> Result<()> {
    let config = Config::load()?;
    let client = crate::cli::build_client(&config)?;
    let mut cache = DiskCache::open(cache::TTL_JOINING_MS)?;

    match command {
        JoiningCommands::Pending(args) => {
            if args.fresh {
                cache.clear();
            }
            let board = joining::load(&client, &mut cache, cache::wall_clock_ms()).await?;
            output::print_records(&board.pending, PENDING_COLUMNS, args.format)
        }
        JoiningCommands::History(args) => {
            if args.fresh {
                cache.clear();
            }
            let board = joining::load(&client, &mut cache, cache::wall_clock_ms()).await?;
            output::print_records(&board.history, HISTORY_COLUMNS, args.format)
        }
        JoiningCommands::Submit(args) => {
            let content = std::fs::read_to_string(&args.file)
                .with_context(|| format!("Failed to read form file {:?}", args.file))?;
            let mut form: JoiningForm = toml::from_str(&content)
                .with_context(|| format!("Failed to parse form file {:?}", args.file))?;

            let uploads = collect_uploads(&args)?;
            if !uploads.is_empty() {
                let folder_id = config.require_upload_folder()?;
                let urls = joining::upload_documents(&client, folder_id, &uploads).await;
                apply_upload_urls(&mut form, &args, urls);
            }

            let serial = joining::submit(&client, &mut cache, &form, Utc::now()).await?;
            output::print_success(&format!("Submitted joining {} for {}", serial, form.name));
            Ok(())
        }
        JoiningCommands::Share(args) => {
            let board = joining::load(&client, &mut cache, cache::wall_clock_ms()).await?;
            let record = board
                .history
                .iter()
                .find(|r| r.trimmed("joining_no") == args.joining_no.trim())
                .with_context(|| format!("Joining '{}' not found", args.joining_no))?;
            joining::share_documents(&client, &args.to, record).await?;
            output::print_success(&format!("Documents shared with {}", args.to));
            Ok(())
        }
    }
}

fn read_upload(path: &Path) -> Result<FileUpload> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read file {:?}", path))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("Invalid file name {:?}", path))?
        .to_string();
    let mime_type = match file_name.rsplit_once('.').map(|(_, e)| e.to_ascii_lowercase()) {
        Some(ext) if ext == "png" => "image/png",
        Some(ext) if ext == "pdf" => "application/pdf",
        _ => "image/jpeg",
    }
    .to_string();
    Ok(FileUpload {
        file_name,
        mime_type,
        bytes,
    })
}

/// Reads the present photo paths in a fixed order: aadhar, photo, passbook.
fn collect_uploads(args: &SubmitArgs) -> Result<Vec<FileUpload>> {
    [&args.aadhar_photo, &args.photo, &args.passbook]
        .into_iter()
        .flatten()
        .map(|p| read_upload(p))
        .collect()
}

fn apply_upload_urls(form: &mut JoiningForm, args: &SubmitArgs, urls: Vec<String>) {
    let mut urls = urls.into_iter();
    if args.aadhar_photo.is_some() {
        form.aadhar_photo_url = urls.next().unwrap_or_default();
    }
    if args.photo.is_some() {
        form.candidate_photo_url = urls.next().unwrap_or_default();
    }
    if args.passbook.is_some() {
        form.passbook_photo_url = urls.next().unwrap_or_default();
    }
}
