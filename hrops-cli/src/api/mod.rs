//! Apps Script Web Endpoint Module
//!
//! A thin, typed facade over the single Google Apps Script deployment that
//! fronts the HR spreadsheet and its Drive folders. All sheet reads, cell
//! writes, file uploads and email shares go through [`SheetsClient`].

pub mod client;
pub mod config;
pub mod models;

pub use client::SheetsClient;
pub use config::RequestConfig;
pub use models::{
    Cell, DocumentRef, DriveFile, FetchResponse, FilesResponse, Grid, PostResponse,
    UploadMetadata, UploadResponse,
};
