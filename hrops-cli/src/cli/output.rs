//! Terminal output helpers

use anyhow::Result;
use clap::ValueEnum;
use colored::*;
use serde_json::json;

use crate::projector::Record;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Prints records as an aligned table or a JSON array of the named fields.
pub fn print_records(
    records: &[Record],
    columns: &[(&str, &str)],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(records, columns),
        OutputFormat::Table => {
            print_table(records, columns);
            Ok(())
        }
    }
}

fn print_json(records: &[Record], columns: &[(&str, &str)]) -> Result<()> {
    let rows: Vec<serde_json::Value> = records
        .iter()
        .map(|r| {
            let mut obj = serde_json::Map::new();
            obj.insert("row".into(), json!(r.row_number()));
            for (field, _) in columns {
                obj.insert((*field).into(), json!(r.get(field)));
            }
            serde_json::Value::Object(obj)
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

fn print_table(records: &[Record], columns: &[(&str, &str)]) {
    if records.is_empty() {
        println!("{}", "No records".dimmed());
        return;
    }

    let mut widths: Vec<usize> = columns.iter().map(|(_, header)| header.len()).collect();
    for record in records {
        for (i, (field, _)) in columns.iter().enumerate() {
            widths[i] = widths[i].max(record.trimmed(field).len());
        }
    }

    let header_line: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|((_, header), width)| format!("{:<width$}", header, width = width))
        .collect();
    println!("{}", header_line.join("  ").bold());

    for record in records {
        let cells: Vec<String> = columns
            .iter()
            .zip(&widths)
            .map(|((field, _), width)| format!("{:<width$}", record.trimmed(field), width = width))
            .collect();
        println!("{}", cells.join("  "));
    }
    println!("{}", format!("{} record(s)", records.len()).dimmed());
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}
