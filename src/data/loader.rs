use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{ExpressionDataset, GeneRow};

/// Header of the identifier column.
pub const GENE_COLUMN: &str = "Gene";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("malformed table: {0}")]
    Csv(#[from] csv::Error),

    #[error("first column must be 'Gene', found '{0}'")]
    MissingGeneColumn(String),

    #[error("no condition columns after 'Gene'")]
    NoConditions,

    #[error("line {line}, column '{column}': '{value}' is not a number")]
    InvalidNumber {
        line: u64,
        column: String,
        value: String,
    },

    #[error("dataset has no rows")]
    Empty,
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load an expression table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`          – comma separated
/// * `.tsv` / `.tab` – tab separated
///
/// Layout: header row `Gene,<cond 1>,<cond 2>,...`, one gene per row.
pub fn load_file(path: &Path) -> Result<ExpressionDataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let delimiter = match ext.as_str() {
        "csv" => b',',
        "tsv" | "tab" => b'\t',
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    };

    let reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    read_table(reader)
}

/// Load an expression table from any reader, e.g. an in-memory buffer.
pub fn load_reader<R: Read>(rdr: R, delimiter: u8) -> Result<ExpressionDataset, LoadError> {
    let reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_reader(rdr);
    read_table(reader)
}

// ---------------------------------------------------------------------------
// Table parsing
// ---------------------------------------------------------------------------

fn read_table<R: Read>(mut reader: csv::Reader<R>) -> Result<ExpressionDataset, LoadError> {
    let headers: Vec<String> = dedupe_columns(
        reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect(),
    );

    match headers.first() {
        Some(first) if first == GENE_COLUMN => {}
        Some(first) => return Err(LoadError::MissingGeneColumn(first.clone())),
        None => return Err(LoadError::MissingGeneColumn(String::new())),
    }

    let conditions: Vec<String> = headers[1..].to_vec();
    if conditions.is_empty() {
        return Err(LoadError::NoConditions);
    }

    let mut rows = Vec::new();

    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let gene = record.get(0).unwrap_or("").trim().to_string();
        let values = record
            .iter()
            .skip(1)
            .zip(conditions.iter())
            .map(|(cell, column)| parse_expression(cell, line, column))
            .collect::<Result<Vec<f64>, LoadError>>()?;

        rows.push(GeneRow { gene, values });
    }

    let dataset = ExpressionDataset::from_rows(conditions, rows);
    if dataset.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(dataset)
}

/// Repeated header names get a `.1`, `.2`, ... suffix so every column keeps
/// its own name and stays selectable.
fn dedupe_columns(names: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    names
        .into_iter()
        .map(|name| {
            let mut candidate = name.clone();
            let mut n = 0;
            while seen.contains(&candidate) {
                n += 1;
                candidate = format!("{name}.{n}");
            }
            if n > 0 {
                log::warn!("Duplicate column '{name}' renamed to '{candidate}'");
            }
            seen.insert(candidate.clone());
            candidate
        })
        .collect()
}

/// Empty cells are missing measurements and load as `NaN`.
fn parse_expression(cell: &str, line: u64, column: &str) -> Result<f64, LoadError> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Ok(f64::NAN);
    }
    cell.parse::<f64>().map_err(|_| LoadError::InvalidNumber {
        line,
        column: column.to_string(),
        value: cell.to_string(),
    })
}
