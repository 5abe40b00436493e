use std::path::PathBuf;

use clap::Parser;

use crate::chart::ChartKind;

pub const DEFAULT_DATASET: &str = "data/gene_expression.csv";
pub const APP_TITLE: &str = "Gene Expression Data Visualization";
pub const APP_DESCRIPTION: &str = "A simple dashboard for visualizing biological data.";

pub const WINDOW_SIZE: [f32; 2] = [1200.0, 800.0];
pub const MIN_WINDOW_SIZE: [f32; 2] = [600.0, 400.0];

#[derive(Parser, Debug)]
#[command(name = "gene-dash")]
#[command(about = "Explore a gene expression table as bar, scatter or heatmap charts")]
#[command(version)]
pub struct Args {
    /// Expression table (.csv or .tsv) with a leading `Gene` column.
    #[arg(default_value = DEFAULT_DATASET)]
    pub dataset: PathBuf,

    /// Chart type shown at startup: bar, scatter or heatmap.
    #[arg(long, default_value_t = ChartKind::Bar)]
    pub kind: ChartKind,

    #[arg(long, value_enum, default_value_t = LogLevel::Info, help = "Set the logging level")]
    pub log_level: LogLevel,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// `RUST_LOG` wins over `--log-level`.
pub fn init_logging(level: LogLevel) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.as_str()))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["gene-dash"]).unwrap();
        assert_eq!(args.dataset, PathBuf::from(DEFAULT_DATASET));
        assert_eq!(args.kind, ChartKind::Bar);
        assert_eq!(args.log_level, LogLevel::Info);
    }

    #[test]
    fn dataset_and_kind_from_command_line() {
        let args = Args::try_parse_from([
            "gene-dash",
            "other.tsv",
            "--kind",
            "heatmap",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.dataset, PathBuf::from("other.tsv"));
        assert_eq!(args.kind, ChartKind::Heatmap);
        assert_eq!(args.log_level, LogLevel::Debug);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!(Args::try_parse_from(["gene-dash", "--kind", "pie"]).is_err());
    }
}
