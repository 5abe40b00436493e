use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::chart::ChartSpec;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot serialise chart: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write a chart description as pretty-printed JSON.
pub fn write_chart_spec<W: Write>(spec: &ChartSpec, writer: W) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(writer, spec)?;
    Ok(())
}

/// Create (or truncate) `path` and write the chart description into it.
pub fn export_to_path(spec: &ChartSpec, path: &Path) -> Result<(), ExportError> {
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    write_chart_spec(spec, &mut writer)?;
    writer.flush().map_err(io_err)?;
    log::info!("Exported {} chart to {}", spec.kind(), path.display());
    Ok(())
}
