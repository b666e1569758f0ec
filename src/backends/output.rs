//! Output selection (`-o`)

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;
use tracing::info;

use crate::core::sink::{Sink, WriterSink};

/// Whether `name` refers to standard output
pub fn is_stdout(name: &Path) -> bool {
    matches!(name.to_str(), Some("" | "-" | "/dev/stdout"))
}

/// Open the leaf sink: buffered standard output, or a created (truncated) file
pub fn open_output(name: &Path) -> Result<Box<dyn Sink>> {
    if is_stdout(name) {
        return Ok(Box::new(WriterSink::new(BufWriter::new(io::stdout().lock()))));
    }

    let file = File::create(name)
        .with_context(|| format!("could not open output: {}", name.display()))?;
    info!("output redirected: {}", name.display());

    Ok(Box::new(WriterSink::new(BufWriter::new(file))))
}
