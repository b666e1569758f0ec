//! List backend - Directory listings (`--list`)
//!
//! Uses walkdir for a single-level traversal

use anyhow::{bail, Context, Result};
use std::path::Path;
use walkdir::WalkDir;

use crate::backends::cat::is_stdin;
use crate::core::model::{ListEntry, Listing};
use crate::core::render::{ListFormat, Renderer};
use crate::core::sink::{Sink, SinkWriter};
use crate::core::util::{display_name, format_mtime, mode_string};

/// List a directory's entries, or a single file as itself
pub fn list_path(path: &Path) -> Result<Listing> {
    if is_stdin(path) {
        bail!("cannot list standard input");
    }

    let meta = std::fs::metadata(path)
        .with_context(|| format!("Failed to stat: {}", display_name(path)))?;

    // Depth 0 is the path itself; a directory shows its children instead
    let depth = if meta.is_dir() { 1 } else { 0 };
    let walker = WalkDir::new(path)
        .min_depth(depth)
        .max_depth(depth)
        .sort_by_file_name();

    let mut listing = Listing::new();
    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to list: {}", display_name(path)))?;
        let meta = entry
            .metadata()
            .with_context(|| format!("Failed to stat: {}", entry.path().display()))?;

        let mut item = ListEntry::new(
            entry.file_name().to_string_lossy(),
            mode_string(&meta),
            meta.len(),
        )
        .with_dir(meta.is_dir());

        if let Ok(mtime) = meta.modified() {
            item = item.with_modified(format_mtime(mtime));
        }

        listing.push(item);
    }

    listing.sort();
    Ok(listing)
}

/// Render a listing through the output chain
pub fn write_listing(out: &mut dyn Sink, listing: &Listing, format: ListFormat) -> Result<()> {
    Renderer::new(format)
        .render_to(listing, SinkWriter::new(out))
        .context("Failed to write listing")
}
