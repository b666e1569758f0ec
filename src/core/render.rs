//! Renderer module
//!
//! Renders a Listing to different output formats: table, jsonl, json

use crate::core::model::{ListEntry, Listing};
use std::io::Write;

/// Listing format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListFormat {
    #[default]
    Table,
    Jsonl,
    Json,
}

impl std::str::FromStr for ListFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(ListFormat::Table),
            "jsonl" => Ok(ListFormat::Jsonl),
            "json" => Ok(ListFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Renderer for listings
pub struct Renderer {
    format: ListFormat,
}

impl Renderer {
    pub fn new(format: ListFormat) -> Self {
        Self { format }
    }

    /// Render a listing to a string; every format ends with a newline unless empty
    pub fn render(&self, listing: &Listing) -> String {
        match self.format {
            ListFormat::Table => self.render_table(listing),
            ListFormat::Jsonl => self.render_jsonl(listing),
            ListFormat::Json => self.render_json(listing),
        }
    }

    /// Render to a writer
    pub fn render_to<W: Write>(&self, listing: &Listing, mut writer: W) -> std::io::Result<()> {
        let output = self.render(listing);
        writer.write_all(output.as_bytes())
    }

    /// Aligned columns: mode, size, modification time, name
    fn render_table(&self, listing: &Listing) -> String {
        let modified = |e: &ListEntry| e.modified.clone().unwrap_or_else(|| "-".to_string());

        let mode_w = width(listing, |e| e.mode.chars().count());
        let size_w = width(listing, |e| e.size.to_string().len());
        let time_w = width(listing, |e| modified(e).len());

        let mut output = String::new();
        for entry in &listing.entries {
            output.push_str(&format!(
                "{:<mode_w$} {:>size_w$} {:<time_w$} {}\n",
                entry.mode,
                entry.size,
                modified(entry),
                entry.name,
            ));
        }
        output
    }

    /// Render as JSON Lines (one JSON object per line)
    fn render_jsonl(&self, listing: &Listing) -> String {
        listing
            .entries
            .iter()
            .filter_map(|entry| serde_json::to_string(entry).ok())
            .map(|line| line + "\n")
            .collect()
    }

    /// Render as a single JSON array
    fn render_json(&self, listing: &Listing) -> String {
        let mut output =
            serde_json::to_string(&listing.entries).unwrap_or_else(|_| "[]".to_string());
        output.push('\n');
        output
    }
}

fn width(listing: &Listing, measure: impl Fn(&ListEntry) -> usize) -> usize {
    listing.entries.iter().map(measure).max().unwrap_or(0)
}
