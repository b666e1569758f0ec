//! Common utilities

use std::fs::Metadata;
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Local, SecondsFormat};

/// Longest input name shown in diagnostics, in bytes
pub const MAX_DISPLAY_NAME: usize = 40;

/// Truncate string to max bytes, returning (truncated_string, was_truncated)
pub fn truncate_string(s: &str, max_bytes: usize) -> (String, bool) {
    if s.len() <= max_bytes {
        return (s.to_string(), false);
    }

    // Find a valid UTF-8 boundary
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }

    (s[..end].to_string(), true)
}

/// Input name as shown in log lines (lossy for non-UTF-8 names)
pub fn display_name(name: &Path) -> String {
    let lossy = name.to_string_lossy();
    let name = if lossy.is_empty() { "-" } else { &lossy };
    match truncate_string(name, MAX_DISPLAY_NAME) {
        (short, true) => format!("{}…", short),
        (full, false) => full,
    }
}

/// Format a modification time as RFC 3339 in the local zone
pub fn format_mtime(time: SystemTime) -> String {
    DateTime::<Local>::from(time).to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Render file type and permission bits, `ls -l` style (`drwxr-xr-x`)
pub fn mode_string(meta: &Metadata) -> String {
    let file_type = meta.file_type();
    let kind = if file_type.is_dir() {
        'd'
    } else if file_type.is_symlink() {
        'l'
    } else {
        special_kind(meta).unwrap_or('-')
    };

    let mut out = String::with_capacity(10);
    out.push(kind);
    out.push_str(&permission_bits(meta));
    out
}

#[cfg(unix)]
fn special_kind(meta: &Metadata) -> Option<char> {
    use std::os::unix::fs::FileTypeExt;

    let file_type = meta.file_type();
    if file_type.is_fifo() {
        Some('p')
    } else if file_type.is_socket() {
        Some('s')
    } else if file_type.is_block_device() {
        Some('b')
    } else if file_type.is_char_device() {
        Some('c')
    } else {
        None
    }
}

#[cfg(not(unix))]
fn special_kind(_meta: &Metadata) -> Option<char> {
    None
}

#[cfg(unix)]
fn permission_bits(meta: &Metadata) -> String {
    use std::os::unix::fs::PermissionsExt;

    let mode = meta.permissions().mode();
    let flags = [
        (0o400, 'r'),
        (0o200, 'w'),
        (0o100, 'x'),
        (0o040, 'r'),
        (0o020, 'w'),
        (0o010, 'x'),
        (0o004, 'r'),
        (0o002, 'w'),
        (0o001, 'x'),
    ];

    flags
        .iter()
        .map(|&(bit, c)| if mode & bit != 0 { c } else { '-' })
        .collect()
}

#[cfg(not(unix))]
fn permission_bits(meta: &Metadata) -> String {
    if meta.permissions().readonly() {
        "r--r--r--".to_string()
    } else {
        "rw-rw-rw-".to_string()
    }
}
