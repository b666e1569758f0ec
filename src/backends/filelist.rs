//! File lists - Inputs named one per line in another file (`-f`)

use anyhow::{Context, Result};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::backends::cat::open_input;
use crate::core::util::display_name;

/// Parse a list of input names: one per line, surrounding whitespace trimmed, blank lines skipped
///
/// Names are kept as raw bytes, so a list can name files that are not valid UTF-8.
pub fn parse_file_list(data: &[u8]) -> Vec<PathBuf> {
    data.split(|&b| b == b'\n')
        .map(<[u8]>::trim_ascii)
        .filter(|line| !line.is_empty())
        .map(path_from_bytes)
        .collect()
}

#[cfg(unix)]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    PathBuf::from(OsStr::from_bytes(bytes))
}

#[cfg(not(unix))]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}

/// Read the input names listed in `name` (`-` reads them from standard input)
pub fn read_file_list(name: &Path) -> Result<Vec<PathBuf>> {
    let shown = display_name(name);
    debug!("file list: {}", shown);

    let mut input = open_input(name)?;
    let mut data = Vec::new();
    input
        .read_to_end(&mut data)
        .with_context(|| format!("Failed to read file list: {}", shown))?;

    let list = parse_file_list(&data);
    info!("{}: {} lines of files", shown, list.len());

    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_parse_file_list() {
        let list = parse_file_list(b"  a.txt\n\n\tb c.txt \r\n\n/abs/path");
        assert_eq!(list, paths(&["a.txt", "b c.txt", "/abs/path"]));
    }

    #[test]
    fn test_parse_file_list_empty() {
        assert!(parse_file_list(b"").is_empty());
        assert!(parse_file_list(b"\n \n\t\n").is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_parse_file_list_keeps_raw_bytes() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let list = parse_file_list(b"  caf\xe9.txt \nplain.txt\n");
        assert_eq!(
            list,
            vec![
                PathBuf::from(OsStr::from_bytes(b"caf\xe9.txt")),
                PathBuf::from("plain.txt"),
            ]
        );
    }

    #[test]
    fn test_read_file_list() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("list.txt");
        std::fs::write(&path, "one.txt\ntwo.txt\n").unwrap();

        let list = read_file_list(&path).unwrap();
        assert_eq!(list, paths(&["one.txt", "two.txt"]));
    }

    #[test]
    fn test_read_file_list_missing() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nope.txt");
        assert!(read_file_list(&path).is_err());
    }
}
