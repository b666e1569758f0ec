//! Cat backend - Streams an input through the display chain

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::time::{Duration, Instant};

use tracing::{debug, error, info};

use crate::core::sink::{Sink, SinkError};
use crate::core::util::display_name;

/// Bytes read from an input per chain write
pub const COPY_BUFFER_SIZE: usize = 32 * 1024;

/// Errors from catting one input
#[derive(Debug, thiserror::Error)]
pub enum CatError {
    #[error("{name}: {source}")]
    Open {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("{name}: read failed after {copied} bytes: {source}")]
    Read {
        name: String,
        copied: u64,
        #[source]
        source: io::Error,
    },

    #[error("output failed after {copied} bytes")]
    Sink {
        copied: u64,
        #[source]
        source: SinkError,
    },
}

impl CatError {
    /// Input-side failures leave the output usable; sink failures do not
    pub fn is_input_error(&self) -> bool {
        !matches!(self, CatError::Sink { .. })
    }
}

/// Outcome of one copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyStats {
    pub bytes: u64,
    pub elapsed: Duration,
}

impl CopyStats {
    /// Throughput over the whole copy
    pub fn bytes_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.bytes as f64 / secs
        } else {
            0.0
        }
    }
}

/// Whether `name` refers to standard input
pub fn is_stdin(name: &Path) -> bool {
    let name = name.as_os_str();
    name.is_empty() || name == "-"
}

/// Open an input by name: `-` or empty is standard input, anything else a local path
pub fn open_input(name: &Path) -> Result<Box<dyn Read>, CatError> {
    if is_stdin(name) {
        return Ok(Box::new(io::stdin().lock()));
    }

    let file = File::open(name).map_err(|source| CatError::Open {
        name: display_name(name),
        source,
    })?;
    Ok(Box::new(file))
}

/// Copy `input` into `out` in bounded chunks, one chain write per read
pub fn copy_stream<R: Read + ?Sized>(
    input: &mut R,
    out: &mut dyn Sink,
    name: &Path,
) -> Result<CopyStats, CatError> {
    let start = Instant::now();
    let mut buf = vec![0u8; COPY_BUFFER_SIZE];
    let mut copied = 0u64;

    loop {
        let n = match input.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(source) => {
                return Err(CatError::Read {
                    name: display_name(name),
                    copied,
                    source,
                })
            }
        };

        if let Err(source) = out.write(&buf[..n]) {
            return Err(CatError::Sink {
                copied: copied + source.accepted() as u64,
                source,
            });
        }
        copied += n as u64;
    }

    Ok(CopyStats {
        bytes: copied,
        elapsed: start.elapsed(),
    })
}

/// Cat one named input into `out`
pub fn cat_file(out: &mut dyn Sink, name: &Path) -> Result<CopyStats, CatError> {
    let shown = display_name(name);
    debug!("cat: {}", shown);

    let mut input = open_input(name)?;
    let start = Instant::now();

    match copy_stream(&mut input, out, name) {
        Ok(stats) => {
            debug!(
                "{}: {} bytes copied in {:?} ({:.0} B/s)",
                shown,
                stats.bytes,
                stats.elapsed,
                stats.bytes_per_sec()
            );
            Ok(stats)
        }
        Err(e) => {
            match &e {
                CatError::Read { copied, .. } if *copied > 0 => {
                    error!("{}: {} bytes copied in {:?}", shown, copied, start.elapsed());
                }
                CatError::Sink { copied, .. } => {
                    info!("{}: {} bytes copied in {:?}", shown, copied, start.elapsed());
                }
                _ => {}
            }
            Err(e)
        }
    }
}
