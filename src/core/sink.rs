//! Sink capability
//!
//! Every point of the output pipeline accepts byte chunks through [`Sink`]:
//! the leaf writer, each transformation stage, and the composed chain.

use std::io::{self, Write};

/// Errors reported by a sink
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// A write failed after `accepted` input bytes were logically consumed
    #[error("write failed after {accepted} bytes: {source}")]
    Write {
        accepted: usize,
        #[source]
        source: io::Error,
    },

    /// Closing (flushing) the sink failed
    #[error("close failed: {0}")]
    Close(#[source] io::Error),

    /// The sink was already closed
    #[error("sink is closed")]
    Closed,
}

impl SinkError {
    /// Wrap an I/O failure that happened after `accepted` bytes were consumed
    pub fn write(accepted: usize, source: io::Error) -> Self {
        SinkError::Write { accepted, source }
    }

    /// Input bytes consumed before the failure
    pub fn accepted(&self) -> usize {
        match self {
            SinkError::Write { accepted, .. } => *accepted,
            SinkError::Close(_) | SinkError::Closed => 0,
        }
    }

    /// Rebase the accepted count onto a caller that had already consumed `base` bytes.
    ///
    /// Stages forward spans of their own input; when the inner sink fails
    /// partway through a verbatim span, the bytes it accepted are also bytes
    /// of the stage's input.
    pub fn offset(self, base: usize) -> Self {
        match self {
            SinkError::Write { accepted, source } => SinkError::Write {
                accepted: base + accepted,
                source,
            },
            other => SinkError::Write {
                accepted: base,
                source: other.into_io(),
            },
        }
    }

    /// Report a failure that consumed exactly `accepted` bytes, discarding
    /// whatever the inner sink accepted (used when the failed write was an
    /// inserted sequence rather than forwarded input)
    pub fn at(self, accepted: usize) -> Self {
        SinkError::Write {
            accepted,
            source: self.into_io(),
        }
    }

    /// Underlying I/O kind, if any
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            SinkError::Write { source, .. } | SinkError::Close(source) => Some(source.kind()),
            SinkError::Closed => None,
        }
    }

    fn into_io(self) -> io::Error {
        match self {
            SinkError::Write { source, .. } | SinkError::Close(source) => source,
            SinkError::Closed => io::Error::new(io::ErrorKind::BrokenPipe, "sink is closed"),
        }
    }
}

/// A byte-accepting capability
///
/// `write` either consumes the whole chunk and returns its length, or fails
/// with the number of bytes consumed before the failure. A failure is
/// terminal; writing again afterwards is not supported.
pub trait Sink {
    fn write(&mut self, chunk: &[u8]) -> Result<usize, SinkError>;

    fn close(&mut self) -> Result<(), SinkError>;
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn write(&mut self, chunk: &[u8]) -> Result<usize, SinkError> {
        (**self).write(chunk)
    }

    fn close(&mut self) -> Result<(), SinkError> {
        (**self).close()
    }
}

impl Sink for Vec<u8> {
    fn write(&mut self, chunk: &[u8]) -> Result<usize, SinkError> {
        self.extend_from_slice(chunk);
        Ok(chunk.len())
    }

    fn close(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Leaf sink over any `io::Write`
pub struct WriterSink<W: Write> {
    writer: Option<W>,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Some(writer),
        }
    }
}

impl<W: Write> Sink for WriterSink<W> {
    fn write(&mut self, chunk: &[u8]) -> Result<usize, SinkError> {
        let writer = self.writer.as_mut().ok_or(SinkError::Closed)?;

        let mut n = 0;
        while n < chunk.len() {
            match writer.write(&chunk[n..]) {
                Ok(0) => {
                    return Err(SinkError::write(
                        n,
                        io::Error::new(io::ErrorKind::WriteZero, "failed to write whole chunk"),
                    ))
                }
                Ok(written) => n += written,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(SinkError::write(n, e)),
            }
        }

        Ok(n)
    }

    fn close(&mut self) -> Result<(), SinkError> {
        match self.writer.take() {
            Some(mut writer) => writer.flush().map_err(SinkError::Close),
            None => Ok(()),
        }
    }
}

/// Adapts a sink to `io::Write`, so formatted text can be pushed through a chain
pub struct SinkWriter<'a> {
    sink: &'a mut dyn Sink,
}

impl<'a> SinkWriter<'a> {
    pub fn new(sink: &'a mut dyn Sink) -> Self {
        Self { sink }
    }
}

impl Write for SinkWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.sink.write(buf).map_err(SinkError::into_io)
    }

    fn flush(&mut self) -> io::Result<()> {
        // Stages forward everything before returning; only the leaf buffers,
        // and it is flushed by close.
        Ok(())
    }
}
