//! Blank-line squeezing (`-s`)

use crate::core::fields::split_lines;
use crate::core::sink::{Sink, SinkError};

/// Where the previous write left the stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    /// At a line start, after a non-blank line (or at stream start)
    LineStart,
    /// At a line start, right after a blank line
    AfterBlank,
    /// Inside a line whose `\n` has not arrived yet
    MidLine,
}

/// Collapses runs of empty lines into one
pub struct BlankSqueezer<S> {
    inner: S,
    position: Position,
}

impl<S: Sink> BlankSqueezer<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            position: Position::LineStart,
        }
    }
}

impl<S: Sink> Sink for BlankSqueezer<S> {
    fn write(&mut self, data: &[u8]) -> Result<usize, SinkError> {
        let mut n = 0;

        for line in split_lines(data) {
            if line.last() != Some(&b'\n') {
                n += self.inner.write(line).map_err(|e| e.offset(n))?;
                self.position = Position::MidLine;
                continue;
            }

            let blank = line == b"\n" && self.position != Position::MidLine;
            if blank && self.position == Position::AfterBlank {
                // consumed from the input, never forwarded
                n += 1;
                continue;
            }

            n += self.inner.write(line).map_err(|e| e.offset(n))?;
            self.position = if blank {
                Position::AfterBlank
            } else {
                Position::LineStart
            };
        }

        Ok(n)
    }

    fn close(&mut self) -> Result<(), SinkError> {
        self.inner.close()
    }
}
