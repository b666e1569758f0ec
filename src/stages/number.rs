//! Line numbering (`-n`, `-b`)

use crate::core::fields::split_lines;
use crate::core::sink::{Sink, SinkError};

/// Which lines receive a number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberMode {
    /// Every line (`-n`)
    All,
    /// Only non-empty lines (`-b`)
    NonBlank,
}

impl NumberMode {
    /// Resolve `-n`/`-b`; `-b` wins when both are given
    pub fn from_flags(number: bool, number_nonblank: bool) -> Option<Self> {
        match (number, number_nonblank) {
            (_, true) => Some(NumberMode::NonBlank),
            (true, false) => Some(NumberMode::All),
            (false, false) => None,
        }
    }
}

/// Prefixes lines with a right-justified counter and a tab
pub struct LineNumberer<S> {
    inner: S,
    mode: NumberMode,
    lineno: u64,
    /// Set while the previous write ended mid-line
    suppress: bool,
}

impl<S: Sink> LineNumberer<S> {
    pub fn new(inner: S, mode: NumberMode) -> Self {
        Self {
            inner,
            mode,
            lineno: 0,
            suppress: false,
        }
    }

    #[cfg(test)]
    pub fn all(inner: S) -> Self {
        Self::new(inner, NumberMode::All)
    }

    #[cfg(test)]
    pub fn nonblank(inner: S) -> Self {
        Self::new(inner, NumberMode::NonBlank)
    }

    fn write_prefix(&mut self) -> Result<(), SinkError> {
        self.lineno += 1;

        let prefix = format!("{:6}\t", self.lineno);
        self.inner.write(prefix.as_bytes()).map(|_| ())
    }
}

impl<S: Sink> Sink for LineNumberer<S> {
    fn write(&mut self, data: &[u8]) -> Result<usize, SinkError> {
        let mut n = 0;

        for line in split_lines(data) {
            let blank = line == b"\n";
            if self.mode == NumberMode::NonBlank && blank {
                self.suppress = true;
            }

            if !self.suppress {
                self.write_prefix().map_err(|e| e.at(n))?;
            }

            n += self.inner.write(line).map_err(|e| e.offset(n))?;

            self.suppress = line.last() != Some(&b'\n');
        }

        Ok(n)
    }

    fn close(&mut self) -> Result<(), SinkError> {
        self.inner.close()
    }
}
