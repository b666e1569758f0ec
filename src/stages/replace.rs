//! Single-byte replacement (`-E` line ends, `-T` tabs)

use crate::core::fields::{split_on_byte, strip_terminator};
use crate::core::sink::{Sink, SinkError};

/// Replaces every `sep` byte with `with`; all other bytes pass through
pub struct ByteReplacer<S> {
    inner: S,
    sep: u8,
    with: Vec<u8>,
}

impl<S: Sink> ByteReplacer<S> {
    pub fn new(inner: S, sep: u8, with: impl Into<Vec<u8>>) -> Self {
        Self {
            inner,
            sep,
            with: with.into(),
        }
    }

    /// `\n` becomes `$\n`
    pub fn line_ends(inner: S) -> Self {
        Self::new(inner, b'\n', b"$\n".to_vec())
    }

    /// `\t` becomes `^I`
    pub fn tabs(inner: S) -> Self {
        Self::new(inner, b'\t', b"^I".to_vec())
    }
}

impl<S: Sink> Sink for ByteReplacer<S> {
    fn write(&mut self, data: &[u8]) -> Result<usize, SinkError> {
        let mut n = 0;

        for field in split_on_byte(data, self.sep) {
            let Some(body) = strip_terminator(field, self.sep) else {
                n += self.inner.write(field).map_err(|e| e.offset(n))?;
                continue;
            };

            n += self.inner.write(body).map_err(|e| e.offset(n))?;
            self.inner.write(&self.with).map_err(|e| e.at(n))?;
            n += 1;
        }

        Ok(n)
    }

    fn close(&mut self) -> Result<(), SinkError> {
        self.inner.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::testing::{assert_chunking_invariant, FailingSink};

    fn run(stage: &mut ByteReplacer<Vec<u8>>, input: &[u8]) -> usize {
        stage.write(input).unwrap()
    }

    #[test]
    fn test_line_ends() {
        let mut stage = ByteReplacer::line_ends(Vec::new());
        assert_eq!(run(&mut stage, b"a\n"), 2);
        assert_eq!(stage.inner, b"a$\n");
    }

    #[test]
    fn test_tabs() {
        let mut stage = ByteReplacer::tabs(Vec::new());
        assert_eq!(run(&mut stage, b"a\tb"), 3);
        assert_eq!(stage.inner, b"a^Ib");
    }

    #[test]
    fn test_leading_and_repeated_separators() {
        let mut stage = ByteReplacer::tabs(Vec::new());
        run(&mut stage, b"\t\tx\t");
        assert_eq!(stage.inner, b"^I^Ix^I");
    }

    #[test]
    fn test_accepted_count_ignores_expansion() {
        let mut stage = ByteReplacer::new(Vec::new(), b'x', b"[long replacement]".to_vec());
        assert_eq!(run(&mut stage, b"axbxc"), 5);
        assert_eq!(stage.inner, b"a[long replacement]b[long replacement]c");
    }

    #[test]
    fn test_chunking_invariant() {
        assert_chunking_invariant(b"a\tb\n\n\tc\td\n", ByteReplacer::line_ends);
        assert_chunking_invariant(b"a\tb\n\n\tc\td\n", ByteReplacer::tabs);
    }

    #[test]
    fn test_failure_on_replacement_reports_consumed_body() {
        // body "ab" succeeds, the replacement write fails
        let mut stage = ByteReplacer::tabs(FailingSink::after_writes(1));
        let err = stage.write(b"ab\tcd").unwrap_err();
        assert_eq!(err.accepted(), 2);
        assert_eq!(stage.inner.output, b"ab");
    }

    #[test]
    fn test_failure_on_body_stops_immediately() {
        let mut stage = ByteReplacer::tabs(FailingSink::after_writes(2));
        let err = stage.write(b"ab\tcd\tef").unwrap_err();
        // "ab" + separator consumed, then "cd" fails
        assert_eq!(err.accepted(), 3);
        assert_eq!(stage.inner.output, b"ab^I");
    }
}
