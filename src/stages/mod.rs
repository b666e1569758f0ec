//! Stages module - Display transformations stacked over an output sink
//!
//! Each stage wraps exactly one inner sink and implements [`Sink`] itself,
//! so stages compose by wrapping. This module provides:
//! - `-E` line-end markers and `-T` tab escaping (ByteReplacer)
//! - `-n`/`-b` line numbering (LineNumberer)
//! - `-s` blank-line squeezing (BlankSqueezer)
//! - `-v` caret/meta escaping (NonprintEscaper)
//! - Chain composition from resolved display options

pub mod nonprint;
pub mod number;
pub mod replace;
pub mod squeeze;

use serde::Serialize;

use crate::core::sink::Sink;

pub use nonprint::NonprintEscaper;
pub use number::{LineNumberer, NumberMode};
pub use replace::ByteReplacer;
pub use squeeze::BlankSqueezer;

/// Resolved display options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DisplayOptions {
    pub show_ends: bool,
    #[serde(serialize_with = "serialize_number_mode")]
    pub number: Option<NumberMode>,
    pub squeeze_blank: bool,
    pub show_nonprinting: bool,
    pub show_tabs: bool,
}

fn serialize_number_mode<S: serde::Serializer>(
    mode: &Option<NumberMode>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let name = match mode {
        None => "none",
        Some(NumberMode::All) => "all",
        Some(NumberMode::NonBlank) => "nonblank",
    };
    serializer.serialize_str(name)
}

impl DisplayOptions {
    /// Whether any stage is enabled at all
    #[cfg(test)]
    pub fn is_passthrough(&self) -> bool {
        *self == DisplayOptions::default()
    }
}

/// Wrap `out` in every enabled stage
///
/// Line-end markers wrap the output first and tab escaping is outermost, so
/// a write travels: tabs, non-printables, squeeze, numbering, line ends.
/// The numbering prefix therefore gets a `$` only on its line's real `\n`,
/// and its tab is never escaped.
pub fn build_chain(out: Box<dyn Sink>, opts: &DisplayOptions) -> Box<dyn Sink> {
    let mut out = out;

    if opts.show_ends {
        out = Box::new(ByteReplacer::line_ends(out));
    }

    if let Some(mode) = opts.number {
        out = Box::new(LineNumberer::new(out, mode));
    }

    if opts.squeeze_blank {
        out = Box::new(BlankSqueezer::new(out));
    }

    if opts.show_nonprinting {
        out = Box::new(NonprintEscaper::new(out));
    }

    if opts.show_tabs {
        out = Box::new(ByteReplacer::tabs(out));
    }

    out
}


#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::testing::{assert_chunking_invariant, SharedBuf};
    use super::*;
    use crate::core::sink::WriterSink;

    fn render(opts: DisplayOptions, input: &[u8]) -> Vec<u8> {
        let out = SharedBuf::default();
        let mut chain = build_chain(Box::new(out.clone()), &opts);
        assert_eq!(chain.write(input).unwrap(), input.len());
        chain.close().unwrap();
        out.contents()
    }

    fn show_all() -> DisplayOptions {
        DisplayOptions {
            show_ends: true,
            show_nonprinting: true,
            show_tabs: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_passthrough_chain() {
        let opts = DisplayOptions::default();
        assert!(opts.is_passthrough());
        assert_eq!(render(opts, b"a\tb\x01\n"), b"a\tb\x01\n");
    }

    #[test]
    fn test_show_all() {
        assert_eq!(
            render(show_all(), b"a\tb\x01\n\xe9\n"),
            b"a^Ib^A$\nM-i$\n"
        );
    }

    #[test]
    fn test_numbering_with_line_ends() {
        let opts = DisplayOptions {
            show_ends: true,
            number: Some(NumberMode::All),
            ..Default::default()
        };
        assert_eq!(render(opts, b"a\n\nb"), b"     1\ta$\n     2\t$\n     3\tb");
    }

    #[test]
    fn test_numbering_tab_is_not_escaped() {
        let opts = DisplayOptions {
            number: Some(NumberMode::All),
            show_tabs: true,
            ..Default::default()
        };
        assert_eq!(render(opts, b"x\ty\n"), b"     1\tx^Iy\n");
    }

    #[test]
    fn test_squeeze_then_number_nonblank() {
        let opts = DisplayOptions {
            number: Some(NumberMode::NonBlank),
            squeeze_blank: true,
            ..Default::default()
        };
        assert_eq!(
            render(opts, b"a\n\n\n\nb\n"),
            b"     1\ta\n\n     2\tb\n"
        );
    }

    #[test]
    fn test_squeeze_then_number_all() {
        let opts = DisplayOptions {
            number: Some(NumberMode::All),
            squeeze_blank: true,
            ..Default::default()
        };
        assert_eq!(
            render(opts, b"\n\n\na\n"),
            b"     1\t\n     2\ta\n"
        );
    }

    #[test]
    fn test_composed_chain_is_chunking_invariant() {
        let opts = DisplayOptions {
            show_ends: true,
            number: Some(NumberMode::NonBlank),
            squeeze_blank: true,
            show_nonprinting: true,
            show_tabs: true,
        };
        assert_chunking_invariant(b"\x01a\t\n\n\n\xffb\n\n", |out| {
            build_chain(Box::new(out), &opts)
        });
    }

    #[test]
    fn test_close_reaches_the_leaf() {
        struct Flushed(Rc<Cell<bool>>);

        impl std::io::Write for Flushed {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                self.0.set(true);
                Ok(())
            }
        }

        let flushed = Rc::new(Cell::new(false));
        let mut chain = build_chain(
            Box::new(WriterSink::new(Flushed(flushed.clone()))),
            &show_all(),
        );
        chain.write(b"x\n").unwrap();
        assert!(!flushed.get());
        chain.close().unwrap();
        assert!(flushed.get());
    }

    #[test]
    fn test_options_serialize_for_logging() {
        let opts = DisplayOptions {
            number: Some(NumberMode::NonBlank),
            ..Default::default()
        };
        let json = serde_json::to_value(opts).unwrap();
        assert_eq!(json["number"], "nonblank");
        assert_eq!(json["show_tabs"], false);
    }
}
