//! Caret and meta notation for non-printable bytes (`-v`)
//!
//! `\n` and `\t` pass through. Every other byte is classified on its own:
//!
//! | byte            | shown as          |
//! |-----------------|-------------------|
//! | `0..32`         | `^` + `(c + 64)`  |
//! | `32..127`       | itself            |
//! | `127`           | `^?`              |
//! | `128..160`      | `M-^` + `(c - 64)`|
//! | `160..255`      | `M-` + `(c - 128)`|
//! | `255`           | `M-^?`            |

use crate::core::fields::split_on_nonprint;
use crate::core::sink::{Sink, SinkError};

/// Display form of a single byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escaped {
    /// Byte is shown as itself
    Plain(u8),
    /// `^X`
    Control(u8),
    /// `M-^X`
    MetaControl(u8),
    /// `M-X`
    Meta(u8),
}

impl Escaped {
    /// Bytes to emit for this display form, written into `buf`
    pub fn encode(self, buf: &mut [u8; 4]) -> &[u8] {
        match self {
            Escaped::Plain(c) => {
                buf[0] = c;
                &buf[..1]
            }
            Escaped::Control(c) => {
                buf[..2].copy_from_slice(&[b'^', c]);
                &buf[..2]
            }
            Escaped::MetaControl(c) => {
                buf.copy_from_slice(&[b'M', b'-', b'^', c]);
                &buf[..]
            }
            Escaped::Meta(c) => {
                buf[..3].copy_from_slice(&[b'M', b'-', c]);
                &buf[..3]
            }
        }
    }
}

/// Classify one byte
pub fn escape(c: u8) -> Escaped {
    match c {
        b'\n' | b'\t' => Escaped::Plain(c),
        0..=31 => Escaped::Control(c + b'@'),
        32..=126 => Escaped::Plain(c),
        127 => Escaped::Control(b'?'),
        128..=159 => Escaped::MetaControl(c - 128 + b'@'),
        255 => Escaped::MetaControl(b'?'),
        160..=254 => Escaped::Meta(c - 128),
    }
}

/// Rewrites non-printable bytes in caret/meta notation
pub struct NonprintEscaper<S> {
    inner: S,
}

impl<S: Sink> NonprintEscaper<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: Sink> Sink for NonprintEscaper<S> {
    fn write(&mut self, data: &[u8]) -> Result<usize, SinkError> {
        let mut n = 0;
        let mut buf = [0u8; 4];

        for field in split_on_nonprint(data) {
            let Some((&c, short)) = field.split_last() else {
                continue;
            };

            match escape(c) {
                Escaped::Plain(_) => {
                    n += self.inner.write(field).map_err(|e| e.offset(n))?;
                }
                escaped => {
                    n += self.inner.write(short).map_err(|e| e.offset(n))?;
                    self.inner
                        .write(escaped.encode(&mut buf))
                        .map_err(|e| e.at(n))?;
                    n += 1;
                }
            }
        }

        Ok(n)
    }

    fn close(&mut self) -> Result<(), SinkError> {
        self.inner.close()
    }
}
