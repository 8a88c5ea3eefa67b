// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transport-agnostic byte source/sink traits, plus the `std`-gated bridge
//! onto `std::io::Read`/`Write` and a couple of small in-memory adapters
//! used by tests and no_std callers alike.

use alloc::vec::Vec;

use crate::error::{Error, Result};

/// A source of bytes the reader pulls from one at a time or in chunks.
pub trait ByteSource {
    fn read_byte(&mut self) -> Result<u8>;

    /// Fills `buf` completely or fails with `Error::EndOfStream`.
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        for slot in buf.iter_mut() {
            *slot = self.read_byte()?;
        }
        Ok(())
    }
}

/// A sink of bytes the writer pushes to one at a time or in chunks.
pub trait ByteSink {
    fn write_byte(&mut self, byte: u8) -> Result<()>;

    fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        for &byte in buf {
            self.write_byte(byte)?;
        }
        Ok(())
    }
}

/// Reads from an in-memory byte slice, tracking a cursor.
pub struct SliceSource<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        SliceSource { bytes, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }
}

impl<'a> ByteSource for SliceSource<'a> {
    fn read_byte(&mut self) -> Result<u8> {
        let byte = *self.bytes.get(self.pos).ok_or(Error::EndOfStream)?;
        self.pos += 1;
        Ok(byte)
    }
}

/// Writes into an owned, growable byte buffer.
#[derive(Default)]
pub struct VecSink {
    buf: Vec<u8>,
}

impl VecSink {
    pub fn new() -> Self {
        VecSink { buf: Vec::new() }
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

impl ByteSink for VecSink {
    fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.buf.push(byte);
        Ok(())
    }

    fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        self.buf.extend_from_slice(buf);
        Ok(())
    }
}

#[cfg(feature = "std")]
mod std_bridge {
    use super::{ByteSink, ByteSource};
    use crate::error::{Error, Result};
    use alloc::string::ToString;

    /// Adapts any `std::io::Read` onto [`ByteSource`].
    pub struct IoSource<R> {
        inner: R,
    }

    impl<R: std::io::Read> IoSource<R> {
        pub fn new(inner: R) -> Self {
            IoSource { inner }
        }

        pub fn into_inner(self) -> R {
            self.inner
        }
    }

    /// A truncated read is `EndOfStream` (same kind `SliceSource` gives
    /// for running off the end of a slice), not `Transport` — the latter
    /// is reserved for genuine transport failures (closed pipe, I/O
    /// error) distinct from the source simply being exhausted.
    fn map_read_error(err: std::io::Error) -> Error {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            Error::EndOfStream
        } else {
            Error::Transport(err.to_string())
        }
    }

    impl<R: std::io::Read> ByteSource for IoSource<R> {
        fn read_byte(&mut self) -> Result<u8> {
            let mut byte = [0u8; 1];
            self.inner.read_exact(&mut byte).map_err(map_read_error)?;
            Ok(byte[0])
        }

        fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
            self.inner.read_exact(buf).map_err(map_read_error)
        }
    }

    /// Adapts any `std::io::Write` onto [`ByteSink`].
    pub struct IoSink<W> {
        inner: W,
    }

    impl<W: std::io::Write> IoSink<W> {
        pub fn new(inner: W) -> Self {
            IoSink { inner }
        }

        pub fn into_inner(self) -> W {
            self.inner
        }
    }

    impl<W: std::io::Write> ByteSink for IoSink<W> {
        fn write_byte(&mut self, byte: u8) -> Result<()> {
            self.inner
                .write_all(&[byte])
                .map_err(|e| Error::Transport(e.to_string()))
        }

        fn write_all(&mut self, buf: &[u8]) -> Result<()> {
            self.inner
                .write_all(buf)
                .map_err(|e| Error::Transport(e.to_string()))
        }
    }
}

#[cfg(feature = "std")]
pub use std_bridge::{IoSink, IoSource};

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::{ByteSource, IoSource};
    use crate::error::Error;

    #[test]
    fn truncated_read_is_end_of_stream_not_transport() {
        let mut source = IoSource::new([0x01u8, 0x02].as_slice());
        assert_eq!(source.read_byte(), Ok(0x01));
        assert_eq!(source.read_byte(), Ok(0x02));
        assert_eq!(source.read_byte(), Err(Error::EndOfStream));
    }
}
