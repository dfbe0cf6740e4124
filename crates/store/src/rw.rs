//! Byte-stream primitives shared by every codec.
//!
//! # Framing
//!
//! - Counts and ids use unsigned LEB128 ("small" integers): 7 payload
//!   bits per byte, high bit set on every byte but the last. Small
//!   magnitudes, which dominate this format, cost one byte.
//! - Booleans are one byte, strictly 0 or 1.
//! - Strings are a varint byte length followed by UTF-8 bytes.
//! - Nullable strings carry an explicit marker byte (0 = absent,
//!   1 = present), so `None` and `Some("")` stay distinct on the wire.
//!
//! Decoding is strict: unknown markers, non-canonical booleans, varints
//! wider than a u64, and invalid UTF-8 all fail rather than being
//! papered over. A failure abandons the whole record.

use std::io::{Read, Write};

use byteorder::{ReadBytesExt, WriteBytesExt};

use crate::error::{CodecError, Result};

/// Longest legal LEB128 encoding of a u64 (ceil(64 / 7) bytes).
const MAX_VARINT_LEN: usize = 10;

/// Upper bound on speculative pre-allocation driven by decoded length
/// and count fields. Larger values still decode; they just grow as the
/// stream proves they exist.
pub(crate) const PREALLOC_LIMIT: u64 = 1024;

/// Writes the wire format to an underlying byte sink.
pub struct Encoder<W: Write> {
    sink: W,
}

impl<W: Write> Encoder<W> {
    /// Wrap a byte sink.
    pub fn new(sink: W) -> Self {
        Encoder { sink }
    }

    /// Write one raw byte.
    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.sink.write_u8(value)?;
        Ok(())
    }

    /// Write an unsigned LEB128 varint.
    pub fn write_small_u64(&mut self, mut value: u64) -> Result<()> {
        loop {
            let byte = (value & 0x7f) as u8;
            value >>= 7;
            if value == 0 {
                self.sink.write_u8(byte)?;
                return Ok(());
            }
            self.sink.write_u8(byte | 0x80)?;
        }
    }

    /// Write a boolean as a single 0/1 byte.
    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.sink.write_u8(value as u8)?;
        Ok(())
    }

    /// Write a length-prefixed UTF-8 string.
    pub fn write_string(&mut self, value: &str) -> Result<()> {
        self.write_small_u64(value.len() as u64)?;
        self.sink.write_all(value.as_bytes())?;
        Ok(())
    }

    /// Write an optional string with an explicit presence marker.
    pub fn write_nullable_string(&mut self, value: Option<&str>) -> Result<()> {
        match value {
            None => self.write_u8(0),
            Some(s) => {
                self.write_u8(1)?;
                self.write_string(s)
            }
        }
    }
}

/// Reads the wire format from an underlying byte source.
pub struct Decoder<R: Read> {
    source: R,
}

impl<R: Read> Decoder<R> {
    /// Wrap a byte source.
    pub fn new(source: R) -> Self {
        Decoder { source }
    }

    /// Unwrap, handing the source back to the caller.
    pub fn into_inner(self) -> R {
        self.source
    }

    /// Read one raw byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.source.read_u8()?)
    }

    /// Read an unsigned LEB128 varint.
    pub fn read_small_u64(&mut self) -> Result<u64> {
        let mut value = 0u64;
        for i in 0..MAX_VARINT_LEN {
            let byte = self.source.read_u8()?;
            let payload = (byte & 0x7f) as u64;
            // The 10th byte may only carry the single remaining bit.
            if i == MAX_VARINT_LEN - 1 && payload > 1 {
                return Err(CodecError::VarintOverflow);
            }
            value |= payload << (7 * i);
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(CodecError::VarintOverflow)
    }

    /// Read a strict 0/1 boolean byte.
    pub fn read_bool(&mut self) -> Result<bool> {
        match self.source.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(CodecError::InvalidBool(other)),
        }
    }

    /// Read a length-prefixed UTF-8 string.
    ///
    /// The length field comes from the stream and cannot be trusted: the
    /// read is bounded by `take`, so a corrupt length fails against the
    /// actual stream contents instead of sizing an allocation.
    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_small_u64()?;
        let mut bytes = Vec::with_capacity(len.min(PREALLOC_LIMIT) as usize);
        (&mut self.source).take(len).read_to_end(&mut bytes)?;
        if (bytes.len() as u64) < len {
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "string payload shorter than its length prefix",
            )
            .into());
        }
        String::from_utf8(bytes).map_err(|_| CodecError::InvalidString)
    }

    /// Read an optional string written by
    /// [`Encoder::write_nullable_string`].
    pub fn read_nullable_string(&mut self) -> Result<Option<String>> {
        match self.source.read_u8()? {
            0 => Ok(None),
            1 => Ok(Some(self.read_string()?)),
            other => Err(CodecError::InvalidMarker(other)),
        }
    }
}
