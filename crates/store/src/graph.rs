//! Whole-graph cache files.
//!
//! The component codec persists one record; this module owns the file
//! around it: magic, format version, record count, and a CRC32 footer
//! so a corrupted cache entry fails loudly instead of decoding garbage.
//!
//! # File structure
//!
//! ```text
//! +------------------+
//! | Magic "LKGR"     | 4 bytes
//! +------------------+
//! | Format version   | 4 bytes, u32 LE
//! +------------------+
//! | Component count  | varint
//! | Records          | back-to-back, one shared codec
//! +------------------+
//! | Footer CRC32     | 4 bytes, u32 LE, over count + records
//! +------------------+
//! ```
//!
//! Records are written in the caller-supplied order and read back in the
//! same order. One codec instance spans the whole file, so variant
//! values repeated across records are stored once.

use std::io::{Read, Write};

use lockgraph_core::ResolvedComponent;
use tracing::debug;

use crate::codec::ComponentResultCodec;
use crate::error::{CodecError, Result};
use crate::rw::{Decoder, Encoder};

/// Magic bytes: "LKGR".
pub const GRAPH_MAGIC: [u8; 4] = *b"LKGR";

/// Current graph-file format version. Any change to field order, count
/// semantics, or null representation bumps this.
pub const GRAPH_FORMAT_VERSION: u32 = 1;

/// Writes finished graphs to cache files.
#[derive(Debug, Default)]
pub struct GraphWriter {
    codec: ComponentResultCodec,
}

impl GraphWriter {
    /// A writer with a fresh codec.
    pub fn new() -> Self {
        GraphWriter::default()
    }

    /// Persist every component of a finished graph, in the given order.
    ///
    /// The codec is reset at session start, so a writer instance can be
    /// reused across unrelated graphs.
    pub fn write_graph<W: Write>(
        &mut self,
        mut sink: W,
        components: &[ResolvedComponent],
    ) -> Result<()> {
        self.codec.reset();

        // Payload is framed in memory first: the footer checksum covers
        // all of it, and a graph is small relative to the work that
        // produced it.
        let mut payload = Vec::new();
        let mut encoder = Encoder::new(&mut payload);
        encoder.write_small_u64(components.len() as u64)?;
        for component in components {
            self.codec.write(&mut encoder, component)?;
        }

        let checksum = crc32fast::hash(&payload);

        sink.write_all(&GRAPH_MAGIC)?;
        sink.write_all(&GRAPH_FORMAT_VERSION.to_le_bytes())?;
        sink.write_all(&payload)?;
        sink.write_all(&checksum.to_le_bytes())?;

        debug!(
            components = components.len(),
            payload_bytes = payload.len(),
            "wrote resolution graph"
        );
        Ok(())
    }
}

/// Reads cache files back into detached records.
#[derive(Debug, Default)]
pub struct GraphReader {
    codec: ComponentResultCodec,
}

impl GraphReader {
    /// A reader with a fresh codec.
    pub fn new() -> Self {
        GraphReader::default()
    }

    /// Reconstruct every component of a persisted graph, in file order.
    ///
    /// Fails without producing a partial result: bad magic, a newer
    /// format version, a checksum mismatch, trailing bytes, or any
    /// malformed record abandons the whole read. Callers discard the
    /// cache entry and recompute.
    pub fn read_graph<R: Read>(&mut self, mut source: R) -> Result<Vec<ResolvedComponent>> {
        self.codec.reset();

        let mut magic = [0u8; 4];
        source.read_exact(&mut magic)?;
        if magic != GRAPH_MAGIC {
            return Err(CodecError::InvalidMagic {
                expected: GRAPH_MAGIC,
                actual: magic,
            });
        }

        let mut version_bytes = [0u8; 4];
        source.read_exact(&mut version_bytes)?;
        let version = u32::from_le_bytes(version_bytes);
        if version > GRAPH_FORMAT_VERSION {
            return Err(CodecError::UnsupportedVersion {
                version,
                max_supported: GRAPH_FORMAT_VERSION,
            });
        }

        // Everything up to the 4-byte footer is payload.
        let mut rest = Vec::new();
        source.read_to_end(&mut rest)?;
        if rest.len() < 4 {
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "graph file too short for checksum footer",
            )
            .into());
        }
        let (payload, footer) = rest.split_at(rest.len() - 4);
        let expected = u32::from_le_bytes(footer.try_into().expect("footer is 4 bytes"));
        let actual = crc32fast::hash(payload);
        if expected != actual {
            return Err(CodecError::ChecksumMismatch { expected, actual });
        }

        let mut decoder = Decoder::new(payload);
        let count = decoder.read_small_u64()?;
        let mut components = Vec::with_capacity(count.min(crate::rw::PREALLOC_LIMIT) as usize);
        for _ in 0..count {
            components.push(self.codec.read(&mut decoder)?);
        }
        let remaining = decoder.into_inner();
        if !remaining.is_empty() {
            return Err(CodecError::TrailingBytes(remaining.len()));
        }

        debug!(
            components = components.len(),
            payload_bytes = payload.len(),
            "read resolution graph"
        );
        Ok(components)
    }
}
