//! Binary persistence for resolved dependency graphs.
//!
//! This crate owns the wire format that backs resolution-result caches:
//! - `rw`: byte-stream primitives (varints, strict booleans, nullable
//!   strings)
//! - `codec`: per-record codecs; [`ComponentResultCodec`] writes and
//!   reads one resolved component, [`VariantCodec`] de-duplicates
//!   variant values within one stream
//! - `graph`: whole-file framing (magic, version, CRC32 footer) via
//!   [`GraphWriter`] and [`GraphReader`]
//!
//! Nothing here retries or recovers: a malformed or truncated stream
//! fails the whole operation and the caller recomputes.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod error;
pub mod graph;
pub mod rw;

pub use codec::{ComponentResultCodec, VariantCodec};
pub use error::{CodecError, Result};
pub use graph::{GraphReader, GraphWriter, GRAPH_FORMAT_VERSION, GRAPH_MAGIC};
pub use rw::{Decoder, Encoder};
