//! Variant codec with stream-scoped de-duplication.
//!
//! A resolved graph repeats the same variant values across many
//! components. The codec writes each distinct value once and refers back
//! to it by table index afterwards.
//!
//! # Wire layout
//!
//! Each variant starts with a varint reference:
//!
//! - `0` — inline: full payload follows (name, attribute count, sorted
//!   key/value pairs) and the value is appended to the session table.
//! - `k > 0` — back-reference to table entry `k - 1`.
//!
//! The cache is deliberately caller-visible state scoped to one stream.
//! One codec instance is shared across a whole graph so de-duplication
//! spans records; before reusing the instance for an unrelated session,
//! call [`VariantCodec::reset`], otherwise stale back-references leak
//! across streams and corrupt the decode.

use std::io::{Read, Write};

use lockgraph_core::Variant;
use rustc_hash::FxHashMap;

use crate::error::{CodecError, Result};
use crate::rw::{Decoder, Encoder};

/// Reference marker for an inline payload.
const INLINE: u64 = 0;

/// Stateful variant codec. Not internally synchronized; at most one
/// encode or decode may be in flight per instance (enforced by
/// `&mut self`).
#[derive(Debug, Default)]
pub struct VariantCodec {
    /// Write side: value → index of its first occurrence.
    written: FxHashMap<Variant, u64>,
    /// Read side: table of decoded values, indexed by first occurrence.
    table: Vec<Variant>,
}

impl VariantCodec {
    /// A codec with an empty de-duplication table.
    pub fn new() -> Self {
        VariantCodec::default()
    }

    /// Clear all de-duplication state.
    ///
    /// Required between unrelated sessions sharing this instance; never
    /// call it mid-stream.
    pub fn reset(&mut self) {
        self.written.clear();
        self.table.clear();
    }

    /// Write one variant, by back-reference when it was already written
    /// in this session.
    pub fn write<W: Write>(&mut self, encoder: &mut Encoder<W>, variant: &Variant) -> Result<()> {
        if let Some(&index) = self.written.get(variant) {
            return encoder.write_small_u64(index + 1);
        }
        encoder.write_small_u64(INLINE)?;
        encoder.write_string(&variant.name)?;
        encoder.write_small_u64(variant.attributes.len() as u64)?;
        for (key, value) in &variant.attributes {
            encoder.write_string(key)?;
            encoder.write_string(value)?;
        }
        let index = self.written.len() as u64;
        self.written.insert(variant.clone(), index);
        Ok(())
    }

    /// Read one variant, resolving back-references against this
    /// session's table.
    pub fn read<R: Read>(&mut self, decoder: &mut Decoder<R>) -> Result<Variant> {
        let reference = decoder.read_small_u64()?;
        if reference != INLINE {
            let index = reference - 1;
            return self
                .table
                .get(index as usize)
                .cloned()
                .ok_or(CodecError::InvalidVariantRef(reference));
        }
        let name = decoder.read_string()?;
        let attribute_count = decoder.read_small_u64()? as usize;
        let mut variant = Variant::new(name);
        for _ in 0..attribute_count {
            let key = decoder.read_string()?;
            let value = decoder.read_string()?;
            variant.attributes.insert(key, value);
        }
        self.table.push(variant.clone());
        Ok(variant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Variant {
        Variant::new("runtimeElements")
            .with_attribute("org.gradle.usage", "java-runtime")
            .with_attribute("org.gradle.category", "library")
    }

    #[test]
    fn test_round_trip_with_attributes() {
        let variant = sample();
        let mut codec = VariantCodec::new();
        let mut buf = Vec::new();
        codec.write(&mut Encoder::new(&mut buf), &variant).unwrap();

        let mut reader = VariantCodec::new();
        let decoded = reader.read(&mut Decoder::new(buf.as_slice())).unwrap();
        assert_eq!(decoded, variant);
    }

    #[test]
    fn test_repeated_value_is_written_by_reference() {
        let variant = sample();
        let mut codec = VariantCodec::new();

        let mut first = Vec::new();
        codec.write(&mut Encoder::new(&mut first), &variant).unwrap();
        let mut second = Vec::new();
        codec.write(&mut Encoder::new(&mut second), &variant).unwrap();

        // Second occurrence is a bare back-reference: one varint byte.
        assert!(first.len() > second.len());
        assert_eq!(second, vec![0x01]);

        let mut stream = first;
        stream.extend_from_slice(&second);
        let mut reader = VariantCodec::new();
        let mut decoder = Decoder::new(stream.as_slice());
        let a = reader.read(&mut decoder).unwrap();
        let b = reader.read(&mut decoder).unwrap();
        assert_eq!(a, variant);
        assert_eq!(b, variant);
    }

    #[test]
    fn test_distinct_values_get_distinct_indices() {
        let v1 = Variant::new("api");
        let v2 = Variant::new("runtime");
        let mut codec = VariantCodec::new();
        let mut buf = Vec::new();
        let mut encoder = Encoder::new(&mut buf);
        codec.write(&mut encoder, &v1).unwrap();
        codec.write(&mut encoder, &v2).unwrap();
        codec.write(&mut encoder, &v1).unwrap();
        codec.write(&mut encoder, &v2).unwrap();

        let mut reader = VariantCodec::new();
        let mut decoder = Decoder::new(buf.as_slice());
        assert_eq!(reader.read(&mut decoder).unwrap(), v1);
        assert_eq!(reader.read(&mut decoder).unwrap(), v2);
        assert_eq!(reader.read(&mut decoder).unwrap(), v1);
        assert_eq!(reader.read(&mut decoder).unwrap(), v2);
    }

    #[test]
    fn test_reset_restores_fresh_encoding() {
        let variant = sample();
        let mut codec = VariantCodec::new();

        let mut first = Vec::new();
        codec.write(&mut Encoder::new(&mut first), &variant).unwrap();

        codec.reset();
        let mut after_reset = Vec::new();
        codec
            .write(&mut Encoder::new(&mut after_reset), &variant)
            .unwrap();

        // Identical to a fresh instance's encoding, not a stale reference.
        assert_eq!(after_reset, first);
    }

    #[test]
    fn test_dangling_back_reference_is_rejected() {
        let mut buf = Vec::new();
        Encoder::new(&mut buf).write_small_u64(5).unwrap();
        let mut reader = VariantCodec::new();
        assert!(matches!(
            reader.read(&mut Decoder::new(buf.as_slice())),
            Err(CodecError::InvalidVariantRef(5))
        ));
    }
}
