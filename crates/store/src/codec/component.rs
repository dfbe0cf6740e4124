//! Component-result codec: one resolved-component record per call.
//!
//! # Wire layout
//!
//! ```text
//! [result_id: varint]
//! [coordinate: group, name, version]
//! [selection reason: count + descriptors, traversal order]
//! [component id: tag + kind layout]
//! [N = |all_variants|: varint][M = |resolved_variants|: varint]
//! N x ([variant: inline or back-reference][resolved: bool])
//! [repository name: nullable string]
//! ```
//!
//! `M` is advisory pre-allocation data; membership is carried by the
//! per-variant flags. Field order is the format: changing it, the count
//! semantics, or the null representation breaks every existing cache
//! file and must be versioned by the file owner.

use std::io::{Read, Write};

use lockgraph_core::{ResolvedComponent, Variant};
use rustc_hash::FxHashSet;

use crate::codec::{coordinate, identifier, reason};
use crate::codec::variant::VariantCodec;
use crate::error::Result;
use crate::rw::{Decoder, Encoder};

/// Codec for [`ResolvedComponent`] records.
///
/// One instance is shared across a whole graph so the embedded variant
/// de-duplication cache spans records. The instance is not internally
/// synchronized: at most one encode or decode in flight at a time,
/// which `&mut self` makes a compile-time property. Call [`reset`]
/// before reusing the instance for an unrelated stream.
///
/// [`reset`]: ComponentResultCodec::reset
#[derive(Debug, Default)]
pub struct ComponentResultCodec {
    variants: VariantCodec,
}

impl ComponentResultCodec {
    /// A codec with a fresh variant cache.
    pub fn new() -> Self {
        ComponentResultCodec::default()
    }

    /// Clear stream-scoped state (the variant de-duplication cache).
    pub fn reset(&mut self) {
        self.variants.reset();
    }

    /// Write one record. Exact inverse of [`read`](Self::read).
    pub fn write<W: Write>(
        &mut self,
        encoder: &mut Encoder<W>,
        component: &ResolvedComponent,
    ) -> Result<()> {
        encoder.write_small_u64(component.result_id)?;
        coordinate::write(encoder, &component.coordinate)?;
        reason::write(encoder, &component.selection_reason)?;
        identifier::write(encoder, &component.component_id)?;
        self.write_variant_table(encoder, component)?;
        encoder.write_nullable_string(component.repository_name.as_deref())?;
        Ok(())
    }

    /// Read one record, producing a detached component with no tie to
    /// the session that wrote it.
    pub fn read<R: Read>(&mut self, decoder: &mut Decoder<R>) -> Result<ResolvedComponent> {
        let result_id = decoder.read_small_u64()?;
        let coordinate = coordinate::read(decoder)?;
        let selection_reason = reason::read(decoder)?;
        let component_id = identifier::read(decoder)?;
        let (all_variants, resolved_variants) = self.read_variant_table(decoder)?;
        let repository_name = decoder.read_nullable_string()?;
        Ok(ResolvedComponent {
            result_id,
            coordinate,
            selection_reason,
            component_id,
            all_variants,
            resolved_variants,
            repository_name,
        })
    }

    fn write_variant_table<W: Write>(
        &mut self,
        encoder: &mut Encoder<W>,
        component: &ResolvedComponent,
    ) -> Result<()> {
        // Membership is by value; materialize the set once instead of
        // scanning resolved_variants per entry.
        let resolved: FxHashSet<&Variant> = component.resolved_variants.iter().collect();
        encoder.write_small_u64(component.all_variants.len() as u64)?;
        encoder.write_small_u64(component.resolved_variants.len() as u64)?;
        for variant in &component.all_variants {
            self.variants.write(encoder, variant)?;
            encoder.write_bool(resolved.contains(variant))?;
        }
        Ok(())
    }

    fn read_variant_table<R: Read>(
        &mut self,
        decoder: &mut Decoder<R>,
    ) -> Result<(Vec<Variant>, Vec<Variant>)> {
        let all_count = decoder.read_small_u64()?;
        let resolved_count = decoder.read_small_u64()?;
        // Both counts are untrusted stream data; cap the pre-allocation
        // and let decoding fail where the stream actually ends.
        let limit = crate::rw::PREALLOC_LIMIT;
        let mut all_variants = Vec::with_capacity(all_count.min(limit) as usize);
        let mut resolved_variants = Vec::with_capacity(resolved_count.min(limit) as usize);
        for _ in 0..all_count {
            let variant = self.variants.read(decoder)?;
            if decoder.read_bool()? {
                resolved_variants.push(variant.clone());
            }
            all_variants.push(variant);
        }
        Ok((all_variants, resolved_variants))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lockgraph_core::{
        ComponentId, ModuleCoordinate, SelectionCause, SelectionDescriptor, SelectionReason,
    };

    fn module_component(result_id: u64) -> ResolvedComponent {
        let coordinate = ModuleCoordinate::new("org.example", "lib", "1.0");
        ResolvedComponent {
            result_id,
            coordinate: coordinate.clone(),
            selection_reason: SelectionReason::requested(),
            component_id: ComponentId::Module(coordinate),
            all_variants: vec![
                Variant::new("api").with_attribute("org.gradle.usage", "java-api"),
                Variant::new("runtime").with_attribute("org.gradle.usage", "java-runtime"),
            ],
            resolved_variants: vec![
                Variant::new("runtime").with_attribute("org.gradle.usage", "java-runtime"),
            ],
            repository_name: Some("mavenCentral".into()),
        }
    }

    fn round_trip(component: &ResolvedComponent) -> ResolvedComponent {
        let mut codec = ComponentResultCodec::new();
        let mut buf = Vec::new();
        codec
            .write(&mut Encoder::new(&mut buf), component)
            .unwrap();

        let mut reader = ComponentResultCodec::new();
        reader.read(&mut Decoder::new(buf.as_slice())).unwrap()
    }

    #[test]
    fn test_full_record_round_trips() {
        let component = module_component(42);
        assert_eq!(round_trip(&component), component);
    }

    #[test]
    fn test_empty_variant_table_round_trips() {
        let mut component = module_component(1);
        component.all_variants.clear();
        component.resolved_variants.clear();
        assert_eq!(round_trip(&component), component);
    }

    #[test]
    fn test_no_resolved_variants_round_trips() {
        let mut component = module_component(1);
        component.resolved_variants.clear();
        let decoded = round_trip(&component);
        assert!(decoded.resolved_variants.is_empty());
        assert_eq!(decoded.all_variants, component.all_variants);
    }

    #[test]
    fn test_all_variants_resolved_round_trips() {
        let mut component = module_component(1);
        component.resolved_variants = component.all_variants.clone();
        assert_eq!(round_trip(&component), component);
    }

    #[test]
    fn test_null_repository_distinct_from_empty() {
        let mut component = module_component(1);
        component.repository_name = None;
        assert_eq!(round_trip(&component).repository_name, None);

        component.repository_name = Some(String::new());
        assert_eq!(
            round_trip(&component).repository_name,
            Some(String::new())
        );
    }

    #[test]
    fn test_partition_preserves_positions_and_order() {
        let variants: Vec<Variant> = (0..5)
            .map(|i| Variant::new(format!("variant-{}", i)))
            .collect();
        let mut component = module_component(7);
        component.all_variants = variants.clone();
        // Resolved subset at original positions 1 and 3.
        component.resolved_variants = vec![variants[1].clone(), variants[3].clone()];

        let decoded = round_trip(&component);
        assert_eq!(decoded.all_variants, variants);
        assert_eq!(
            decoded.resolved_variants,
            vec![variants[1].clone(), variants[3].clone()]
        );
    }

    // Two value-equal entries in all_variants must both survive; the
    // table must not collapse positional duplicates.
    #[test]
    fn test_duplicate_variant_values_survive() {
        let dup = Variant::new("api");
        let resolved = Variant::new("runtime");
        let mut component = module_component(9);
        component.all_variants = vec![dup.clone(), resolved.clone(), dup.clone()];
        component.resolved_variants = vec![resolved.clone()];

        let decoded = round_trip(&component);
        assert_eq!(
            decoded.all_variants,
            vec![dup.clone(), resolved.clone(), dup]
        );
        assert_eq!(decoded.resolved_variants, vec![resolved]);
    }

    #[test]
    fn test_dedup_spans_records_within_one_stream() {
        let first = module_component(1);
        let mut second = module_component(2);
        second.coordinate = ModuleCoordinate::new("org.example", "other", "2.0");

        let mut codec = ComponentResultCodec::new();
        let mut buf = Vec::new();
        let mut encoder = Encoder::new(&mut buf);
        codec.write(&mut encoder, &first).unwrap();
        let after_first = buf.len();
        let mut encoder = Encoder::new(&mut buf);
        codec.write(&mut encoder, &second).unwrap();

        // Second record shares both variant payloads by reference.
        let mut fresh = ComponentResultCodec::new();
        let mut alone = Vec::new();
        fresh.write(&mut Encoder::new(&mut alone), &second).unwrap();
        assert!(buf.len() - after_first < alone.len());

        let mut reader = ComponentResultCodec::new();
        let mut decoder = Decoder::new(buf.as_slice());
        assert_eq!(reader.read(&mut decoder).unwrap(), first);
        assert_eq!(reader.read(&mut decoder).unwrap(), second);
    }

    // Cache isolation: write A, reset, write B == write B on a fresh
    // instance, byte for byte.
    #[test]
    fn test_reset_isolates_sessions() {
        let a = module_component(1);
        let b = module_component(2);

        let mut shared = ComponentResultCodec::new();
        let mut scratch = Vec::new();
        shared.write(&mut Encoder::new(&mut scratch), &a).unwrap();
        shared.reset();
        let mut reused = Vec::new();
        shared.write(&mut Encoder::new(&mut reused), &b).unwrap();

        let mut fresh = ComponentResultCodec::new();
        let mut alone = Vec::new();
        fresh.write(&mut Encoder::new(&mut alone), &b).unwrap();

        assert_eq!(reused, alone);
    }

    #[test]
    fn test_selection_history_order_survives() {
        let mut component = module_component(3);
        component.selection_reason = SelectionReason::root()
            .with_descriptor(SelectionDescriptor::of(SelectionCause::Requested))
            .with_descriptor(SelectionDescriptor::of(SelectionCause::ConflictResolution));

        let decoded = round_trip(&component);
        let causes: Vec<_> = decoded
            .selection_reason
            .descriptors()
            .iter()
            .map(|d| d.cause)
            .collect();
        assert_eq!(
            causes,
            vec![
                SelectionCause::ConflictResolution,
                SelectionCause::Requested,
                SelectionCause::Root,
            ]
        );
    }

    #[test]
    fn test_project_component_round_trips() {
        let mut component = module_component(5);
        component.component_id = ComponentId::Project {
            build_path: ":".into(),
            project_path: ":app".into(),
        };
        component.repository_name = None;
        assert_eq!(round_trip(&component), component);
    }

    // A record whose variant count claims u64::MAX entries must fail
    // at the point the stream runs out, not during pre-allocation.
    #[test]
    fn test_huge_variant_count_is_an_error_not_a_panic() {
        let mut buf = Vec::new();
        let mut encoder = Encoder::new(&mut buf);
        encoder.write_small_u64(1).unwrap(); // result_id
        encoder.write_string("org.example").unwrap();
        encoder.write_string("lib").unwrap();
        encoder.write_string("1.0").unwrap();
        encoder.write_small_u64(0).unwrap(); // no descriptors
        encoder.write_u8(0x03).unwrap(); // opaque component id
        encoder.write_string("id").unwrap();
        encoder.write_small_u64(u64::MAX).unwrap(); // N
        encoder.write_small_u64(u64::MAX).unwrap(); // M

        let mut reader = ComponentResultCodec::new();
        let result = reader.read(&mut Decoder::new(buf.as_slice()));
        assert!(matches!(result, Err(crate::error::CodecError::Io(_))));
    }

    #[test]
    fn test_truncated_record_fails() {
        let component = module_component(1);
        let mut codec = ComponentResultCodec::new();
        let mut buf = Vec::new();
        codec
            .write(&mut Encoder::new(&mut buf), &component)
            .unwrap();
        buf.truncate(buf.len() / 2);

        let mut reader = ComponentResultCodec::new();
        assert!(reader.read(&mut Decoder::new(buf.as_slice())).is_err());
    }
}
