//! Selection-reason codec.
//!
//! Descriptors are written in list traversal order (most recent first)
//! and the list is rebuilt on read so that traversing the decoded reason
//! reproduces the stream order exactly. The order is part of the format;
//! nothing here reverses it.

use std::io::{Read, Write};

use lockgraph_core::{SelectionCause, SelectionDescriptor, SelectionReason};

use crate::error::{CodecError, Result};
use crate::rw::{Decoder, Encoder};

/// Cause tag bytes.
const CAUSE_ROOT: u8 = 0x01;
const CAUSE_REQUESTED: u8 = 0x02;
const CAUSE_SELECTED_BY_RULE: u8 = 0x03;
const CAUSE_CONFLICT_RESOLUTION: u8 = 0x04;
const CAUSE_FORCED: u8 = 0x05;
const CAUSE_CONSTRAINT: u8 = 0x06;
const CAUSE_REJECTION: u8 = 0x07;
const CAUSE_COMPOSITE: u8 = 0x08;
const CAUSE_BY_ANCESTOR: u8 = 0x09;

fn cause_tag(cause: SelectionCause) -> u8 {
    match cause {
        SelectionCause::Root => CAUSE_ROOT,
        SelectionCause::Requested => CAUSE_REQUESTED,
        SelectionCause::SelectedByRule => CAUSE_SELECTED_BY_RULE,
        SelectionCause::ConflictResolution => CAUSE_CONFLICT_RESOLUTION,
        SelectionCause::Forced => CAUSE_FORCED,
        SelectionCause::Constraint => CAUSE_CONSTRAINT,
        SelectionCause::Rejection => CAUSE_REJECTION,
        SelectionCause::Composite => CAUSE_COMPOSITE,
        SelectionCause::ByAncestor => CAUSE_BY_ANCESTOR,
    }
}

fn cause_from_tag(tag: u8) -> Result<SelectionCause> {
    match tag {
        CAUSE_ROOT => Ok(SelectionCause::Root),
        CAUSE_REQUESTED => Ok(SelectionCause::Requested),
        CAUSE_SELECTED_BY_RULE => Ok(SelectionCause::SelectedByRule),
        CAUSE_CONFLICT_RESOLUTION => Ok(SelectionCause::ConflictResolution),
        CAUSE_FORCED => Ok(SelectionCause::Forced),
        CAUSE_CONSTRAINT => Ok(SelectionCause::Constraint),
        CAUSE_REJECTION => Ok(SelectionCause::Rejection),
        CAUSE_COMPOSITE => Ok(SelectionCause::Composite),
        CAUSE_BY_ANCESTOR => Ok(SelectionCause::ByAncestor),
        _ => Err(CodecError::InvalidTag {
            what: "selection cause",
            tag,
        }),
    }
}

pub(crate) fn write<W: Write>(encoder: &mut Encoder<W>, reason: &SelectionReason) -> Result<()> {
    let descriptors = reason.descriptors();
    encoder.write_small_u64(descriptors.len() as u64)?;
    for descriptor in descriptors.iter() {
        encoder.write_u8(cause_tag(descriptor.cause))?;
        encoder.write_nullable_string(descriptor.custom_description.as_deref())?;
    }
    Ok(())
}

pub(crate) fn read<R: Read>(decoder: &mut Decoder<R>) -> Result<SelectionReason> {
    let count = decoder.read_small_u64()?;
    // Count is untrusted; pre-allocate conservatively and let the loop
    // fail against the stream if the count lies.
    let mut descriptors = Vec::with_capacity(count.min(crate::rw::PREALLOC_LIMIT) as usize);
    for _ in 0..count {
        let cause = cause_from_tag(decoder.read_u8()?)?;
        let custom_description = decoder.read_nullable_string()?;
        descriptors.push(SelectionDescriptor {
            cause,
            custom_description,
        });
    }
    Ok(SelectionReason::from_traversal_order(descriptors))
}
