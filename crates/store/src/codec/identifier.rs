//! Component-identifier codec.
//!
//! Polymorphic over identifier kind: a tag byte selects the layout.
//! Writer and reader share the same closed tag set; an unknown tag on
//! read is a hard failure, never a guess.

use std::io::{Read, Write};

use lockgraph_core::ComponentId;

use crate::codec::coordinate;
use crate::error::{CodecError, Result};
use crate::rw::{Decoder, Encoder};

/// Identifier tag bytes.
const ID_MODULE: u8 = 0x01;
const ID_PROJECT: u8 = 0x02;
const ID_OPAQUE: u8 = 0x03;

pub(crate) fn write<W: Write>(encoder: &mut Encoder<W>, id: &ComponentId) -> Result<()> {
    match id {
        ComponentId::Module(coordinate) => {
            encoder.write_u8(ID_MODULE)?;
            coordinate::write(encoder, coordinate)?;
        }
        ComponentId::Project {
            build_path,
            project_path,
        } => {
            encoder.write_u8(ID_PROJECT)?;
            encoder.write_string(build_path)?;
            encoder.write_string(project_path)?;
        }
        ComponentId::Opaque { display_name } => {
            encoder.write_u8(ID_OPAQUE)?;
            encoder.write_string(display_name)?;
        }
    }
    Ok(())
}

pub(crate) fn read<R: Read>(decoder: &mut Decoder<R>) -> Result<ComponentId> {
    let tag = decoder.read_u8()?;
    match tag {
        ID_MODULE => Ok(ComponentId::Module(coordinate::read(decoder)?)),
        ID_PROJECT => {
            let build_path = decoder.read_string()?;
            let project_path = decoder.read_string()?;
            Ok(ComponentId::Project {
                build_path,
                project_path,
            })
        }
        ID_OPAQUE => {
            let display_name = decoder.read_string()?;
            Ok(ComponentId::Opaque { display_name })
        }
        _ => Err(CodecError::InvalidTag {
            what: "component id",
            tag,
        }),
    }
}
