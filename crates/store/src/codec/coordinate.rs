//! Module-coordinate codec: group, name, version as three strings.

use std::io::{Read, Write};

use lockgraph_core::ModuleCoordinate;

use crate::error::Result;
use crate::rw::{Decoder, Encoder};

pub(crate) fn write<W: Write>(encoder: &mut Encoder<W>, coordinate: &ModuleCoordinate) -> Result<()> {
    encoder.write_string(&coordinate.group)?;
    encoder.write_string(&coordinate.name)?;
    encoder.write_string(&coordinate.version)?;
    Ok(())
}

pub(crate) fn read<R: Read>(decoder: &mut Decoder<R>) -> Result<ModuleCoordinate> {
    let group = decoder.read_string()?;
    let name = decoder.read_string()?;
    let version = decoder.read_string()?;
    Ok(ModuleCoordinate {
        group,
        name,
        version,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_round_trip() {
        let coordinate = ModuleCoordinate::new("org.example", "lib", "1.0-SNAPSHOT");
        let mut buf = Vec::new();
        write(&mut Encoder::new(&mut buf), &coordinate).unwrap();

        let decoded = read(&mut Decoder::new(buf.as_slice())).unwrap();
        assert_eq!(decoded, coordinate);
    }

    #[test]
    fn test_empty_parts_round_trip() {
        let coordinate = ModuleCoordinate::new("", "lib", "");
        let mut buf = Vec::new();
        write(&mut Encoder::new(&mut buf), &coordinate).unwrap();

        let decoded = read(&mut Decoder::new(buf.as_slice())).unwrap();
        assert_eq!(decoded, coordinate);
    }
}
