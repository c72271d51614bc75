use wasmparser::{BinaryReader, BinaryReaderError, Chunk, Parser, Payload, WasmFeatures};

use crate::error::DecodeError;
use crate::module::{Module, Section, SectionId, MAGIC, VERSION};


/// Splits a binary module into its sections. Payloads are copied verbatim
/// from the input; wasmparser only frames them.
pub fn decode(bytes: &[u8]) -> Result<Module, DecodeError> {
    match bytes.get(..8) {
        Some(header) if header[..4] == MAGIC && header[4..] == VERSION => {}
        _ => return Err(DecodeError::MalformedHeader),
    }

    let mut parser = Parser::new(0);
    let mut rest = bytes;
    let mut sections = Vec::new();
    let mut last_rank = 0;
    loop {
        let offset = bytes.len() - rest.len();
        let (consumed, payload) = match parser.parse(rest, true) {
            Ok(Chunk::Parsed { consumed, payload }) => (consumed, payload),
            // only reachable for streaming input
            Ok(Chunk::NeedMoreData(_)) => return Err(section_error(bytes, offset, None)),
            Err(error) => return Err(section_error(bytes, offset, Some(&error))),
        };
        rest = &rest[consumed..];

        let (byte, range) = match &payload {
            Payload::Version { .. } => continue,
            Payload::End(_) => break,
            payload => match payload.as_section() {
                Some(section) => section,
                None => continue,
            },
        };
        let Some(id) = SectionId::from_byte(byte) else {
            return Err(DecodeError::TrailingGarbage { offset, byte });
        };
        let truncated = DecodeError::TruncatedSection { id, offset };

        if let Payload::CodeSectionStart { size, .. } = &payload {
            parser.skip_section();
            rest = rest
                .get(*size as usize..)
                .ok_or_else(|| truncated.clone())?;
        }

        if let Some(rank) = id.rank() {
            if rank <= last_rank {
                return Err(DecodeError::SectionOutOfOrder { id, offset });
            }
            last_rank = rank;
        }

        let payload = bytes.get(range).ok_or(truncated)?;
        sections.push(Section::new(id, payload));
    }

    Ok(Module { sections })
}

/// Reads the section header at `offset` again to tell the failure modes
/// apart. wasmparser reports them all as a [`BinaryReaderError`].
fn section_error(bytes: &[u8], offset: usize, error: Option<&BinaryReaderError>) -> DecodeError {
    let Some(&byte) = bytes.get(offset) else {
        return DecodeError::MalformedHeader;
    };
    let Some(id) = SectionId::from_byte(byte) else {
        return DecodeError::TrailingGarbage { offset, byte };
    };

    let mut reader = BinaryReader::new(&bytes[offset + 1..], offset + 1, WasmFeatures::all());
    match reader.read_var_u32() {
        Err(size) if size.offset() >= bytes.len() => DecodeError::TruncatedSection { id, offset },
        Err(_) => DecodeError::MalformedSectionSize { id, offset },
        Ok(size) if size as usize > reader.bytes_remaining() => {
            DecodeError::TruncatedSection { id, offset }
        }
        Ok(_) if id == SectionId::Custom => DecodeError::MalformedCustomSection { offset },
        Ok(_) => DecodeError::MalformedSection {
            id,
            offset,
            reason: error.map_or_else(String::new, |error| error.message().to_string()),
        },
    }
}
