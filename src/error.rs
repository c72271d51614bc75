use thiserror::Error;

use crate::module::SectionId;
use crate::scanner::opcodes::Opcode;
use crate::scanner::MemoryUse;

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum DecodeError {
    #[error("malformed header: expected `\\0asm` magic and version 1")]
    MalformedHeader,
    #[error("{id} section at offset {offset:#x} is truncated")]
    TruncatedSection { id: SectionId, offset: usize },
    #[error("{id} section at offset {offset:#x} has a malformed size")]
    MalformedSectionSize { id: SectionId, offset: usize },
    #[error("trailing bytes at offset {offset:#x} do not start a section (id byte {byte:#04x})")]
    TrailingGarbage { offset: usize, byte: u8 },
    #[error("{id} section at offset {offset:#x} is out of order or duplicated")]
    SectionOutOfOrder { id: SectionId, offset: usize },
    #[error("custom section at offset {offset:#x} has a malformed name")]
    MalformedCustomSection { offset: usize },
    #[error("malformed {id} section at offset {offset:#x}: {reason}")]
    MalformedSection {
        id: SectionId,
        offset: usize,
        reason: String,
    },
}

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum ScanError {
    #[error("unknown opcode {opcode} in function {function} at code offset {offset:#x}")]
    UnknownOpcode {
        opcode: Opcode,
        function: u32,
        offset: usize,
    },
    #[error("malformed body of function {function} at code offset {offset:#x}: {reason}")]
    MalformedBody {
        function: u32,
        offset: usize,
        reason: String,
    },
    #[error("malformed code section at offset {offset:#x}: {reason}")]
    MalformedCodeSection { offset: usize, reason: String },
}

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum EditError {
    #[error("module has no memory section to remove")]
    NoMemorySection,
    #[error("data section still initializes memory with {count} segment(s)")]
    DataSegmentsPresent { count: u32 },
    #[error("malformed {id} section at offset {offset:#x}: {reason}")]
    MalformedSection {
        id: SectionId,
        offset: usize,
        reason: String,
    },
}

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(
        "memory instruction `{}` found in function {} at code offset {:#x}; memory is in use",
        .0.opcode, .0.function, .0.offset
    )]
    MemoryInstructionFound(MemoryUse),
    #[error(transparent)]
    Edit(#[from] EditError),
}

pub type StripResult<T> = Result<T, Error>;
