pub mod opcodes;


use rayon::prelude::*;

use wasmparser::{
    BinaryReader, BinaryReaderError, CodeSectionReader, FunctionBody, Operator, WasmFeatures,
};

use crate::error::ScanError;
use crate::module::{Module, SectionId};
use opcodes::{MemoryOpcode, Opcode, PREFIX_ATOMIC, PREFIX_GC, PREFIX_MISC, PREFIX_SIMD};

/// Location of an instruction that needs linear memory. `function` counts
/// defined functions only and `offset` is relative to the start of the code
/// section payload.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct MemoryUse {
    pub opcode: MemoryOpcode,
    pub function: u32,
    pub offset: usize,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ScanResult {
    Clean,
    Found(MemoryUse),
}

pub fn scan_for_memory_use(module: &Module) -> Result<ScanResult, ScanError> {
    let bodies = code_bodies(module)?;
    first_use(bodies.iter().map(scan_body))
}

/// Same as [`scan_for_memory_use`], with bodies scanned on the rayon pool.
/// Results are merged by function index, so the reported use is the one a
/// sequential scan would find.
pub fn scan_for_memory_use_parallel(module: &Module) -> Result<ScanResult, ScanError> {
    let bodies = code_bodies(module)?;
    let results: Vec<_> = bodies.par_iter().map(scan_body).collect();
    first_use(results)
}

fn first_use(
    results: impl IntoIterator<Item = Result<Option<MemoryUse>, ScanError>>,
) -> Result<ScanResult, ScanError> {
    for result in results {
        if let Some(found) = result? {
            return Ok(ScanResult::Found(found));
        }
    }
    Ok(ScanResult::Clean)
}

fn code_bodies(module: &Module) -> Result<Vec<(u32, FunctionBody<'_>)>, ScanError> {
    let Some(code) = module.section(SectionId::Code) else {
        return Ok(Vec::new());
    };
    let malformed = |error: BinaryReaderError| ScanError::MalformedCodeSection {
        offset: error.offset(),
        reason: error.message().to_string(),
    };

    let reader = BinaryReader::new(&code.payload, 0, WasmFeatures::all());
    let bodies = CodeSectionReader::new(reader).map_err(malformed)?;
    (0..)
        .zip(bodies)
        .map(|(index, body)| body.map(|body| (index, body)).map_err(malformed))
        .collect()
}

fn scan_body((function, body): &(u32, FunctionBody<'_>)) -> Result<Option<MemoryUse>, ScanError> {
    let function = *function;
    let malformed = |error: BinaryReaderError| ScanError::MalformedBody {
        function,
        offset: error.offset(),
        reason: error.message().to_string(),
    };

    let mut operators = body.get_operators_reader().map_err(malformed)?;
    let mut depth = 0u32;
    loop {
        if operators.eof() {
            return Err(ScanError::MalformedBody {
                function,
                offset: operators.original_position(),
                reason: "missing `end` of function".to_string(),
            });
        }
        let (operator, offset) = operators.read_with_offset().map_err(|error| {
            match unknown_opcode(body, &error) {
                Some(opcode) => ScanError::UnknownOpcode {
                    opcode,
                    function,
                    offset: error.offset(),
                },
                None => malformed(error),
            }
        })?;

        if let Some(opcode) = MemoryOpcode::from_operator(&operator) {
            return Ok(Some(MemoryUse {
                opcode,
                function,
                offset,
            }));
        }
        match operator {
            Operator::Block { .. }
            | Operator::Loop { .. }
            | Operator::If { .. }
            | Operator::Try { .. }
            | Operator::TryTable { .. } => depth += 1,
            Operator::End | Operator::Delegate { .. } if depth == 0 => break,
            Operator::End | Operator::Delegate { .. } => depth -= 1,
            _ => {}
        }
    }
    operators.ensure_end().map_err(malformed)?;
    Ok(None)
}

/// wasmparser rejects an opcode it does not know at the offset of its first
/// byte. Reads that opcode back from the body so it can be reported.
fn unknown_opcode(body: &FunctionBody<'_>, error: &BinaryReaderError) -> Option<Opcode> {
    let message = error.message();
    if !(message.starts_with("illegal opcode") || message.starts_with("unknown 0x")) {
        return None;
    }
    let start = error.offset().checked_sub(body.range().start)?;
    let bytes = body.as_bytes().get(start..)?;
    let mut reader = BinaryReader::new(bytes, error.offset(), WasmFeatures::all());
    let byte = reader.read_u8().ok()?;
    match byte {
        PREFIX_GC | PREFIX_MISC | PREFIX_SIMD | PREFIX_ATOMIC => {
            let sub = reader.read_var_u32().ok()?;
            Some(Opcode::prefixed(byte, sub))
        }
        _ => Some(Opcode::single(byte)),
    }
}
