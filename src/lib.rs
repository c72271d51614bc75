//! Removes an unused linear memory from a WebAssembly module by editing the
//! binary directly: decode the sections, prove that no function touches
//! memory, drop the memory section and its exports, and encode the result.

pub mod decoder;
pub mod editor;
pub mod encoder;
pub mod error;
pub mod module;
pub mod scanner;

#[cfg(test)]
mod testing;

pub use decoder::decode;
pub use editor::strip_memory;
pub use encoder::encode;
pub use error::{DecodeError, EditError, Error, ScanError, StripResult};
pub use scanner::{scan_for_memory_use, scan_for_memory_use_parallel, MemoryUse, ScanResult};

use module::Export;

#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Scan function bodies on the rayon thread pool.
    pub parallel: bool,
}

#[derive(Debug, Clone)]
pub struct Stripped {
    pub bytes: Vec<u8>,
    pub removed_exports: Vec<Export>,
    pub original_len: usize,
}

impl Stripped {
    pub fn saved(&self) -> usize {
        self.original_len.saturating_sub(self.bytes.len())
    }
}

/// Runs the whole pipeline. Nothing is produced unless every stage succeeds.
pub fn strip_unused_memory(bytes: &[u8], options: &Options) -> StripResult<Stripped> {
    let module = decode(bytes)?;

    let scan = if options.parallel {
        scan_for_memory_use_parallel(&module)?
    } else {
        scan_for_memory_use(&module)?
    };
    if let ScanResult::Found(found) = scan {
        return Err(Error::MemoryInstructionFound(found));
    }

    let edit = editor::edit(module)?;
    Ok(Stripped {
        bytes: encode(&edit.module),
        removed_exports: edit.removed_exports,
        original_len: bytes.len(),
    })
}
