use wasm_encoder::{Encode, RawSection};

use crate::module::{Export, Module};

#[cfg(test)]
mod test;

/// Writes the header followed by every section with a minimal LEB128 size.
pub fn encode(module: &Module) -> Vec<u8> {
    let mut wasm_module = wasm_encoder::Module::new();
    for section in &module.sections {
        wasm_module.section(&RawSection {
            id: section.id as u8,
            data: &section.payload,
        });
    }
    wasm_module.finish()
}

/// Export section payload: the entry count followed by the entries, without
/// the section id and size that [`encode`] adds.
pub fn encode_exports(exports: &[Export]) -> Vec<u8> {
    let mut payload = Vec::new();
    (exports.len() as u32).encode(&mut payload);
    for export in exports {
        export.name.as_str().encode(&mut payload);
        wasm_encoder::ExportKind::from(export.kind).encode(&mut payload);
        export.index.encode(&mut payload);
    }
    payload
}
