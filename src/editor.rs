use wasmparser::{
    BinaryReader, BinaryReaderError, DataSectionReader, ExportSectionReader, WasmFeatures,
};

use crate::encoder::encode_exports;
use crate::error::EditError;
use crate::module::{Export, ExportKind, Module, SectionId};


#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Edit {
    pub module: Module,
    pub removed_exports: Vec<Export>,
}

/// Removes the memory section and every memory export. The module must
/// already be known not to use memory.
pub fn strip_memory(module: Module) -> Result<Module, EditError> {
    edit(module).map(|edit| edit.module)
}

pub fn edit(mut module: Module) -> Result<Edit, EditError> {
    let memory = module
        .position(SectionId::Memory)
        .ok_or(EditError::NoMemorySection)?;

    // Without a memory, active segments have nothing to initialize.
    if let Some(data) = module.section(SectionId::Data) {
        let count = DataSectionReader::new(reader(&data.payload))
            .map_err(|e| malformed(SectionId::Data, e))?
            .count();
        if count > 0 {
            return Err(EditError::DataSegmentsPresent { count });
        }
    }

    module.sections.remove(memory);

    let mut removed_exports = Vec::new();
    if let Some(position) = module.position(SectionId::Export) {
        let (kept, removed): (Vec<Export>, Vec<Export>) =
            parse_exports(&module.sections[position].payload)?
                .into_iter()
                .partition(|export| export.kind != ExportKind::Memory);
        // An export section that lost nothing keeps its bytes, even when empty.
        if !removed.is_empty() {
            if kept.is_empty() {
                module.sections.remove(position);
            } else {
                module.sections[position].payload = encode_exports(&kept);
            }
        }
        removed_exports = removed;
    }

    Ok(Edit {
        module,
        removed_exports,
    })
}

pub fn parse_exports(payload: &[u8]) -> Result<Vec<Export>, EditError> {
    let exports = ExportSectionReader::new(reader(payload))
        .map_err(|e| malformed(SectionId::Export, e))?;
    exports
        .into_iter()
        .map(|export| {
            export
                .map(|export| Export {
                    name: export.name.to_string(),
                    kind: export.kind.into(),
                    index: export.index,
                })
                .map_err(|e| malformed(SectionId::Export, e))
        })
        .collect()
}

fn reader(payload: &[u8]) -> BinaryReader<'_> {
    BinaryReader::new(payload, 0, WasmFeatures::all())
}

fn malformed(id: SectionId, error: BinaryReaderError) -> EditError {
    EditError::MalformedSection {
        id,
        offset: error.offset(),
        reason: error.message().to_string(),
    }
}
