use std::fmt::{Display, Formatter};

pub const MAGIC: [u8; 4] = *b"\0asm";
pub const VERSION: [u8; 4] = [0x01, 0x00, 0x00, 0x00];

#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SectionId {
    Custom = 0,
    Type = 1,
    Import = 2,
    Function = 3,
    Table = 4,
    Memory = 5,
    Global = 6,
    Export = 7,
    Start = 8,
    Element = 9,
    Code = 10,
    Data = 11,
    DataCount = 12,
    Tag = 13,
}

impl SectionId {
    pub fn from_byte(byte: u8) -> Option<Self> {
        let id = match byte {
            0 => SectionId::Custom,
            1 => SectionId::Type,
            2 => SectionId::Import,
            3 => SectionId::Function,
            4 => SectionId::Table,
            5 => SectionId::Memory,
            6 => SectionId::Global,
            7 => SectionId::Export,
            8 => SectionId::Start,
            9 => SectionId::Element,
            10 => SectionId::Code,
            11 => SectionId::Data,
            12 => SectionId::DataCount,
            13 => SectionId::Tag,
            _ => return None,
        };
        Some(id)
    }

    /// Position of the section in the canonical module layout. Custom
    /// sections may appear anywhere and have no rank.
    pub fn rank(self) -> Option<u8> {
        let rank = match self {
            SectionId::Custom => return None,
            SectionId::Type => 1,
            SectionId::Import => 2,
            SectionId::Function => 3,
            SectionId::Table => 4,
            SectionId::Memory => 5,
            SectionId::Tag => 6,
            SectionId::Global => 7,
            SectionId::Export => 8,
            SectionId::Start => 9,
            SectionId::Element => 10,
            SectionId::DataCount => 11,
            SectionId::Code => 12,
            SectionId::Data => 13,
        };
        Some(rank)
    }
}

impl Display for SectionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionId::Custom => write!(f, "custom"),
            SectionId::Type => write!(f, "type"),
            SectionId::Import => write!(f, "import"),
            SectionId::Function => write!(f, "function"),
            SectionId::Table => write!(f, "table"),
            SectionId::Memory => write!(f, "memory"),
            SectionId::Global => write!(f, "global"),
            SectionId::Export => write!(f, "export"),
            SectionId::Start => write!(f, "start"),
            SectionId::Element => write!(f, "element"),
            SectionId::Code => write!(f, "code"),
            SectionId::Data => write!(f, "data"),
            SectionId::DataCount => write!(f, "data count"),
            SectionId::Tag => write!(f, "tag"),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Section {
    pub id: SectionId,
    pub payload: Vec<u8>,
}

impl Section {
    pub fn new(id: SectionId, payload: impl Into<Vec<u8>>) -> Self {
        Section {
            id,
            payload: payload.into(),
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Module {
    pub sections: Vec<Section>,
}

impl Module {
    /// Finds the single known section with the given id. Custom sections can
    /// repeat, so looking one up by id only returns the first.
    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.iter().find(|section| section.id == id)
    }

    pub fn position(&self, id: SectionId) -> Option<usize> {
        self.sections.iter().position(|section| section.id == id)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ExportKind {
    Func,
    Table,
    Memory,
    Global,
    Tag,
}

impl From<wasmparser::ExternalKind> for ExportKind {
    fn from(kind: wasmparser::ExternalKind) -> Self {
        use wasmparser::ExternalKind;
        match kind {
            ExternalKind::Func => ExportKind::Func,
            ExternalKind::Table => ExportKind::Table,
            ExternalKind::Memory => ExportKind::Memory,
            ExternalKind::Global => ExportKind::Global,
            ExternalKind::Tag => ExportKind::Tag,
        }
    }
}

impl From<ExportKind> for wasm_encoder::ExportKind {
    fn from(kind: ExportKind) -> Self {
        match kind {
            ExportKind::Func => wasm_encoder::ExportKind::Func,
            ExportKind::Table => wasm_encoder::ExportKind::Table,
            ExportKind::Memory => wasm_encoder::ExportKind::Memory,
            ExportKind::Global => wasm_encoder::ExportKind::Global,
            ExportKind::Tag => wasm_encoder::ExportKind::Tag,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Export {
    pub name: String,
    pub kind: ExportKind,
    pub index: u32,
}
