use std::borrow::Cow;

use wasm_encoder::{
    CodeSection, ConstExpr, CustomSection, DataSection, Encode, ExportKind, ExportSection,
    Function, FunctionSection, Instruction, MemorySection, MemoryType, TypeSection, ValType,
};

/// Builds small modules whose functions all have type `() -> i32`.
#[derive(Default)]
pub struct TestModule {
    memory: bool,
    functions: Vec<Function>,
    exports: Vec<(String, ExportKind, u32)>,
    data: Vec<Vec<u8>>,
    customs: Vec<(String, Vec<u8>)>,
}

impl TestModule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn memory(mut self) -> Self {
        self.memory = true;
        self
    }

    pub fn function(mut self, function: Function) -> Self {
        self.functions.push(function);
        self
    }

    pub fn export_func(mut self, name: &str, index: u32) -> Self {
        self.exports.push((name.to_string(), ExportKind::Func, index));
        self
    }

    pub fn export_memory(mut self, name: &str) -> Self {
        self.exports.push((name.to_string(), ExportKind::Memory, 0));
        self
    }

    pub fn data(mut self, bytes: &[u8]) -> Self {
        self.data.push(bytes.to_vec());
        self
    }

    pub fn custom(mut self, name: &str, data: &[u8]) -> Self {
        self.customs.push((name.to_string(), data.to_vec()));
        self
    }

    pub fn finish(&self) -> Vec<u8> {
        let default = [answer()];
        let bodies: &[Function] = if self.functions.is_empty() {
            &default
        } else {
            &self.functions
        };

        let mut module = wasm_encoder::Module::new();

        let mut types = TypeSection::new();
        types.function(vec![], vec![ValType::I32]);
        module.section(&types);

        let mut functions = FunctionSection::new();
        for _ in bodies {
            functions.function(0);
        }
        module.section(&functions);

        if self.memory {
            let mut memories = MemorySection::new();
            memories.memory(MemoryType {
                minimum: 1,
                maximum: None,
                memory64: false,
                shared: false,
                page_size_log2: None,
            });
            module.section(&memories);
        }

        if !self.exports.is_empty() {
            let mut exports = ExportSection::new();
            for (name, kind, index) in &self.exports {
                exports.export(name, *kind, *index);
            }
            module.section(&exports);
        }

        let mut codes = CodeSection::new();
        for body in bodies {
            codes.function(body);
        }
        module.section(&codes);

        if !self.data.is_empty() {
            let mut data = DataSection::new();
            for segment in &self.data {
                data.active(0, &ConstExpr::i32_const(0), segment.iter().copied());
            }
            module.section(&data);
        }

        for (name, data) in &self.customs {
            module.section(&CustomSection {
                name: Cow::Borrowed(name.as_str()),
                data: Cow::Borrowed(data.as_slice()),
            });
        }

        module.finish()
    }
}

/// `() -> i32` returning 42.
pub fn answer() -> Function {
    function(&[Instruction::I32Const(42)])
}

pub fn function(instructions: &[Instruction]) -> Function {
    let mut function = Function::new(vec![]);
    for instruction in instructions {
        function.instruction(instruction);
    }
    function.instruction(&Instruction::End);
    function
}

/// Code section payload for raw bodies. Each body starts with its locals
/// declaration.
pub fn code_payload(bodies: &[&[u8]]) -> Vec<u8> {
    let mut payload = Vec::new();
    (bodies.len() as u32).encode(&mut payload);
    for body in bodies {
        body.encode(&mut payload);
    }
    payload
}
