use std::fmt::{Display, Formatter};

use wasmparser::Operator;

pub const PREFIX_GC: u8 = 0xFB;
pub const PREFIX_MISC: u8 = 0xFC;
pub const PREFIX_SIMD: u8 = 0xFD;
pub const PREFIX_ATOMIC: u8 = 0xFE;

/// An opcode as it appears in the byte stream: a single byte, or a prefix
/// byte followed by a LEB128 sub-opcode.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Opcode {
    pub byte: u8,
    pub sub: Option<u32>,
}

impl Opcode {
    pub fn single(byte: u8) -> Self {
        Opcode { byte, sub: None }
    }

    pub fn prefixed(byte: u8, sub: u32) -> Self {
        Opcode {
            byte,
            sub: Some(sub),
        }
    }
}

impl Display for Opcode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.sub {
            None => write!(f, "{:#04x}", self.byte),
            Some(sub) => write!(f, "{:#04x} {sub}", self.byte),
        }
    }
}

/// Every instruction that reads, writes, queries or grows linear memory.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MemoryOpcode {
    I32Load,
    I64Load,
    F32Load,
    F64Load,
    I32Load8S,
    I32Load8U,
    I32Load16S,
    I32Load16U,
    I64Load8S,
    I64Load8U,
    I64Load16S,
    I64Load16U,
    I64Load32S,
    I64Load32U,
    I32Store,
    I64Store,
    F32Store,
    F64Store,
    I32Store8,
    I32Store16,
    I64Store8,
    I64Store16,
    I64Store32,
    MemorySize,
    MemoryGrow,
    MemoryInit,
    MemoryCopy,
    MemoryFill,
    MemoryDiscard,
    /// `0xFD` loads, stores and lane accesses.
    Simd(u32),
    /// `0xFE` atomic accesses, `atomic.fence` excluded.
    Atomic(u32),
}

impl MemoryOpcode {
    pub fn from_byte(byte: u8) -> Option<Self> {
        use MemoryOpcode::*;
        let opcode = match byte {
            0x28 => I32Load,
            0x29 => I64Load,
            0x2A => F32Load,
            0x2B => F64Load,
            0x2C => I32Load8S,
            0x2D => I32Load8U,
            0x2E => I32Load16S,
            0x2F => I32Load16U,
            0x30 => I64Load8S,
            0x31 => I64Load8U,
            0x32 => I64Load16S,
            0x33 => I64Load16U,
            0x34 => I64Load32S,
            0x35 => I64Load32U,
            0x36 => I32Store,
            0x37 => I64Store,
            0x38 => F32Store,
            0x39 => F64Store,
            0x3A => I32Store8,
            0x3B => I32Store16,
            0x3C => I64Store8,
            0x3D => I64Store16,
            0x3E => I64Store32,
            0x3F => MemorySize,
            0x40 => MemoryGrow,
            _ => return None,
        };
        Some(opcode)
    }

    pub fn from_misc(sub: u32) -> Option<Self> {
        match sub {
            8 => Some(MemoryOpcode::MemoryInit),
            10 => Some(MemoryOpcode::MemoryCopy),
            11 => Some(MemoryOpcode::MemoryFill),
            18 => Some(MemoryOpcode::MemoryDiscard),
            _ => None,
        }
    }

    pub fn from_simd(sub: u32) -> Option<Self> {
        match sub {
            0..=11 | 84..=93 => Some(MemoryOpcode::Simd(sub)),
            _ => None,
        }
    }

    pub fn from_atomic(sub: u32) -> Option<Self> {
        match sub {
            0x00..=0x02 | 0x10..=0x4E => Some(MemoryOpcode::Atomic(sub)),
            _ => None,
        }
    }

    /// Classifies a decoded instruction. Agrees with the `from_*` tables
    /// for every opcode they accept.
    pub fn from_operator(operator: &Operator) -> Option<Self> {
        use MemoryOpcode::*;
        use Operator as Op;
        let opcode = match operator {
            Op::I32Load { .. } => I32Load,
            Op::I64Load { .. } => I64Load,
            Op::F32Load { .. } => F32Load,
            Op::F64Load { .. } => F64Load,
            Op::I32Load8S { .. } => I32Load8S,
            Op::I32Load8U { .. } => I32Load8U,
            Op::I32Load16S { .. } => I32Load16S,
            Op::I32Load16U { .. } => I32Load16U,
            Op::I64Load8S { .. } => I64Load8S,
            Op::I64Load8U { .. } => I64Load8U,
            Op::I64Load16S { .. } => I64Load16S,
            Op::I64Load16U { .. } => I64Load16U,
            Op::I64Load32S { .. } => I64Load32S,
            Op::I64Load32U { .. } => I64Load32U,
            Op::I32Store { .. } => I32Store,
            Op::I64Store { .. } => I64Store,
            Op::F32Store { .. } => F32Store,
            Op::F64Store { .. } => F64Store,
            Op::I32Store8 { .. } => I32Store8,
            Op::I32Store16 { .. } => I32Store16,
            Op::I64Store8 { .. } => I64Store8,
            Op::I64Store16 { .. } => I64Store16,
            Op::I64Store32 { .. } => I64Store32,
            Op::MemorySize { .. } => MemorySize,
            Op::MemoryGrow { .. } => MemoryGrow,
            Op::MemoryInit { .. } => MemoryInit,
            Op::MemoryCopy { .. } => MemoryCopy,
            Op::MemoryFill { .. } => MemoryFill,
            Op::MemoryDiscard { .. } => MemoryDiscard,
            Op::V128Load { .. } => Simd(0x00),
            Op::V128Load8x8S { .. } => Simd(0x01),
            Op::V128Load8x8U { .. } => Simd(0x02),
            Op::V128Load16x4S { .. } => Simd(0x03),
            Op::V128Load16x4U { .. } => Simd(0x04),
            Op::V128Load32x2S { .. } => Simd(0x05),
            Op::V128Load32x2U { .. } => Simd(0x06),
            Op::V128Load8Splat { .. } => Simd(0x07),
            Op::V128Load16Splat { .. } => Simd(0x08),
            Op::V128Load32Splat { .. } => Simd(0x09),
            Op::V128Load64Splat { .. } => Simd(0x0A),
            Op::V128Store { .. } => Simd(0x0B),
            Op::V128Load8Lane { .. } => Simd(0x54),
            Op::V128Load16Lane { .. } => Simd(0x55),
            Op::V128Load32Lane { .. } => Simd(0x56),
            Op::V128Load64Lane { .. } => Simd(0x57),
            Op::V128Store8Lane { .. } => Simd(0x58),
            Op::V128Store16Lane { .. } => Simd(0x59),
            Op::V128Store32Lane { .. } => Simd(0x5A),
            Op::V128Store64Lane { .. } => Simd(0x5B),
            Op::V128Load32Zero { .. } => Simd(0x5C),
            Op::V128Load64Zero { .. } => Simd(0x5D),
            Op::MemoryAtomicNotify { .. } => Atomic(0x00),
            Op::MemoryAtomicWait32 { .. } => Atomic(0x01),
            Op::MemoryAtomicWait64 { .. } => Atomic(0x02),
            Op::I32AtomicLoad { .. } => Atomic(0x10),
            Op::I64AtomicLoad { .. } => Atomic(0x11),
            Op::I32AtomicLoad8U { .. } => Atomic(0x12),
            Op::I32AtomicLoad16U { .. } => Atomic(0x13),
            Op::I64AtomicLoad8U { .. } => Atomic(0x14),
            Op::I64AtomicLoad16U { .. } => Atomic(0x15),
            Op::I64AtomicLoad32U { .. } => Atomic(0x16),
            Op::I32AtomicStore { .. } => Atomic(0x17),
            Op::I64AtomicStore { .. } => Atomic(0x18),
            Op::I32AtomicStore8 { .. } => Atomic(0x19),
            Op::I32AtomicStore16 { .. } => Atomic(0x1A),
            Op::I64AtomicStore8 { .. } => Atomic(0x1B),
            Op::I64AtomicStore16 { .. } => Atomic(0x1C),
            Op::I64AtomicStore32 { .. } => Atomic(0x1D),
            Op::I32AtomicRmwAdd { .. } => Atomic(0x1E),
            Op::I64AtomicRmwAdd { .. } => Atomic(0x1F),
            Op::I32AtomicRmw8AddU { .. } => Atomic(0x20),
            Op::I32AtomicRmw16AddU { .. } => Atomic(0x21),
            Op::I64AtomicRmw8AddU { .. } => Atomic(0x22),
            Op::I64AtomicRmw16AddU { .. } => Atomic(0x23),
            Op::I64AtomicRmw32AddU { .. } => Atomic(0x24),
            Op::I32AtomicRmwSub { .. } => Atomic(0x25),
            Op::I64AtomicRmwSub { .. } => Atomic(0x26),
            Op::I32AtomicRmw8SubU { .. } => Atomic(0x27),
            Op::I32AtomicRmw16SubU { .. } => Atomic(0x28),
            Op::I64AtomicRmw8SubU { .. } => Atomic(0x29),
            Op::I64AtomicRmw16SubU { .. } => Atomic(0x2A),
            Op::I64AtomicRmw32SubU { .. } => Atomic(0x2B),
            Op::I32AtomicRmwAnd { .. } => Atomic(0x2C),
            Op::I64AtomicRmwAnd { .. } => Atomic(0x2D),
            Op::I32AtomicRmw8AndU { .. } => Atomic(0x2E),
            Op::I32AtomicRmw16AndU { .. } => Atomic(0x2F),
            Op::I64AtomicRmw8AndU { .. } => Atomic(0x30),
            Op::I64AtomicRmw16AndU { .. } => Atomic(0x31),
            Op::I64AtomicRmw32AndU { .. } => Atomic(0x32),
            Op::I32AtomicRmwOr { .. } => Atomic(0x33),
            Op::I64AtomicRmwOr { .. } => Atomic(0x34),
            Op::I32AtomicRmw8OrU { .. } => Atomic(0x35),
            Op::I32AtomicRmw16OrU { .. } => Atomic(0x36),
            Op::I64AtomicRmw8OrU { .. } => Atomic(0x37),
            Op::I64AtomicRmw16OrU { .. } => Atomic(0x38),
            Op::I64AtomicRmw32OrU { .. } => Atomic(0x39),
            Op::I32AtomicRmwXor { .. } => Atomic(0x3A),
            Op::I64AtomicRmwXor { .. } => Atomic(0x3B),
            Op::I32AtomicRmw8XorU { .. } => Atomic(0x3C),
            Op::I32AtomicRmw16XorU { .. } => Atomic(0x3D),
            Op::I64AtomicRmw8XorU { .. } => Atomic(0x3E),
            Op::I64AtomicRmw16XorU { .. } => Atomic(0x3F),
            Op::I64AtomicRmw32XorU { .. } => Atomic(0x40),
            Op::I32AtomicRmwXchg { .. } => Atomic(0x41),
            Op::I64AtomicRmwXchg { .. } => Atomic(0x42),
            Op::I32AtomicRmw8XchgU { .. } => Atomic(0x43),
            Op::I32AtomicRmw16XchgU { .. } => Atomic(0x44),
            Op::I64AtomicRmw8XchgU { .. } => Atomic(0x45),
            Op::I64AtomicRmw16XchgU { .. } => Atomic(0x46),
            Op::I64AtomicRmw32XchgU { .. } => Atomic(0x47),
            Op::I32AtomicRmwCmpxchg { .. } => Atomic(0x48),
            Op::I64AtomicRmwCmpxchg { .. } => Atomic(0x49),
            Op::I32AtomicRmw8CmpxchgU { .. } => Atomic(0x4A),
            Op::I32AtomicRmw16CmpxchgU { .. } => Atomic(0x4B),
            Op::I64AtomicRmw8CmpxchgU { .. } => Atomic(0x4C),
            Op::I64AtomicRmw16CmpxchgU { .. } => Atomic(0x4D),
            Op::I64AtomicRmw32CmpxchgU { .. } => Atomic(0x4E),
            _ => return None,
        };
        Some(opcode)
    }

    pub fn opcode(self) -> Opcode {
        use MemoryOpcode::*;
        match self {
            I32Load => Opcode::single(0x28),
            I64Load => Opcode::single(0x29),
            F32Load => Opcode::single(0x2A),
            F64Load => Opcode::single(0x2B),
            I32Load8S => Opcode::single(0x2C),
            I32Load8U => Opcode::single(0x2D),
            I32Load16S => Opcode::single(0x2E),
            I32Load16U => Opcode::single(0x2F),
            I64Load8S => Opcode::single(0x30),
            I64Load8U => Opcode::single(0x31),
            I64Load16S => Opcode::single(0x32),
            I64Load16U => Opcode::single(0x33),
            I64Load32S => Opcode::single(0x34),
            I64Load32U => Opcode::single(0x35),
            I32Store => Opcode::single(0x36),
            I64Store => Opcode::single(0x37),
            F32Store => Opcode::single(0x38),
            F64Store => Opcode::single(0x39),
            I32Store8 => Opcode::single(0x3A),
            I32Store16 => Opcode::single(0x3B),
            I64Store8 => Opcode::single(0x3C),
            I64Store16 => Opcode::single(0x3D),
            I64Store32 => Opcode::single(0x3E),
            MemorySize => Opcode::single(0x3F),
            MemoryGrow => Opcode::single(0x40),
            MemoryInit => Opcode::prefixed(PREFIX_MISC, 8),
            MemoryCopy => Opcode::prefixed(PREFIX_MISC, 10),
            MemoryFill => Opcode::prefixed(PREFIX_MISC, 11),
            MemoryDiscard => Opcode::prefixed(PREFIX_MISC, 18),
            Simd(sub) => Opcode::prefixed(PREFIX_SIMD, sub),
            Atomic(sub) => Opcode::prefixed(PREFIX_ATOMIC, sub),
        }
    }

    /// Text format mnemonic, or `None` for prefixed opcodes without a fixed
    /// name here.
    pub fn mnemonic(self) -> Option<&'static str> {
        use MemoryOpcode::*;
        let name = match self {
            I32Load => "i32.load",
            I64Load => "i64.load",
            F32Load => "f32.load",
            F64Load => "f64.load",
            I32Load8S => "i32.load8_s",
            I32Load8U => "i32.load8_u",
            I32Load16S => "i32.load16_s",
            I32Load16U => "i32.load16_u",
            I64Load8S => "i64.load8_s",
            I64Load8U => "i64.load8_u",
            I64Load16S => "i64.load16_s",
            I64Load16U => "i64.load16_u",
            I64Load32S => "i64.load32_s",
            I64Load32U => "i64.load32_u",
            I32Store => "i32.store",
            I64Store => "i64.store",
            F32Store => "f32.store",
            F64Store => "f64.store",
            I32Store8 => "i32.store8",
            I32Store16 => "i32.store16",
            I64Store8 => "i64.store8",
            I64Store16 => "i64.store16",
            I64Store32 => "i64.store32",
            MemorySize => "memory.size",
            MemoryGrow => "memory.grow",
            MemoryInit => "memory.init",
            MemoryCopy => "memory.copy",
            MemoryFill => "memory.fill",
            MemoryDiscard => "memory.discard",
            Simd(0) => "v128.load",
            Simd(11) => "v128.store",
            Simd(_) | Atomic(_) => return None,
        };
        Some(name)
    }
}

impl Display for MemoryOpcode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.mnemonic() {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "{}", self.opcode()),
        }
    }
}
