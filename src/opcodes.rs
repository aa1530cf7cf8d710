//! # Opcode Metadata Table
//!
//! This module contains the complete 256-entry opcode metadata table that serves as the
//! single source of truth for 8085 instruction information. The CPU uses it to decide
//! whether a fetched byte is a known instruction; the assembler uses it to map a
//! mnemonic and its register operands back to an opcode and to size instructions
//! during its first pass.
//!
//! The table covers:
//! - **244 documented instructions** - every 8085 opcode except IN/OUT
//! - **12 undefined entries** - the unused 8085 encodings plus IN (0xDB) and OUT
//!   (0xD3), which need the I/O port space this emulator does not model
//!
//! Mnemonics include the register fields baked into the opcode (`"MOV A,B"`,
//! `"MVI M"`, `"PUSH PSW"`, `"RST 3"`), so the text is unique per opcode. Data
//! operands are described by [`Operand`].

/// The data operand that follows an opcode in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// No trailing operand (1-byte instruction).
    None,
    /// One immediate byte (2-byte instruction).
    Byte,
    /// One little-endian address or immediate word (3-byte instruction).
    Word,
}

impl Operand {
    /// Number of bytes the operand occupies after the opcode.
    pub const fn byte_count(self) -> u8 {
        match self {
            Operand::None => 0,
            Operand::Byte => 1,
            Operand::Word => 2,
        }
    }
}

/// Metadata for a single 8085 opcode.
///
/// # Examples
///
/// ```
/// use lib8085::{Operand, OPCODE_TABLE};
///
/// let mvi_a = &OPCODE_TABLE[0x3E];
/// assert_eq!(mvi_a.mnemonic, "MVI A");
/// assert_eq!(mvi_a.operand, Operand::Byte);
/// assert_eq!(mvi_a.size_bytes, 2);
/// assert!(mvi_a.implemented);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    /// Mnemonic including register fields (e.g. "MOV A,M", "LXI SP", "???").
    pub mnemonic: &'static str,

    /// Data operand that follows the opcode.
    pub operand: Operand,

    /// Total instruction size in bytes (opcode + operand, 1-3).
    pub size_bytes: u8,

    /// Whether the CPU executes this opcode. Unimplemented entries fault.
    pub implemented: bool,
}

const fn op(mnemonic: &'static str, operand: Operand) -> OpcodeMetadata {
    OpcodeMetadata {
        mnemonic,
        operand,
        size_bytes: 1 + operand.byte_count(),
        implemented: true,
    }
}

const UNDEFINED: OpcodeMetadata = OpcodeMetadata {
    mnemonic: "???",
    operand: Operand::None,
    size_bytes: 1,
    implemented: false,
};

/// Complete 256-entry opcode metadata table indexed by opcode byte value.
///
/// ```
/// use lib8085::OPCODE_TABLE;
///
/// assert_eq!(OPCODE_TABLE[0x76].mnemonic, "HLT");
/// assert!(!OPCODE_TABLE[0xDB].implemented); // IN port
/// ```
pub const OPCODE_TABLE: [OpcodeMetadata; 256] = [
    op("NOP", Operand::None), // 0x00
    op("LXI B", Operand::Word), // 0x01
    op("STAX B", Operand::None), // 0x02
    op("INX B", Operand::None), // 0x03
    op("INR B", Operand::None), // 0x04
    op("DCR B", Operand::None), // 0x05
    op("MVI B", Operand::Byte), // 0x06
    op("RLC", Operand::None), // 0x07
    UNDEFINED, // 0x08
    op("DAD B", Operand::None), // 0x09
    op("LDAX B", Operand::None), // 0x0A
    op("DCX B", Operand::None), // 0x0B
    op("INR C", Operand::None), // 0x0C
    op("DCR C", Operand::None), // 0x0D
    op("MVI C", Operand::Byte), // 0x0E
    op("RRC", Operand::None), // 0x0F
    UNDEFINED, // 0x10
    op("LXI D", Operand::Word), // 0x11
    op("STAX D", Operand::None), // 0x12
    op("INX D", Operand::None), // 0x13
    op("INR D", Operand::None), // 0x14
    op("DCR D", Operand::None), // 0x15
    op("MVI D", Operand::Byte), // 0x16
    op("RAL", Operand::None), // 0x17
    UNDEFINED, // 0x18
    op("DAD D", Operand::None), // 0x19
    op("LDAX D", Operand::None), // 0x1A
    op("DCX D", Operand::None), // 0x1B
    op("INR E", Operand::None), // 0x1C
    op("DCR E", Operand::None), // 0x1D
    op("MVI E", Operand::Byte), // 0x1E
    op("RAR", Operand::None), // 0x1F
    op("RIM", Operand::None), // 0x20
    op("LXI H", Operand::Word), // 0x21
    op("SHLD", Operand::Word), // 0x22
    op("INX H", Operand::None), // 0x23
    op("INR H", Operand::None), // 0x24
    op("DCR H", Operand::None), // 0x25
    op("MVI H", Operand::Byte), // 0x26
    op("DAA", Operand::None), // 0x27
    UNDEFINED, // 0x28
    op("DAD H", Operand::None), // 0x29
    op("LHLD", Operand::Word), // 0x2A
    op("DCX H", Operand::None), // 0x2B
    op("INR L", Operand::None), // 0x2C
    op("DCR L", Operand::None), // 0x2D
    op("MVI L", Operand::Byte), // 0x2E
    op("CMA", Operand::None), // 0x2F
    op("SIM", Operand::None), // 0x30
    op("LXI SP", Operand::Word), // 0x31
    op("STA", Operand::Word), // 0x32
    op("INX SP", Operand::None), // 0x33
    op("INR M", Operand::None), // 0x34
    op("DCR M", Operand::None), // 0x35
    op("MVI M", Operand::Byte), // 0x36
    op("STC", Operand::None), // 0x37
    UNDEFINED, // 0x38
    op("DAD SP", Operand::None), // 0x39
    op("LDA", Operand::Word), // 0x3A
    op("DCX SP", Operand::None), // 0x3B
    op("INR A", Operand::None), // 0x3C
    op("DCR A", Operand::None), // 0x3D
    op("MVI A", Operand::Byte), // 0x3E
    op("CMC", Operand::None), // 0x3F
    op("MOV B,B", Operand::None), // 0x40
    op("MOV B,C", Operand::None), // 0x41
    op("MOV B,D", Operand::None), // 0x42
    op("MOV B,E", Operand::None), // 0x43
    op("MOV B,H", Operand::None), // 0x44
    op("MOV B,L", Operand::None), // 0x45
    op("MOV B,M", Operand::None), // 0x46
    op("MOV B,A", Operand::None), // 0x47
    op("MOV C,B", Operand::None), // 0x48
    op("MOV C,C", Operand::None), // 0x49
    op("MOV C,D", Operand::None), // 0x4A
    op("MOV C,E", Operand::None), // 0x4B
    op("MOV C,H", Operand::None), // 0x4C
    op("MOV C,L", Operand::None), // 0x4D
    op("MOV C,M", Operand::None), // 0x4E
    op("MOV C,A", Operand::None), // 0x4F
    op("MOV D,B", Operand::None), // 0x50
    op("MOV D,C", Operand::None), // 0x51
    op("MOV D,D", Operand::None), // 0x52
    op("MOV D,E", Operand::None), // 0x53
    op("MOV D,H", Operand::None), // 0x54
    op("MOV D,L", Operand::None), // 0x55
    op("MOV D,M", Operand::None), // 0x56
    op("MOV D,A", Operand::None), // 0x57
    op("MOV E,B", Operand::None), // 0x58
    op("MOV E,C", Operand::None), // 0x59
    op("MOV E,D", Operand::None), // 0x5A
    op("MOV E,E", Operand::None), // 0x5B
    op("MOV E,H", Operand::None), // 0x5C
    op("MOV E,L", Operand::None), // 0x5D
    op("MOV E,M", Operand::None), // 0x5E
    op("MOV E,A", Operand::None), // 0x5F
    op("MOV H,B", Operand::None), // 0x60
    op("MOV H,C", Operand::None), // 0x61
    op("MOV H,D", Operand::None), // 0x62
    op("MOV H,E", Operand::None), // 0x63
    op("MOV H,H", Operand::None), // 0x64
    op("MOV H,L", Operand::None), // 0x65
    op("MOV H,M", Operand::None), // 0x66
    op("MOV H,A", Operand::None), // 0x67
    op("MOV L,B", Operand::None), // 0x68
    op("MOV L,C", Operand::None), // 0x69
    op("MOV L,D", Operand::None), // 0x6A
    op("MOV L,E", Operand::None), // 0x6B
    op("MOV L,H", Operand::None), // 0x6C
    op("MOV L,L", Operand::None), // 0x6D
    op("MOV L,M", Operand::None), // 0x6E
    op("MOV L,A", Operand::None), // 0x6F
    op("MOV M,B", Operand::None), // 0x70
    op("MOV M,C", Operand::None), // 0x71
    op("MOV M,D", Operand::None), // 0x72
    op("MOV M,E", Operand::None), // 0x73
    op("MOV M,H", Operand::None), // 0x74
    op("MOV M,L", Operand::None), // 0x75
    op("HLT", Operand::None), // 0x76
    op("MOV M,A", Operand::None), // 0x77
    op("MOV A,B", Operand::None), // 0x78
    op("MOV A,C", Operand::None), // 0x79
    op("MOV A,D", Operand::None), // 0x7A
    op("MOV A,E", Operand::None), // 0x7B
    op("MOV A,H", Operand::None), // 0x7C
    op("MOV A,L", Operand::None), // 0x7D
    op("MOV A,M", Operand::None), // 0x7E
    op("MOV A,A", Operand::None), // 0x7F
    op("ADD B", Operand::None), // 0x80
    op("ADD C", Operand::None), // 0x81
    op("ADD D", Operand::None), // 0x82
    op("ADD E", Operand::None), // 0x83
    op("ADD H", Operand::None), // 0x84
    op("ADD L", Operand::None), // 0x85
    op("ADD M", Operand::None), // 0x86
    op("ADD A", Operand::None), // 0x87
    op("ADC B", Operand::None), // 0x88
    op("ADC C", Operand::None), // 0x89
    op("ADC D", Operand::None), // 0x8A
    op("ADC E", Operand::None), // 0x8B
    op("ADC H", Operand::None), // 0x8C
    op("ADC L", Operand::None), // 0x8D
    op("ADC M", Operand::None), // 0x8E
    op("ADC A", Operand::None), // 0x8F
    op("SUB B", Operand::None), // 0x90
    op("SUB C", Operand::None), // 0x91
    op("SUB D", Operand::None), // 0x92
    op("SUB E", Operand::None), // 0x93
    op("SUB H", Operand::None), // 0x94
    op("SUB L", Operand::None), // 0x95
    op("SUB M", Operand::None), // 0x96
    op("SUB A", Operand::None), // 0x97
    op("SBB B", Operand::None), // 0x98
    op("SBB C", Operand::None), // 0x99
    op("SBB D", Operand::None), // 0x9A
    op("SBB E", Operand::None), // 0x9B
    op("SBB H", Operand::None), // 0x9C
    op("SBB L", Operand::None), // 0x9D
    op("SBB M", Operand::None), // 0x9E
    op("SBB A", Operand::None), // 0x9F
    op("ANA B", Operand::None), // 0xA0
    op("ANA C", Operand::None), // 0xA1
    op("ANA D", Operand::None), // 0xA2
    op("ANA E", Operand::None), // 0xA3
    op("ANA H", Operand::None), // 0xA4
    op("ANA L", Operand::None), // 0xA5
    op("ANA M", Operand::None), // 0xA6
    op("ANA A", Operand::None), // 0xA7
    op("XRA B", Operand::None), // 0xA8
    op("XRA C", Operand::None), // 0xA9
    op("XRA D", Operand::None), // 0xAA
    op("XRA E", Operand::None), // 0xAB
    op("XRA H", Operand::None), // 0xAC
    op("XRA L", Operand::None), // 0xAD
    op("XRA M", Operand::None), // 0xAE
    op("XRA A", Operand::None), // 0xAF
    op("ORA B", Operand::None), // 0xB0
    op("ORA C", Operand::None), // 0xB1
    op("ORA D", Operand::None), // 0xB2
    op("ORA E", Operand::None), // 0xB3
    op("ORA H", Operand::None), // 0xB4
    op("ORA L", Operand::None), // 0xB5
    op("ORA M", Operand::None), // 0xB6
    op("ORA A", Operand::None), // 0xB7
    op("CMP B", Operand::None), // 0xB8
    op("CMP C", Operand::None), // 0xB9
    op("CMP D", Operand::None), // 0xBA
    op("CMP E", Operand::None), // 0xBB
    op("CMP H", Operand::None), // 0xBC
    op("CMP L", Operand::None), // 0xBD
    op("CMP M", Operand::None), // 0xBE
    op("CMP A", Operand::None), // 0xBF
    op("RNZ", Operand::None), // 0xC0
    op("POP B", Operand::None), // 0xC1
    op("JNZ", Operand::Word), // 0xC2
    op("JMP", Operand::Word), // 0xC3
    op("CNZ", Operand::Word), // 0xC4
    op("PUSH B", Operand::None), // 0xC5
    op("ADI", Operand::Byte), // 0xC6
    op("RST 0", Operand::None), // 0xC7
    op("RZ", Operand::None), // 0xC8
    op("RET", Operand::None), // 0xC9
    op("JZ", Operand::Word), // 0xCA
    UNDEFINED, // 0xCB
    op("CZ", Operand::Word), // 0xCC
    op("CALL", Operand::Word), // 0xCD
    op("ACI", Operand::Byte), // 0xCE
    op("RST 1", Operand::None), // 0xCF
    op("RNC", Operand::None), // 0xD0
    op("POP D", Operand::None), // 0xD1
    op("JNC", Operand::Word), // 0xD2
    UNDEFINED, // 0xD3
    op("CNC", Operand::Word), // 0xD4
    op("PUSH D", Operand::None), // 0xD5
    op("SUI", Operand::Byte), // 0xD6
    op("RST 2", Operand::None), // 0xD7
    op("RC", Operand::None), // 0xD8
    UNDEFINED, // 0xD9
    op("JC", Operand::Word), // 0xDA
    UNDEFINED, // 0xDB
    op("CC", Operand::Word), // 0xDC
    UNDEFINED, // 0xDD
    op("SBI", Operand::Byte), // 0xDE
    op("RST 3", Operand::None), // 0xDF
    op("RPO", Operand::None), // 0xE0
    op("POP H", Operand::None), // 0xE1
    op("JPO", Operand::Word), // 0xE2
    op("XTHL", Operand::None), // 0xE3
    op("CPO", Operand::Word), // 0xE4
    op("PUSH H", Operand::None), // 0xE5
    op("ANI", Operand::Byte), // 0xE6
    op("RST 4", Operand::None), // 0xE7
    op("RPE", Operand::None), // 0xE8
    op("PCHL", Operand::None), // 0xE9
    op("JPE", Operand::Word), // 0xEA
    op("XCHG", Operand::None), // 0xEB
    op("CPE", Operand::Word), // 0xEC
    UNDEFINED, // 0xED
    op("XRI", Operand::Byte), // 0xEE
    op("RST 5", Operand::None), // 0xEF
    op("RP", Operand::None), // 0xF0
    op("POP PSW", Operand::None), // 0xF1
    op("JP", Operand::Word), // 0xF2
    op("DI", Operand::None), // 0xF3
    op("CP", Operand::Word), // 0xF4
    op("PUSH PSW", Operand::None), // 0xF5
    op("ORI", Operand::Byte), // 0xF6
    op("RST 6", Operand::None), // 0xF7
    op("RM", Operand::None), // 0xF8
    op("SPHL", Operand::None), // 0xF9
    op("JM", Operand::Word), // 0xFA
    op("EI", Operand::None), // 0xFB
    op("CM", Operand::Word), // 0xFC
    UNDEFINED, // 0xFD
    op("CPI", Operand::Byte), // 0xFE
    op("RST 7", Operand::None), // 0xFF
];

/// Finds the opcode whose mnemonic text is exactly `key`.
///
/// `key` must already be normalized: uppercase, a single space after the
/// mnemonic, register fields separated by a bare comma.
pub fn lookup(key: &str) -> Option<u8> {
    OPCODE_TABLE
        .iter()
        .position(|m| m.implemented && m.mnemonic == key)
        .map(|i| i as u8)
}

/// Returns true if any implemented opcode uses this bare mnemonic.
pub fn is_mnemonic(mnemonic: &str) -> bool {
    OPCODE_TABLE.iter().any(|m| {
        m.implemented && m.mnemonic.split(' ').next() == Some(mnemonic)
    })
}
