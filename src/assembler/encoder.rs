//! Instruction encoder for the 8085 assembler
//!
//! Maps a mnemonic and its operands onto an opcode via `OPCODE_TABLE`. Register
//! operands are part of the table mnemonic (`"MOV A,B"`, `"LXI H"`), so the
//! encoder tries the longest register prefix of the operand list first and
//! treats whatever is left as the instruction's data operand.

use crate::assembler::parser::{parse_number, Spanned};
use crate::assembler::symbol_table::SymbolTable;
use crate::assembler::{validate_label, ErrorType};
use crate::opcodes::{self, Operand, OPCODE_TABLE};
use crate::registers::{Register, RegisterPair};

/// Encoder failure: classification plus message. The caller attaches the location.
pub type EncodeError = (ErrorType, String);

/// An instruction whose opcode is known; its data operand is still text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedInstruction {
    pub opcode: u8,

    /// Kind of data operand that follows the opcode.
    pub operand: Operand,

    /// Index into the line's operands of the data operand, if any.
    pub data_index: Option<usize>,
}

impl ResolvedInstruction {
    /// Encoded size in bytes.
    pub fn size(&self) -> u8 {
        OPCODE_TABLE[self.opcode as usize].size_bytes
    }
}

/// Determines the opcode for `mnemonic` with `operands`.
///
/// This needs no symbol information, so pass 1 uses it to size instructions.
///
/// ```
/// use lib8085::assembler::encoder::resolve;
///
/// let ops = vec![("a".to_string(), (4, 5)), ("b".to_string(), (6, 7))];
/// assert_eq!(resolve("MOV", &ops).unwrap().opcode, 0x78);
/// ```
pub fn resolve(mnemonic: &str, operands: &[Spanned]) -> Result<ResolvedInstruction, EncodeError> {
    let mnemonic = mnemonic.to_ascii_uppercase();
    if !opcodes::is_mnemonic(&mnemonic) {
        return Err((
            ErrorType::InvalidMnemonic,
            format!("unknown mnemonic '{}'", mnemonic),
        ));
    }

    let names: Vec<&str> = operands
        .iter()
        .map_while(|(text, _)| key_operand(text))
        .collect();

    for registers in (0..=names.len()).rev() {
        let key = if registers == 0 {
            mnemonic.clone()
        } else {
            format!("{} {}", mnemonic, names[..registers].join(","))
        };

        let Some(opcode) = opcodes::lookup(&key) else {
            continue;
        };
        let operand = OPCODE_TABLE[opcode as usize].operand;
        let data_count = if operand == Operand::None { 0 } else { 1 };

        if operands.len() - registers == data_count {
            return Ok(ResolvedInstruction {
                opcode,
                operand,
                data_index: (data_count == 1).then_some(registers),
            });
        }
    }

    let text: Vec<&str> = operands.iter().map(|(text, _)| text.as_str()).collect();
    Err((
        ErrorType::InvalidOperand,
        format!("invalid operands for {}: '{}'", mnemonic, text.join(",")),
    ))
}

/// Spelling of an operand that is part of a table key: a register, a register
/// pair, or an RST vector digit.
fn key_operand(text: &str) -> Option<&str> {
    Register::from_name(text)
        .map(Register::name)
        .or_else(|| RegisterPair::from_name(text).map(RegisterPair::name))
        .or_else(|| (text.len() == 1 && text.as_bytes()[0].is_ascii_digit()).then_some(text))
}

/// Emits the bytes for a resolved instruction, resolving labels in word operands.
pub fn encode(
    resolved: &ResolvedInstruction,
    operands: &[Spanned],
    symbols: &SymbolTable,
) -> Result<Vec<u8>, EncodeError> {
    let mut bytes = vec![resolved.opcode];

    let Some(index) = resolved.data_index else {
        return Ok(bytes);
    };
    let text = operands[index].0.as_str();

    match resolved.operand {
        Operand::Byte => {
            let value = parse_number(text).map_err(|msg| (ErrorType::SyntaxError, msg))?;
            let byte = u8::try_from(value).map_err(|_| {
                (
                    ErrorType::RangeError,
                    format!("immediate value {} does not fit in a byte", text),
                )
            })?;
            bytes.push(byte);
        }
        Operand::Word => {
            let word = resolve_word(text, symbols)?;
            bytes.extend_from_slice(&word.to_le_bytes());
        }
        Operand::None => {}
    }

    Ok(bytes)
}

/// A word operand is a label if it looks like one, otherwise a number.
fn resolve_word(text: &str, symbols: &SymbolTable) -> Result<u16, EncodeError> {
    if validate_label(text).is_ok() {
        return symbols
            .lookup_symbol(text)
            .map(|symbol| symbol.address)
            .ok_or_else(|| (ErrorType::UndefinedLabel, format!("undefined label '{}'", text)));
    }

    let value = parse_number(text).map_err(|msg| (ErrorType::SyntaxError, msg))?;
    u16::try_from(value).map_err(|_| {
        (
            ErrorType::RangeError,
            format!("value {} does not fit in 16 bits", text),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ops(list: &[&str]) -> Vec<Spanned> {
        list.iter().map(|s| (s.to_string(), (0, s.len()))).collect()
    }

    #[test]
    fn test_resolve_register_forms() {
        assert_eq!(resolve("MOV", &ops(&["M", "a"])).unwrap().opcode, 0x77);
        assert_eq!(resolve("push", &ops(&["psw"])).unwrap().opcode, 0xF5);
        assert_eq!(resolve("RST", &ops(&["7"])).unwrap().opcode, 0xFF);
        assert_eq!(resolve("HLT", &[]).unwrap().opcode, 0x76);
    }

    #[test]
    fn test_resolve_stops_at_first_non_register() {
        assert_eq!(resolve("lxi", &ops(&["sp", "0FFFFH"])).unwrap().opcode, 0x31);
        // register names only count at the front of the list
        let jmp = resolve("JMP", &ops(&["#10", "C"]));
        assert_eq!(jmp.unwrap_err().0, ErrorType::InvalidOperand);
        assert_eq!(resolve("MVI", &ops(&["A", "7"])).unwrap().opcode, 0x3E);
    }

    #[test]
    fn test_resolve_data_operand_index() {
        let mvi = resolve("MVI", &ops(&["B", "#10"])).unwrap();
        assert_eq!(mvi.opcode, 0x06);
        assert_eq!(mvi.data_index, Some(1));
        assert_eq!(mvi.size(), 2);

        let jmp = resolve("JMP", &ops(&["b"])).unwrap();
        assert_eq!(jmp.opcode, 0xC3);
        assert_eq!(jmp.data_index, Some(0));
    }

    #[test]
    fn test_resolve_errors() {
        assert_eq!(resolve("LDX", &[]).unwrap_err().0, ErrorType::InvalidMnemonic);
        assert_eq!(
            resolve("MOV", &ops(&["M", "M"])).unwrap_err().0,
            ErrorType::InvalidOperand
        );
        assert_eq!(resolve("MVI", &ops(&["A"])).unwrap_err().0, ErrorType::InvalidOperand);
        assert_eq!(resolve("NOP", &ops(&["A"])).unwrap_err().0, ErrorType::InvalidOperand);
    }

    #[test]
    fn test_encode_word_little_endian() {
        let operands = ops(&["H", "0x1234"]);
        let lxi = resolve("LXI", &operands).unwrap();
        let bytes = encode(&lxi, &operands, &SymbolTable::new()).unwrap();
        assert_eq!(bytes, vec![0x21, 0x34, 0x12]);
    }

    #[test]
    fn test_encode_label_and_range() {
        let mut symbols = SymbolTable::new();
        symbols.add_symbol("DATA".to_string(), 0x9000, 1).unwrap();

        let operands = ops(&["DATA"]);
        let lda = resolve("LDA", &operands).unwrap();
        assert_eq!(encode(&lda, &operands, &symbols).unwrap(), vec![0x3A, 0x00, 0x90]);

        let operands = ops(&["#1FF"]);
        let adi = resolve("ADI", &operands).unwrap();
        assert_eq!(encode(&adi, &operands, &symbols).unwrap_err().0, ErrorType::RangeError);

        let operands = ops(&["MISSING"]);
        let call = resolve("CALL", &operands).unwrap();
        assert_eq!(
            encode(&call, &operands, &symbols).unwrap_err().0,
            ErrorType::UndefinedLabel
        );
    }
}
