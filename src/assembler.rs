//! 8085 Assembler Module
//!
//! Converts assembly language source code into binary machine code.
//!
//! Source is line oriented: an optional `label:` prefix, a mnemonic, operands
//! separated by commas, and an optional `;` comment. Assembly runs in two passes.
//! Pass 1 parses every line, sizes each instruction from the opcode table and
//! binds labels to addresses. Pass 2 encodes instructions, resolving labels in
//! word operands. All errors from both passes are collected and returned
//! together.
//!
//! # Examples
//!
//! ```
//! use lib8085::assemble;
//!
//! let output = assemble("START: MVI A,#01\n       JMP START").unwrap();
//! assert_eq!(output.bytes, vec![0x3E, 0x01, 0xC3, 0x00, 0x80]);
//! assert_eq!(output.symbol_table[0].address, 0x8000);
//! ```

pub mod encoder;
pub mod parser;
pub mod source_map;
pub mod symbol_table;

use std::fmt;

use tracing::{debug, warn};

use crate::cpu::DEFAULT_ORIGIN;
use parser::AssemblyLine;
use source_map::{SourceLocation, SourceMap};
use symbol_table::SymbolTable;

/// Maximum label length in characters.
pub const MAX_LABEL_LEN: usize = 32;

/// Assembly settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblerOptions {
    /// Address the first byte will be loaded at; labels resolve relative to it.
    pub origin: u16,

    /// Drop lines that don't parse or whose mnemonic or operands are not
    /// recognized, recording a warning instead of failing. A repeated label
    /// then rebinds with a warning.
    pub skip_unrecognized: bool,
}

impl Default for AssemblerOptions {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN,
            skip_unrecognized: false,
        }
    }
}

/// Complete output from assembling source code
#[derive(Debug, Clone)]
pub struct AssemblerOutput {
    /// Assembled machine code bytes
    pub bytes: Vec<u8>,

    /// Address the bytes were assembled for
    pub origin: u16,

    /// Symbol table with all defined labels
    pub symbol_table: Vec<Symbol>,

    /// Source map for debugging
    pub source_map: SourceMap,

    /// Non-fatal warnings encountered during assembly
    pub warnings: Vec<AssemblerWarning>,
}

impl AssemblerOutput {
    /// Looks up a label's resolved address.
    pub fn lookup_symbol(&self, name: &str) -> Option<u16> {
        self.symbol_table
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.address)
    }
}

/// A symbol table entry mapping a label to an address
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    /// Label name (case-sensitive)
    pub name: String,

    /// Resolved memory address for this label
    pub address: u16,

    /// Source line where label was defined
    pub defined_at: usize,
}

/// A non-fatal warning from the assembler
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblerWarning {
    /// Line number where warning occurred
    pub line: usize,

    /// Warning message
    pub message: String,
}

/// An error encountered during assembly
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblerError {
    /// Error type classification
    pub error_type: ErrorType,

    /// Line number where error occurred (1-indexed)
    pub line: usize,

    /// Column number where error starts (0-indexed)
    pub column: usize,

    /// Character span (start, end) in the source line
    pub span: (usize, usize),

    /// Human-readable error message
    pub message: String,
}

impl AssemblerError {
    pub(crate) fn new(
        error_type: ErrorType,
        line: usize,
        span: (usize, usize),
        message: impl Into<String>,
    ) -> Self {
        Self {
            error_type,
            line,
            column: span.0,
            span,
            message: message.into(),
        }
    }
}

impl fmt::Display for AssemblerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "line {}, column {}: {:?}: {}",
            self.line, self.column, self.error_type, self.message
        )
    }
}

impl std::error::Error for AssemblerError {}

/// Classification of assembly errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorType {
    /// Syntax error (malformed number, empty operand)
    SyntaxError,

    /// Undefined label reference
    UndefinedLabel,

    /// Duplicate label definition
    DuplicateLabel,

    /// Invalid label name (too long, starts with digit, etc.)
    InvalidLabel,

    /// Invalid mnemonic (not a recognized instruction)
    InvalidMnemonic,

    /// Operands that don't form a valid instruction with the mnemonic
    InvalidOperand,

    /// Operand value out of range (byte > 255, word > 0xFFFF)
    RangeError,
}

/// Assemble source code with the default options (origin 0x8000, strict).
///
/// # Returns
///
/// Ok(AssemblerOutput) on success, Err(Vec<AssemblerError>) on failure
pub fn assemble(source: &str) -> Result<AssemblerOutput, Vec<AssemblerError>> {
    assemble_with(source, &AssemblerOptions::default())
}

/// An instruction line that survived pass 1, ready for encoding.
struct PendingInstruction<'a> {
    line: &'a AssemblyLine,
    resolved: encoder::ResolvedInstruction,
    address: u16,
}

/// Assemble source code into machine code using `options`.
pub fn assemble_with(
    source: &str,
    options: &AssemblerOptions,
) -> Result<AssemblerOutput, Vec<AssemblerError>> {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let mut lines = Vec::new();
    for (index, text) in source.lines().enumerate() {
        match parser::parse_line(index + 1, text) {
            Ok(line) => lines.push(line),
            Err(err) if options.skip_unrecognized => {
                warn!("skipping line {}: {}", err.line, err.message);
                warnings.push(AssemblerWarning {
                    line: err.line,
                    message: format!("{:?}: {} (line skipped)", err.error_type, err.message),
                });
            }
            Err(err) => errors.push(err),
        }
    }

    // Pass 1: bind labels and size instructions
    let mut symbols = SymbolTable::new();
    let mut pending = Vec::new();
    let mut offset: u32 = 0;

    for line in &lines {
        let address = options.origin.wrapping_add(offset as u16);

        if let Some((label, span)) = &line.label {
            if let Err(existing) = symbols.add_symbol(label.clone(), address, line.line_number) {
                if options.skip_unrecognized {
                    warn!("label {} redefined on line {}", label, line.line_number);
                    warnings.push(AssemblerWarning {
                        line: line.line_number,
                        message: format!(
                            "label '{}' redefined (first defined on line {})",
                            label, existing.defined_at
                        ),
                    });
                    symbols.redefine_symbol(label, address, line.line_number);
                } else {
                    errors.push(AssemblerError::new(
                        ErrorType::DuplicateLabel,
                        line.line_number,
                        *span,
                        format!(
                            "duplicate label '{}' (first defined on line {})",
                            label, existing.defined_at
                        ),
                    ));
                }
            }
        }

        let Some((mnemonic, span)) = &line.mnemonic else {
            continue;
        };

        match encoder::resolve(mnemonic, &line.operands) {
            Ok(resolved) => {
                offset += resolved.size() as u32;
                pending.push(PendingInstruction {
                    line,
                    resolved,
                    address,
                });
            }
            Err((error_type, message)) if options.skip_unrecognized => {
                warn!("skipping line {}: {}", line.line_number, message);
                warnings.push(AssemblerWarning {
                    line: line.line_number,
                    message: format!("{:?}: {} (line skipped)", error_type, message),
                });
            }
            Err((error_type, message)) => {
                errors.push(AssemblerError::new(
                    error_type,
                    line.line_number,
                    *span,
                    message,
                ));
                // Keep later labels where the programmer expects them
                offset += 1;
            }
        }
    }

    let end = options.origin as u32 + offset;
    if end > 0x10000 {
        errors.push(AssemblerError::new(
            ErrorType::RangeError,
            lines.last().map_or(1, |l| l.line_number),
            (0, 0),
            format!(
                "program of {} bytes at 0x{:04X} runs past 0xFFFF",
                offset, options.origin
            ),
        ));
    }

    // Pass 2: encode
    let mut bytes = Vec::with_capacity(offset as usize);
    let mut source_map = SourceMap::new();

    for instruction in &pending {
        let line = instruction.line;
        match encoder::encode(&instruction.resolved, &line.operands, &symbols) {
            Ok(encoded) => {
                source_map.add_mapping(
                    instruction.address,
                    encoded.len() as u16,
                    SourceLocation {
                        line: line.line_number,
                        column: line.span.0,
                        length: line.span.1 - line.span.0,
                    },
                );
                bytes.extend_from_slice(&encoded);
            }
            Err((error_type, message)) => {
                let span = line
                    .operands
                    .last()
                    .map_or(line.span, |(_, span)| *span);
                errors.push(AssemblerError::new(
                    error_type,
                    line.line_number,
                    span,
                    message,
                ));
            }
        }
    }

    if !errors.is_empty() {
        errors.sort_by_key(|e| (e.line, e.column));
        debug!("assembly failed with {} errors", errors.len());
        return Err(errors);
    }

    source_map.finalize();
    debug!(
        "assembled {} bytes at 0x{:04X}, {} symbols",
        bytes.len(),
        options.origin,
        symbols.symbols().len()
    );

    Ok(AssemblerOutput {
        bytes,
        origin: options.origin,
        symbol_table: symbols.into_symbols(),
        source_map,
        warnings,
    })
}

/// Validate a label name.
///
/// Labels must:
/// - Start with a letter [a-zA-Z] or underscore
/// - Contain only alphanumeric characters and underscores
/// - Not exceed 32 characters in length
pub fn validate_label(name: &str) -> Result<(), String> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err("label name cannot be empty".to_string());
    };

    if name.len() > MAX_LABEL_LEN {
        return Err(format!(
            "label name too long (max {} characters): {}",
            MAX_LABEL_LEN, name
        ));
    }

    if !first.is_ascii_alphabetic() && first != '_' {
        return Err(format!("label must start with a letter, not '{}'", first));
    }

    for ch in chars {
        if !ch.is_ascii_alphanumeric() && ch != '_' {
            return Err(format!(
                "label contains invalid character '{}' (only letters, digits, and underscores allowed)",
                ch
            ));
        }
    }

    Ok(())
}
