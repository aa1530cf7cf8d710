//! Address ↔ source line lookup for assembled programs
//!
//! Front-ends use it to highlight the source line of the instruction at PC.

/// Instruction addresses paired with the source lines they came from.
///
/// Call [`SourceMap::finalize`] once all instructions are recorded; lookups
/// binary-search both tables.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SourceMap {
    /// First byte of each instruction, ordered by address
    by_address: Vec<(u16, SourceLocation)>,

    /// Bytes occupied by each source line, ordered by line
    by_line: Vec<(usize, AddressRange)>,
}

/// Where an instruction's text sits in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    /// 1-indexed line
    pub line: usize,

    /// 0-indexed column of the label or mnemonic
    pub column: usize,

    /// Characters from `column` through the last operand
    pub length: usize,
}

/// Bytes `start..end` of an instruction. `end` wraps to 0 for an
/// instruction ending at 0xFFFF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressRange {
    pub start: u16,
    pub end: u16,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an instruction of `len` bytes at `address` coming from `location`.
    pub fn add_mapping(&mut self, address: u16, len: u16, location: SourceLocation) {
        self.by_address.push((address, location));
        self.by_line.push((
            location.line,
            AddressRange {
                start: address,
                end: address.wrapping_add(len),
            },
        ));
    }

    /// Source of the instruction whose opcode byte is at `address`.
    ///
    /// Operand bytes have no entry.
    pub fn get_source_location(&self, address: u16) -> Option<SourceLocation> {
        self.by_address
            .binary_search_by_key(&address, |(addr, _)| *addr)
            .ok()
            .map(|idx| self.by_address[idx].1)
    }

    /// Bytes emitted for `line`, if it produced an instruction.
    pub fn get_address_range(&self, line: usize) -> Option<AddressRange> {
        self.by_line
            .binary_search_by_key(&line, |(l, _)| *l)
            .ok()
            .map(|idx| self.by_line[idx].1)
    }

    /// Number of mapped instructions.
    pub fn len(&self) -> usize {
        self.by_address.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_address.is_empty()
    }

    pub fn finalize(&mut self) {
        self.by_address.sort_by_key(|(addr, _)| *addr);
        self.by_line.sort_by_key(|(line, _)| *line);
    }
}
