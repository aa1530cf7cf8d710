//! Symbol table management for labels

use crate::assembler::Symbol;

/// Symbol table for managing label definitions
///
/// Built during pass 1 and consulted in pass 2. Names are case-sensitive.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
}

impl SymbolTable {
    /// Create a new empty symbol table
    pub fn new() -> Self {
        Self {
            symbols: Vec::new(),
        }
    }

    /// Add a symbol to the table
    ///
    /// Returns Ok(()) on success, Err with the existing symbol if the name is taken
    pub fn add_symbol(
        &mut self,
        name: String,
        address: u16,
        defined_at: usize,
    ) -> Result<(), Symbol> {
        if let Some(existing) = self.lookup_symbol(&name) {
            return Err(existing.clone());
        }

        self.symbols.push(Symbol {
            name,
            address,
            defined_at,
        });

        Ok(())
    }

    /// Rebinds an existing symbol, or adds it if missing.
    pub fn redefine_symbol(&mut self, name: &str, address: u16, defined_at: usize) {
        match self.symbols.iter_mut().find(|s| s.name == name) {
            Some(symbol) => {
                symbol.address = address;
                symbol.defined_at = defined_at;
            }
            None => self.symbols.push(Symbol {
                name: name.to_string(),
                address,
                defined_at,
            }),
        }
    }

    /// Look up a symbol by name
    pub fn lookup_symbol(&self, name: &str) -> Option<&Symbol> {
        self.symbols.iter().find(|s| s.name == name)
    }

    /// Get all symbols in definition order
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn into_symbols(self) -> Vec<Symbol> {
        self.symbols
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_table_add_lookup() {
        let mut table = SymbolTable::new();

        assert!(table.add_symbol("START".to_string(), 0x8000, 1).is_ok());
        assert!(table.add_symbol("LOOP".to_string(), 0x8010, 5).is_ok());

        let start = table.lookup_symbol("START").unwrap();
        assert_eq!(start.address, 0x8000);
        assert_eq!(table.lookup_symbol("LOOP").unwrap().address, 0x8010);

        assert!(table.lookup_symbol("loop").is_none());
    }

    #[test]
    fn test_symbol_table_duplicate() {
        let mut table = SymbolTable::new();

        assert!(table.add_symbol("START".to_string(), 0x8000, 1).is_ok());
        let existing = table.add_symbol("START".to_string(), 0x9000, 10).unwrap_err();
        assert_eq!(existing.defined_at, 1);

        assert_eq!(table.lookup_symbol("START").unwrap().address, 0x8000);
    }

    #[test]
    fn test_redefine_symbol() {
        let mut table = SymbolTable::new();
        table.add_symbol("X".to_string(), 0x8000, 1).unwrap();
        table.redefine_symbol("X", 0x8004, 3);

        let x = table.lookup_symbol("X").unwrap();
        assert_eq!((x.address, x.defined_at), (0x8004, 3));
        assert_eq!(table.symbols().len(), 1);
    }
}
