//! Fuzz target for the assembler.
//!
//! Feeds arbitrary text to the assembler in both strict and lenient modes to
//! find panics in parsing and encoding.

#![no_main]

use lib8085::{assemble, assemble_with, AssemblerOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let source = String::from_utf8_lossy(data);

    if let Ok(output) = assemble(&source) {
        assert!(output.bytes.len() <= 0x8000);
        assert!(output.warnings.is_empty());
    }

    let lenient = AssemblerOptions {
        origin: 0x0000,
        skip_unrecognized: true,
    };
    if let Ok(output) = assemble_with(&source, &lenient) {
        // Every symbol must point inside (or just past) the emitted code
        for symbol in &output.symbol_table {
            assert!(symbol.address as usize <= output.bytes.len());
        }
    }
});
