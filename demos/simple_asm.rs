//! Basic assembler usage example

use lib8085::assembler::assemble;

fn main() {
    let source = r#"
        MVI A,#42
        STA 9000H
LOOP:   JMP LOOP
    "#;

    match assemble(source) {
        Ok(output) => {
            println!(
                "Assembled {} bytes at 0x{:04X}:",
                output.bytes.len(),
                output.origin
            );
            for (i, byte) in output.bytes.iter().enumerate() {
                print!("{:02X} ", byte);
                if (i + 1) % 8 == 0 {
                    println!();
                }
            }
            println!();

            for symbol in &output.symbol_table {
                println!("  {:<8} = 0x{:04X}", symbol.name, symbol.address);
            }
        }
        Err(errors) => {
            eprintln!("Assembly failed:");
            for error in errors {
                eprintln!("  {}", error);
            }
        }
    }
}
