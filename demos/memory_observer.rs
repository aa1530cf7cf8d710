//! Memory write observer example
//!
//! Registers a callback on FlatMemory and prints every byte the program
//! writes, the way a front-end would refresh its memory view.

use std::cell::RefCell;
use std::rc::Rc;

use lib8085::{assemble, FlatMemory, MemoryBus, CPU};

fn main() {
    let source = "
        LXI H,9000H
        MVI M,#AA
        INX H
        MVI M,#55
        LXI SP,9100H
        PUSH H
        HLT
    ";

    let output = match assemble(source) {
        Ok(output) => output,
        Err(errors) => {
            for error in errors {
                eprintln!("{}", error);
            }
            return;
        }
    };

    let writes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&writes);

    let mut memory = FlatMemory::new();
    if let Err(err) = memory.load_program(&output.bytes, output.origin) {
        eprintln!("{}", err);
        return;
    }
    // Attach after loading so the program bytes themselves aren't reported
    memory.set_write_observer(move |addr, value| sink.borrow_mut().push((addr, value)));

    let mut cpu = CPU::new(memory);
    if let Err(err) = cpu.run(100) {
        eprintln!("Execution error: {}", err);
    }

    println!("Observed {} writes:", writes.borrow().len());
    for (addr, value) in writes.borrow().iter() {
        println!("  [0x{:04X}] <- 0x{:02X}", addr, value);
    }
}
