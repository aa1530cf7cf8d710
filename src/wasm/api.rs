//! WASM API for the 8085 emulator.
//!
//! Provides JavaScript-callable interfaces for CPU control, state inspection,
//! memory editing and assembly.

use crate::assembler::source_map::SourceMap;
use crate::{assemble, FlatMemory, MemoryBus, RunOutcome, CPU, DEFAULT_ORIGIN};
use wasm_bindgen::prelude::*;

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

impl<E: std::error::Error> From<E> for JsError {
    fn from(err: E) -> Self {
        JsError::new(&err.to_string())
    }
}

/// Result of assembly operation
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct AssemblyResult {
    success: bool,
    machine_code: Vec<u8>,
    start_addr: u16,
    end_addr: u16,
    error_message: Option<String>,
    error_line: Option<usize>,
    error_count: usize,
    warnings: Vec<String>,
}

#[wasm_bindgen]
impl AssemblyResult {
    #[wasm_bindgen(getter)]
    pub fn success(&self) -> bool {
        self.success
    }

    #[wasm_bindgen(getter)]
    pub fn machine_code(&self) -> Vec<u8> {
        self.machine_code.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn start_addr(&self) -> u16 {
        self.start_addr
    }

    #[wasm_bindgen(getter)]
    pub fn end_addr(&self) -> u16 {
        self.end_addr
    }

    /// First error, formatted with its line and column.
    #[wasm_bindgen(getter)]
    pub fn error_message(&self) -> Option<String> {
        self.error_message.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn error_line(&self) -> Option<usize> {
        self.error_line
    }

    #[wasm_bindgen(getter)]
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    #[wasm_bindgen(getter)]
    pub fn warnings(&self) -> Vec<String> {
        self.warnings.clone()
    }
}

/// Why `run()` stopped
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Halted,
    Breakpoint,
    StepLimit,
}

#[wasm_bindgen]
#[derive(Debug, Clone, Copy)]
pub struct RunResult {
    reason: StopReason,
    steps: u32,
}

#[wasm_bindgen]
impl RunResult {
    #[wasm_bindgen(getter)]
    pub fn reason(&self) -> StopReason {
        self.reason
    }

    #[wasm_bindgen(getter)]
    pub fn steps(&self) -> u32 {
        self.steps
    }
}

impl From<RunOutcome> for RunResult {
    fn from(outcome: RunOutcome) -> Self {
        let reason = match outcome {
            RunOutcome::Halted { .. } => StopReason::Halted,
            RunOutcome::Breakpoint { .. } => StopReason::Breakpoint,
            RunOutcome::StepLimit { .. } => StopReason::StepLimit,
        };
        RunResult {
            reason,
            steps: outcome.steps() as u32,
        }
    }
}

/// Main emulator interface for JavaScript
#[wasm_bindgen]
pub struct Emulator8085 {
    cpu: CPU<FlatMemory>,
    source_map: SourceMap,
    program_start: u16,
    program_end: u16,
}

#[wasm_bindgen]
impl Emulator8085 {
    /// Create a new emulator with zeroed memory and PC at 0x8000
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Emulator8085 {
            cpu: CPU::new(FlatMemory::new()),
            source_map: SourceMap::new(),
            program_start: DEFAULT_ORIGIN,
            program_end: DEFAULT_ORIGIN,
        }
    }

    /// Execute a single instruction. Returns false if the CPU is halted.
    pub fn step(&mut self) -> Result<bool, JsError> {
        Ok(self.cpu.execute_instruction()?)
    }

    /// Run until halt, a breakpoint, or `max_steps` instructions
    pub fn run(&mut self, max_steps: u32) -> Result<RunResult, JsError> {
        Ok(self.cpu.run(max_steps as u64)?.into())
    }

    /// Reset registers and flags; memory and breakpoints are kept
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    /// Zero all of memory and forget the loaded program
    pub fn clear_memory(&mut self) {
        self.cpu.memory_mut().clear();
        self.source_map = SourceMap::new();
        self.program_end = self.program_start;
    }

    // Register getters
    #[wasm_bindgen(getter)]
    pub fn a(&self) -> u8 {
        self.cpu.a()
    }

    #[wasm_bindgen(getter)]
    pub fn b(&self) -> u8 {
        self.cpu.b()
    }

    #[wasm_bindgen(getter)]
    pub fn c(&self) -> u8 {
        self.cpu.c()
    }

    #[wasm_bindgen(getter)]
    pub fn d(&self) -> u8 {
        self.cpu.d()
    }

    #[wasm_bindgen(getter)]
    pub fn e(&self) -> u8 {
        self.cpu.e()
    }

    #[wasm_bindgen(getter)]
    pub fn h(&self) -> u8 {
        self.cpu.h()
    }

    #[wasm_bindgen(getter)]
    pub fn l(&self) -> u8 {
        self.cpu.l()
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.cpu.pc()
    }

    #[wasm_bindgen(getter)]
    pub fn sp(&self) -> u16 {
        self.cpu.sp()
    }

    #[wasm_bindgen(getter)]
    pub fn psw(&self) -> u16 {
        self.cpu.psw()
    }

    #[wasm_bindgen(getter)]
    pub fn halted(&self) -> bool {
        self.cpu.halted()
    }

    #[wasm_bindgen(getter)]
    pub fn interrupt_enabled(&self) -> bool {
        self.cpu.interrupt_enabled()
    }

    // Flag getters
    #[wasm_bindgen(getter)]
    pub fn flag_s(&self) -> bool {
        self.cpu.flag_s()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_z(&self) -> bool {
        self.cpu.flag_z()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_ac(&self) -> bool {
        self.cpu.flag_ac()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_p(&self) -> bool {
        self.cpu.flag_p()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_c(&self) -> bool {
        self.cpu.flag_c()
    }

    // Register setters

    /// Set the program counter
    pub fn set_pc(&mut self, addr: u16) {
        self.cpu.set_pc(addr);
    }

    pub fn set_sp(&mut self, addr: u16) {
        self.cpu.set_sp(addr);
    }

    pub fn set_a(&mut self, value: u8) {
        self.cpu.set_a(value);
    }

    // Memory access methods

    /// Read a single byte from memory
    pub fn read_memory(&self, addr: u16) -> u8 {
        self.cpu.memory().read(addr)
    }

    /// Write a single byte to memory, rejecting out-of-range address or value
    pub fn write_memory(&mut self, addr: u32, value: u32) -> Result<(), JsError> {
        Ok(self.cpu.memory_mut().write_checked(addr, value)?)
    }

    /// Copy of `len` bytes starting at `start` (clipped at 0xFFFF)
    pub fn memory_range(&self, start: u16, len: usize) -> Vec<u8> {
        self.cpu.memory().slice(start, len).to_vec()
    }

    /// Call `callback(address, value)` after every memory write
    pub fn set_on_memory_write(&mut self, callback: js_sys::Function) {
        self.cpu
            .memory_mut()
            .set_write_observer(move |addr, value| {
                let _ = callback.call2(
                    &JsValue::NULL,
                    &JsValue::from(addr),
                    &JsValue::from(value),
                );
            });
    }

    pub fn clear_on_memory_write(&mut self) {
        self.cpu.memory_mut().clear_write_observer();
    }

    // Breakpoints

    pub fn add_breakpoint(&mut self, addr: u16) {
        self.cpu.add_breakpoint(addr);
    }

    pub fn remove_breakpoint(&mut self, addr: u16) -> bool {
        self.cpu.remove_breakpoint(addr)
    }

    pub fn clear_breakpoints(&mut self) {
        self.cpu.clear_breakpoints();
    }

    /// Assemble 8085 source, load it at 0x8000 and reset the CPU
    pub fn assemble(&mut self, source: String) -> AssemblyResult {
        let start_addr = DEFAULT_ORIGIN;
        let output = match assemble(&source) {
            Ok(output) => output,
            Err(errors) => {
                // Report first error
                let first_error = &errors[0];
                return AssemblyResult {
                    success: false,
                    machine_code: Vec::new(),
                    start_addr,
                    end_addr: start_addr,
                    error_message: Some(first_error.to_string()),
                    error_line: Some(first_error.line),
                    error_count: errors.len(),
                    warnings: Vec::new(),
                };
            }
        };

        if let Err(err) = self.cpu.memory_mut().load_program(&output.bytes, output.origin) {
            return AssemblyResult {
                success: false,
                machine_code: Vec::new(),
                start_addr,
                end_addr: start_addr,
                error_message: Some(err.to_string()),
                error_line: None,
                error_count: 1,
                warnings: Vec::new(),
            };
        }

        self.cpu.reset();
        self.source_map = output.source_map;
        self.program_start = output.origin;
        self.program_end = output.origin.wrapping_add(output.bytes.len() as u16);

        AssemblyResult {
            success: true,
            start_addr: self.program_start,
            end_addr: self.program_end,
            error_message: None,
            error_line: None,
            error_count: 0,
            warnings: output
                .warnings
                .iter()
                .map(|w| format!("line {}: {}", w.line, w.message))
                .collect(),
            machine_code: output.bytes,
        }
    }

    /// Source line of the instruction at PC, if it came from the last assembly
    pub fn current_line(&self) -> Option<usize> {
        self.source_map
            .get_source_location(self.cpu.pc())
            .map(|loc| loc.line)
    }

    /// Get the program start address
    #[wasm_bindgen(getter)]
    pub fn program_start(&self) -> u16 {
        self.program_start
    }

    /// Get the program end address
    #[wasm_bindgen(getter)]
    pub fn program_end(&self) -> u16 {
        self.program_end
    }
}

impl Default for Emulator8085 {
    fn default() -> Self {
        Self::new()
    }
}
