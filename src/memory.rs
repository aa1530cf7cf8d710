//! # Memory Bus Abstraction
//!
//! This module provides the `MemoryBus` trait that decouples the CPU from a specific
//! memory implementation, and `FlatMemory`, the 64KB store the 8085 trainer boards
//! (and this emulator) use by default.
//!
//! ## Design Principles
//!
//! - Byte reads/writes with a 16-bit address always succeed: the address type
//!   covers the whole 0x0000-0xFFFF space
//! - Word accessors are little-endian and refuse to straddle the top of memory
//! - Editors and viewers that accept wider user input go through the
//!   `read_checked`/`write_checked` forms, which report out-of-range input
//! - A write observer can be attached for live display refresh; nothing in the
//!   emulator depends on it

use std::fmt;

/// Highest valid memory address.
pub const MAX_ADDRESS: u16 = 0xFFFF;

/// Number of addressable bytes.
pub const MEMORY_SIZE: usize = 0x10000;

/// Errors raised by memory accesses that cannot be satisfied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    /// Address outside 0x0000-0xFFFF (includes the high byte of a word at 0xFFFF).
    AddressOutOfRange { address: u32 },

    /// Value offered to a byte cell is outside 0-255.
    ValueOutOfRange { address: u16, value: u32 },

    /// A program does not fit between its base address and the top of memory.
    ProgramOverflow { base: u16, len: usize },
}

impl fmt::Display for MemoryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MemoryError::AddressOutOfRange { address } => {
                write!(f, "Invalid memory address: 0x{:04X}", address)
            }
            MemoryError::ValueOutOfRange { address, value } => write!(
                f,
                "Invalid memory write: value 0x{:X} at 0x{:04X} is not a byte",
                value, address
            ),
            MemoryError::ProgramOverflow { base, len } => write!(
                f,
                "Program of {} bytes loaded at 0x{:04X} runs past 0xFFFF",
                len, base
            ),
        }
    }
}

impl std::error::Error for MemoryError {}

/// Memory bus trait for the CPU to read/write bytes.
///
/// Only `read` and `write` are required. The word, program-loading and checked
/// accessors are provided on top of them so every implementation gets the same
/// bounds and atomicity rules.
///
/// # Examples
///
/// ```
/// use lib8085::{FlatMemory, MemoryBus};
///
/// let mut mem = FlatMemory::new();
/// mem.write(0x1234, 0x42);
/// assert_eq!(mem.read(0x1234), 0x42);
///
/// mem.write_word(0x2000, 0xBEEF).unwrap();
/// assert_eq!(mem.read(0x2000), 0xEF);
/// assert_eq!(mem.read(0x2001), 0xBE);
/// ```
pub trait MemoryBus {
    /// Reads a byte from the specified 16-bit address.
    fn read(&self, addr: u16) -> u8;

    /// Writes a byte to the specified 16-bit address.
    fn write(&mut self, addr: u16, value: u8);

    /// Reads a little-endian 16-bit word at `addr` and `addr + 1`.
    ///
    /// Fails when `addr` is 0xFFFF, since the high byte would live at 0x10000.
    fn read_word(&self, addr: u16) -> Result<u16, MemoryError> {
        if addr == MAX_ADDRESS {
            return Err(MemoryError::AddressOutOfRange {
                address: addr as u32 + 1,
            });
        }
        let low = self.read(addr) as u16;
        let high = self.read(addr + 1) as u16;
        Ok((high << 8) | low)
    }

    /// Writes a little-endian 16-bit word to `addr` and `addr + 1`.
    ///
    /// Either both bytes are written or neither is.
    fn write_word(&mut self, addr: u16, value: u16) -> Result<(), MemoryError> {
        if addr == MAX_ADDRESS {
            return Err(MemoryError::AddressOutOfRange {
                address: addr as u32 + 1,
            });
        }
        self.write(addr, (value & 0xFF) as u8);
        self.write(addr + 1, (value >> 8) as u8);
        Ok(())
    }

    /// Copies `program` into memory starting at `base`.
    ///
    /// The whole range is validated before the first byte is written, so a
    /// program that would run past 0xFFFF leaves memory untouched.
    fn load_program(&mut self, program: &[u8], base: u16) -> Result<(), MemoryError> {
        if base as usize + program.len() > MEMORY_SIZE {
            return Err(MemoryError::ProgramOverflow {
                base,
                len: program.len(),
            });
        }
        for (offset, &byte) in program.iter().enumerate() {
            self.write(base + offset as u16, byte);
        }
        Ok(())
    }

    /// Reads a byte at an address given in a wider integer type.
    fn read_checked(&self, addr: u32) -> Result<u8, MemoryError> {
        let addr =
            u16::try_from(addr).map_err(|_| MemoryError::AddressOutOfRange { address: addr })?;
        Ok(self.read(addr))
    }

    /// Writes a value given in wider integer types, validating both.
    fn write_checked(&mut self, addr: u32, value: u32) -> Result<(), MemoryError> {
        let addr =
            u16::try_from(addr).map_err(|_| MemoryError::AddressOutOfRange { address: addr })?;
        let byte = u8::try_from(value).map_err(|_| MemoryError::ValueOutOfRange {
            address: addr,
            value,
        })?;
        self.write(addr, byte);
        Ok(())
    }
}

/// Callback invoked with `(address, value)` after every write.
pub type WriteObserver = Box<dyn FnMut(u16, u8)>;

/// Simple 64KB flat memory implementation.
///
/// All 65536 addresses are writable RAM initialized to 0x00. An optional write
/// observer is notified after each write, which is how a front-end keeps its
/// memory view in sync without polling.
///
/// # Examples
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use lib8085::{FlatMemory, MemoryBus};
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&seen);
///
/// let mut mem = FlatMemory::new();
/// mem.set_write_observer(move |addr, value| sink.borrow_mut().push((addr, value)));
/// mem.write(0x9000, 0x11);
///
/// assert_eq!(*seen.borrow(), vec![(0x9000, 0x11)]);
/// ```
pub struct FlatMemory {
    /// 64KB contiguous memory array
    data: Box<[u8; MEMORY_SIZE]>,

    observer: Option<WriteObserver>,
}

impl FlatMemory {
    /// Creates a new FlatMemory instance with all bytes initialized to zero.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; MEMORY_SIZE]),
            observer: None,
        }
    }

    /// Registers a callback that runs after every successful write.
    ///
    /// Replaces any previously registered observer.
    pub fn set_write_observer<F>(&mut self, observer: F)
    where
        F: FnMut(u16, u8) + 'static,
    {
        self.observer = Some(Box::new(observer));
    }

    /// Removes the write observer, if any.
    pub fn clear_write_observer(&mut self) {
        self.observer = None;
    }

    /// Returns true if a write observer is registered.
    pub fn has_write_observer(&self) -> bool {
        self.observer.is_some()
    }

    /// Zeroes the whole address space without notifying the observer.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Returns a view of `len` bytes starting at `start`, clipped to the top of memory.
    pub fn slice(&self, start: u16, len: usize) -> &[u8] {
        let start = start as usize;
        let end = start.saturating_add(len).min(MEMORY_SIZE);
        &self.data[start..end]
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FlatMemory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("FlatMemory")
            .field("size", &MEMORY_SIZE)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl MemoryBus for FlatMemory {
    fn read(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.data[addr as usize] = value;
        if let Some(observer) = self.observer.as_mut() {
            observer(addr, value);
        }
    }
}
