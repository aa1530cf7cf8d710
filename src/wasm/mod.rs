//! WebAssembly bindings for the lib8085 emulator.
//!
//! This module provides JavaScript-callable interfaces to the 8085 CPU emulator,
//! enabling browser-based editing, assembling and stepping of 8085 programs.

pub mod api;

pub use api::Emulator8085;
