//! 6502 CPU core as used in the NES 2A03.
//!
//! The 151 documented opcodes, interrupts serviced at instruction boundaries, and a
//! `StepTrace` per instruction. Decimal mode is stored but never applied. All memory and
//! I/O goes through the `Bus` trait.

pub mod addressing;
pub mod cpu;
pub mod execute;
pub mod fault;
pub mod flags;
pub mod opcodes;
pub mod registers;
pub mod stack;
pub mod trace;
