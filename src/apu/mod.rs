//! NES APU and I/O registers as a CPU-bus collaborator.
//!
//! - **AudioDevice**: register read/write contract for $4000–$4017 plus the IRQ line.
//! - **ApuRegisters**: latch implementation used by the default bus and the tests.
//!
//! Sound synthesis is not part of this crate.

pub mod apu;
