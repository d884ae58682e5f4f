//! PPU (Picture Processing Unit) as a CPU-bus collaborator.
//!
//! See [PPU registers](https://www.nesdev.org/wiki/PPU_registers) and
//! [PPU OAM](https://www.nesdev.org/wiki/PPU_OAM). Only the CPU-facing contract lives here:
//! eight mirrored registers, the OAM DMA sink, and the vblank NMI line.

pub mod ppu;
