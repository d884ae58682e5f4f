//! Ricoh: a 6502 / Ricoh 2A03 CPU core with the NES CPU address bus.
//!
//! Implements the CPU side of the NES as documented on the
//! [NESdev Wiki](https://www.nesdev.org/wiki/NES_reference_guide). Picture, audio and
//! cartridge hardware appear only as the traits the bus talks to, each with a small
//! reference implementation.
//!
//! ## Modules (NESdev references)
//!
//! - **apu** – [APU registers](https://www.nesdev.org/wiki/APU_registers): $4000–$4017 contract, IRQ line
//! - **bus** – [CPU memory map](https://www.nesdev.org/wiki/CPU_memory_map): RAM mirroring, PPU/APU
//!   windows, cartridge space, [OAM DMA](https://www.nesdev.org/wiki/PPU_registers#OAMDMA)
//! - **cartridge** – [Mapper](https://www.nesdev.org/wiki/Mapper) contract; [NROM](https://www.nesdev.org/wiki/NROM) (0)
//! - **config** – CPU options: undocumented-opcode policy, stack clearing
//! - **cpu** – [6502](https://www.nesdev.org/wiki/CPU) / 2A03: 151 documented opcodes,
//!   [NMI](https://www.nesdev.org/wiki/NMI) and IRQ, per-step traces
//! - **ppu** – [PPU registers](https://www.nesdev.org/wiki/PPU_registers): eight-register contract, OAM, NMI line

pub mod apu;
pub mod bus;
pub mod cartridge;
pub mod config;
pub mod cpu;
pub mod ppu;
