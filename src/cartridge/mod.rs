//! Cartridge side of the CPU bus.
//!
//! - **mapper**: the read/write contract the bus uses for $8000–$FFFF, plus NROM (0).
//!
//! Parsing ROM images is left to the caller; mappers are built from raw PRG/CHR bytes.

pub mod mapper;
