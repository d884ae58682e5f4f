//! Mapper trait: PRG/CHR memory access, mirroring, and scanline/IRQ signalling.

use crate::cartridge::mapper::{MapperError, Mirroring};

/// Trait for NES cartridge mappers. The CPU bus only uses `read`/`write` over $8000–$FFFF;
/// the CHR side and scanline signal belong to the picture device.
pub trait Mapper {
    /// Read from PRG space ($8000–$FFFF).
    fn read(&self, addr: u16) -> Result<u8, MapperError>;
    /// Write to PRG space: mapper registers, or ignored for plain ROM.
    fn write(&mut self, addr: u16, data: u8) -> Result<(), MapperError>;
    /// Read from CHR ROM/RAM ($0000–$1FFF).
    fn chr_read(&self, addr: u16) -> Result<u8, MapperError>;
    /// Write to CHR RAM ($0000–$1FFF); ignored when CHR is ROM.
    fn chr_write(&mut self, addr: u16, data: u8) -> Result<(), MapperError>;
    /// Current nametable mirroring for the PPU.
    fn mirroring(&self) -> Mirroring;

    /// Called by the picture device once per rendered scanline (MMC3-style IRQ counters).
    fn signal_scanline(&mut self) {}

    /// Poll the cartridge IRQ line.
    fn poll_irq(&mut self) -> bool {
        false
    }
}
