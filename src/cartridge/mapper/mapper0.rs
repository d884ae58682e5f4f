//! Mapper 0 (NROM): no bank switching, 16/32KB PRG, 8KB CHR.

use crate::cartridge::mapper::{MapperError, Mirroring, mapper::Mapper};

const PRG_BANK: usize = 16 * 1024;
const CHR_SIZE: usize = 8 * 1024;

/// NROM mapper: fixed PRG and CHR, optionally 16KB PRG mirror.
pub struct Mapper0 {
    prg_rom: Vec<u8>,
    chr: Vec<u8>,
    chr_is_ram: bool,
    mirroring: Mirroring,
}

impl Mapper0 {
    /// Create Mapper0 with given PRG and CHR ROM. An empty CHR image gives 8KB CHR RAM.
    pub fn new(
        prg_rom: Vec<u8>,
        chr_rom: Vec<u8>,
        mirroring: Mirroring,
    ) -> Result<Self, MapperError> {
        if prg_rom.len() != PRG_BANK && prg_rom.len() != 2 * PRG_BANK {
            return Err(MapperError::BadPrgSize { len: prg_rom.len() });
        }

        let (chr, chr_is_ram) = match chr_rom.len() {
            0 => (vec![0; CHR_SIZE], true),
            CHR_SIZE => (chr_rom, false),
            len => return Err(MapperError::BadChrSize { len }),
        };

        Ok(Self {
            prg_rom,
            chr,
            chr_is_ram,
            mirroring,
        })
    }

    fn prg_index(&self, addr: u16) -> Result<usize, MapperError> {
        match addr {
            // PRG ROM: $8000-$FFFF, mirror if 16KB
            0x8000..=0xFFFF => Ok((addr - 0x8000) as usize % self.prg_rom.len()),
            _ => Err(MapperError::OutOfRange { addr }),
        }
    }

    fn chr_index(addr: u16) -> Result<usize, MapperError> {
        match addr {
            0x0000..=0x1FFF => Ok(addr as usize),
            _ => Err(MapperError::OutOfRange { addr }),
        }
    }
}

impl Mapper for Mapper0 {
    fn read(&self, addr: u16) -> Result<u8, MapperError> {
        Ok(self.prg_rom[self.prg_index(addr)?])
    }

    fn write(&mut self, addr: u16, _data: u8) -> Result<(), MapperError> {
        // PRG ROM: no registers, writes are dropped
        self.prg_index(addr).map(|_| ())
    }

    fn chr_read(&self, addr: u16) -> Result<u8, MapperError> {
        Ok(self.chr[Self::chr_index(addr)?])
    }

    fn chr_write(&mut self, addr: u16, data: u8) -> Result<(), MapperError> {
        let index = Self::chr_index(addr)?;
        if self.chr_is_ram {
            self.chr[index] = data;
        }
        Ok(())
    }

    fn mirroring(&self) -> Mirroring {
        self.mirroring
    }
}
