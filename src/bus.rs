//! Memory bus and address decoding for the NES.
//!
//! Maps CPU addresses to work RAM, PPU registers, APU/IO registers, and the cartridge
//! mapper. See [CPU memory map](https://www.nesdev.org/wiki/CPU_memory_map).
//!
//! | Range         | Target                                   |
//! |---------------|------------------------------------------|
//! | $0000–$1FFF   | 2 KiB work RAM, mirrored 4×              |
//! | $2000–$3FFF   | PPU registers, mirrored every 8 bytes    |
//! | $4000–$4017   | APU / IO registers ($4014 = OAM DMA)     |
//! | $4018–$7FFF   | unmapped: access is a `BusError`         |
//! | $8000–$FFFF   | cartridge mapper                         |

use std::fmt;
use std::ops::{Index, IndexMut};

use log::{debug, info};

use crate::{
    apu::apu::{ApuRegisters, AudioDevice},
    cartridge::mapper::{MapperError, mapper::Mapper},
    ppu::ppu::{OAM_LEN, PictureDevice, PpuRegisters},
};

pub const RAM_SIZE: usize = 0x0800;
pub const PPU_REGISTERS_START: u16 = 0x2000;
pub const APU_REGISTERS_START: u16 = 0x4000;
pub const OAM_DMA: u16 = 0x4014;

/// Erased-EEPROM fill used for work RAM at power-on.
pub const RAM_POWER_ON_FILL: u8 = 0xFF;

/// Direction of a bus access, carried in errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Access::Read => f.write_str("read"),
            Access::Write => f.write_str("write"),
        }
    }
}

/// Errors raised while decoding or serving a bus access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusError {
    /// No device answers at this address ($4018–$7FFF on the NES bus).
    Unmapped { addr: u16, access: Access },
    /// The cartridge mapper refused the access.
    Mapper { addr: u16, access: Access, source: MapperError },
}

impl BusError {
    /// The address of the failing access.
    pub fn addr(&self) -> u16 {
        match self {
            BusError::Unmapped { addr, .. } | BusError::Mapper { addr, .. } => *addr,
        }
    }
}

impl fmt::Display for BusError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BusError::Unmapped { addr, access } => {
                write!(f, "unmapped {} at ${:04X}", access, addr)
            }
            BusError::Mapper { addr, access, source } => {
                write!(f, "mapper fault on {} at ${:04X}: {}", access, addr, source)
            }
        }
    }
}

impl std::error::Error for BusError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BusError::Mapper { source, .. } => Some(source),
            BusError::Unmapped { .. } => None,
        }
    }
}

/// Trait for memory-mapped I/O and bus access used by the CPU.
pub trait Bus {
    fn read(&mut self, addr: u16) -> Result<u8, BusError>;
    fn write(&mut self, addr: u16, data: u8) -> Result<(), BusError>;

    /// Power-on initialisation of bus-owned memory.
    fn power(&mut self) {}

    /// Consume a pending NMI. Polled once per instruction boundary.
    fn poll_nmi(&mut self) -> bool {
        false
    }

    /// Level of the shared IRQ line. Only polled while interrupts are enabled.
    fn poll_irq(&mut self) -> bool {
        false
    }
}

/// 11-bit index into work RAM. Always below `RAM_SIZE` by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RamIndex(u16);

impl RamIndex {
    /// Fold any CPU address in $0000–$1FFF (or beyond) onto the 2 KiB window.
    pub fn from_addr(addr: u16) -> Self {
        Self(addr & (RAM_SIZE as u16 - 1))
    }

    pub fn get(self) -> u16 {
        self.0
    }
}

/// The 2 KiB of internal work RAM.
pub struct WorkRam([u8; RAM_SIZE]);

impl WorkRam {
    pub fn new() -> Self {
        Self([RAM_POWER_ON_FILL; RAM_SIZE])
    }

    pub fn fill(&mut self, value: u8) {
        self.0 = [value; RAM_SIZE];
    }
}

impl Default for WorkRam {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<RamIndex> for WorkRam {
    type Output = u8;

    fn index(&self, index: RamIndex) -> &u8 {
        &self.0[index.0 as usize]
    }
}

impl IndexMut<RamIndex> for WorkRam {
    fn index_mut(&mut self, index: RamIndex) -> &mut u8 {
        &mut self.0[index.0 as usize]
    }
}

/// Main NES bus: work RAM, PPU and APU register windows, and the cartridge mapper.
pub struct NesBus<P: PictureDevice = PpuRegisters, A: AudioDevice = ApuRegisters> {
    pub ram: WorkRam,
    pub ppu: P,
    pub apu: A,
    mapper: Box<dyn Mapper>,
}

impl NesBus {
    /// Create a new bus with the given mapper and latch-only PPU/APU devices.
    pub fn new(mapper: Box<dyn Mapper>) -> Self {
        Self::with_devices(mapper, PpuRegisters::new(), ApuRegisters::new())
    }
}

impl<P: PictureDevice, A: AudioDevice> NesBus<P, A> {
    pub fn with_devices(mapper: Box<dyn Mapper>, ppu: P, apu: A) -> Self {
        Self {
            ram: WorkRam::new(),
            ppu,
            apu,
            mapper,
        }
    }

    /// Replace the cartridge, returning the previous one.
    pub fn swap_mapper(&mut self, mapper: Box<dyn Mapper>) -> Box<dyn Mapper> {
        info!("cartridge swapped");
        std::mem::replace(&mut self.mapper, mapper)
    }

    pub fn mapper(&self) -> &dyn Mapper {
        self.mapper.as_ref()
    }

    /// OAM DMA: copy page `page` ($XX00–$XXFF) into PPU OAM. The source page goes through
    /// normal decoding, so an unmapped page faults like any other read.
    fn oam_dma(&mut self, page: u8) -> Result<(), BusError> {
        let base = (page as u16) << 8;
        let mut data = [0; OAM_LEN];
        for (i, byte) in data.iter_mut().enumerate() {
            *byte = self.read(base + i as u16)?;
        }
        debug!("OAM DMA from ${:02X}00", page);
        self.ppu.oam_dma(&data);
        Ok(())
    }

    fn mapper_error(addr: u16, access: Access) -> impl FnOnce(MapperError) -> BusError {
        move |source| BusError::Mapper {
            addr,
            access,
            source,
        }
    }
}

impl<P: PictureDevice, A: AudioDevice> Bus for NesBus<P, A> {
    fn read(&mut self, addr: u16) -> Result<u8, BusError> {
        match addr {
            // Internal RAM (mirrored 4x in 0x0000-0x1FFF)
            0x0000..=0x1FFF => Ok(self.ram[RamIndex::from_addr(addr)]),
            // PPU registers $2000-$3FFF (mirrored every 8 bytes)
            0x2000..=0x3FFF => {
                let index = ((addr - PPU_REGISTERS_START) % 8) as u8;
                Ok(self.ppu.read_register(index))
            }
            0x4000..=0x4017 => {
                let index = (addr - APU_REGISTERS_START) as u8;
                Ok(self.apu.read_register(index))
            }
            0x4018..=0x7FFF => Err(BusError::Unmapped {
                addr,
                access: Access::Read,
            }),
            // Cartridge PRG
            0x8000..=0xFFFF => self
                .mapper
                .read(addr)
                .map_err(Self::mapper_error(addr, Access::Read)),
        }
    }

    fn write(&mut self, addr: u16, data: u8) -> Result<(), BusError> {
        match addr {
            0x0000..=0x1FFF => {
                self.ram[RamIndex::from_addr(addr)] = data;
                Ok(())
            }
            0x2000..=0x3FFF => {
                self.ppu
                    .write_register(((addr - PPU_REGISTERS_START) % 8) as u8, data);
                Ok(())
            }
            OAM_DMA => self.oam_dma(data),
            0x4000..=0x4017 => {
                self.apu
                    .write_register((addr - APU_REGISTERS_START) as u8, data);
                Ok(())
            }
            0x4018..=0x7FFF => Err(BusError::Unmapped {
                addr,
                access: Access::Write,
            }),
            // Cartridge: mapper registers or ignored ROM writes
            0x8000..=0xFFFF => self
                .mapper
                .write(addr, data)
                .map_err(Self::mapper_error(addr, Access::Write)),
        }
    }

    fn power(&mut self) {
        self.ram.fill(RAM_POWER_ON_FILL);
    }

    fn poll_nmi(&mut self) -> bool {
        self.ppu.poll_nmi()
    }

    fn poll_irq(&mut self) -> bool {
        self.apu.poll_irq() || self.mapper.poll_irq()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::mapper::{Mirroring, mapper0::Mapper0};

    fn make_bus() -> NesBus {
        let mut prg = vec![0xEA; 0x8000]; // NOPs
        prg[0x7FFC] = 0x00;
        prg[0x7FFD] = 0x80;
        let mapper = Mapper0::new(prg, Vec::new(), Mirroring::Horizontal).unwrap();
        NesBus::new(Box::new(mapper))
    }

    #[test]
    fn ram_is_mirrored_four_times() {
        let mut bus = make_bus();
        bus.write(0x0000, 0xAB).unwrap();

        assert_eq!(bus.read(0x0000), Ok(0xAB));
        assert_eq!(bus.read(0x0800), Ok(0xAB));
        assert_eq!(bus.read(0x1000), Ok(0xAB));
        assert_eq!(bus.read(0x1800), Ok(0xAB));

        bus.write(0x1FFF, 0x42).unwrap();
        assert_eq!(bus.read(0x07FF), Ok(0x42));
    }

    #[test]
    fn ram_index_folds_mirrors() {
        assert_eq!(RamIndex::from_addr(0x1803).get(), 0x0003);
        assert_eq!(RamIndex::from_addr(0x0FFF).get(), 0x07FF);

        let mut bus = make_bus();
        bus.write(0x1803, 0x5C).unwrap();
        assert_eq!(bus.ram[RamIndex::from_addr(0x0003)], 0x5C);
    }

    #[test]
    fn ram_starts_erased() {
        let mut bus = make_bus();
        bus.write(0x0010, 0x00).unwrap();
        bus.power();

        assert_eq!(bus.read(0x0010), Ok(0xFF));
        assert_eq!(bus.read(0x07FF), Ok(0xFF));
    }

    #[test]
    fn ppu_registers_mirror_every_eight_bytes() {
        let mut bus = make_bus();
        bus.write(0x2000, 0x80).unwrap();

        assert_eq!(bus.read(0x2008), Ok(0x80));
        assert_eq!(bus.read(0x3FF8), Ok(0x80));
        assert_eq!(bus.ppu.registers[0], 0x80);

        bus.write(0x3FFF, 0x17).unwrap();
        assert_eq!(bus.ppu.registers[7], 0x17);
    }

    #[test]
    fn apu_registers_are_flat() {
        let mut bus = make_bus();
        bus.write(0x4000, 0x3F).unwrap();
        bus.write(0x4017, 0x40).unwrap();

        assert_eq!(bus.apu.registers[0x00], 0x3F);
        assert_eq!(bus.apu.registers[0x17], 0x40);
        assert_eq!(bus.read(0x4017), Ok(0x40));
    }

    #[test]
    fn gap_between_io_and_cartridge_is_unmapped() {
        let mut bus = make_bus();

        for addr in [0x4018, 0x5000, 0x6000, 0x7FFF] {
            assert_eq!(
                bus.read(addr),
                Err(BusError::Unmapped {
                    addr,
                    access: Access::Read
                })
            );
            assert_eq!(
                bus.write(addr, 0),
                Err(BusError::Unmapped {
                    addr,
                    access: Access::Write
                })
            );
        }
    }

    #[test]
    fn cartridge_space_goes_to_mapper() {
        let mut bus = make_bus();

        assert_eq!(bus.read(0x8000), Ok(0xEA));
        assert_eq!(bus.read(0xFFFD), Ok(0x80));
        assert_eq!(bus.write(0x8000, 0x00), Ok(()));
        assert_eq!(bus.read(0x8000), Ok(0xEA));
    }

    #[test]
    fn oam_dma_copies_a_ram_page() {
        let mut bus = make_bus();
        for i in 0..=0xFFu16 {
            bus.write(0x0200 + i, i as u8).unwrap();
        }

        bus.write(OAM_DMA, 0x02).unwrap();

        assert_eq!(bus.ppu.oam[0x00], 0x00);
        assert_eq!(bus.ppu.oam[0x7F], 0x7F);
        assert_eq!(bus.ppu.oam[0xFF], 0xFF);
    }

    #[test]
    fn oam_dma_from_unmapped_page_faults() {
        let mut bus = make_bus();

        assert_eq!(
            bus.write(OAM_DMA, 0x50),
            Err(BusError::Unmapped {
                addr: 0x5000,
                access: Access::Read
            })
        );
    }

    #[test]
    fn swapping_the_mapper_changes_cartridge_space() {
        let mut bus = make_bus();
        let other = Mapper0::new(vec![0x60; 0x4000], Vec::new(), Mirroring::Vertical).unwrap();

        let old = bus.swap_mapper(Box::new(other));

        assert_eq!(old.read(0x8000), Ok(0xEA));
        assert_eq!(bus.read(0x8000), Ok(0x60));
        assert_eq!(bus.mapper().mirroring(), Mirroring::Vertical);
    }

    #[test]
    fn nmi_is_consumed_once() {
        let mut bus = make_bus();
        bus.ppu.raise_nmi();

        assert!(bus.poll_nmi());
        assert!(!bus.poll_nmi());
    }
}
