//! PPU register window as seen from the CPU bus.
//!
//! The bus folds $2000–$3FFF down to a register index 0–7 before calling in. `PpuRegisters`
//! is a plain latch device: every register reads back the last value written, which is what
//! a CPU-core test harness needs without any rendering behind it.

/// OAM (Object Attribute Memory): 64 sprites × 4 bytes. Each entry: Y, tile, attr, X.
pub const OAM_LEN: usize = 256;

/// PPUCTRL..PPUDATA.
pub const REGISTER_COUNT: usize = 8;

/// The picture device as reached through the CPU bus.
pub trait PictureDevice {
    /// Read register `index` (0–7).
    fn read_register(&mut self, index: u8) -> u8;
    /// Write register `index` (0–7).
    fn write_register(&mut self, index: u8, data: u8);

    /// Receive one page copied by OAM DMA ($4014).
    fn oam_dma(&mut self, _page: &[u8; OAM_LEN]) {}

    /// Consume a pending vblank NMI.
    fn poll_nmi(&mut self) -> bool {
        false
    }
}

/// Register-latch picture device.
pub struct PpuRegisters {
    pub registers: [u8; REGISTER_COUNT],
    /// OAM: 64 sprites × 4 bytes (Y, tile, attr, X). Filled by $4014 DMA.
    pub oam: [u8; OAM_LEN],
    /// Pending NMI; set by the harness, consumed by the CPU at an instruction boundary.
    pub nmi: bool,
}

impl PpuRegisters {
    pub fn new() -> Self {
        Self {
            registers: [0; REGISTER_COUNT],
            oam: [0; OAM_LEN],
            nmi: false,
        }
    }

    /// Raise the NMI line (vblank in a full PPU).
    pub fn raise_nmi(&mut self) {
        self.nmi = true;
    }
}

impl Default for PpuRegisters {
    fn default() -> Self {
        Self::new()
    }
}

impl PictureDevice for PpuRegisters {
    fn read_register(&mut self, index: u8) -> u8 {
        self.registers[index as usize % REGISTER_COUNT]
    }

    fn write_register(&mut self, index: u8, data: u8) {
        self.registers[index as usize % REGISTER_COUNT] = data;
    }

    fn oam_dma(&mut self, page: &[u8; OAM_LEN]) {
        self.oam.copy_from_slice(page);
    }

    fn poll_nmi(&mut self) -> bool {
        // Consume NMI if raised
        if self.nmi {
            self.nmi = false;
            true
        } else {
            false
        }
    }
}
