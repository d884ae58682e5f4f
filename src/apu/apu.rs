//! APU and I/O register window ($4000–$4017) as seen from the CPU bus.
//!
//! Registers $4000–$4013 and $4015 drive the [APU](https://www.nesdev.org/wiki/APU_registers);
//! $4016/$4017 are the controller ports and frame counter. The bus passes `addr - 0x4000`
//! with no mirroring. $4014 (OAM DMA) is intercepted by the bus and never reaches this device.

/// $4000–$4017.
pub const REGISTER_COUNT: usize = 0x18;

/// The audio/IO device as reached through the CPU bus.
pub trait AudioDevice {
    /// Read register `index` (0x00–0x17).
    fn read_register(&mut self, index: u8) -> u8;
    /// Write register `index` (0x00–0x17).
    fn write_register(&mut self, index: u8, data: u8);

    /// Poll the frame-counter / DMC IRQ line.
    fn poll_irq(&mut self) -> bool {
        false
    }
}

/// Register-latch audio device: each register reads back the last value written.
pub struct ApuRegisters {
    pub registers: [u8; REGISTER_COUNT],
    /// Level-triggered IRQ line, held until the harness lowers it.
    pub irq: bool,
}

impl ApuRegisters {
    pub fn new() -> Self {
        Self {
            registers: [0; REGISTER_COUNT],
            irq: false,
        }
    }
}

impl Default for ApuRegisters {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioDevice for ApuRegisters {
    fn read_register(&mut self, index: u8) -> u8 {
        self.registers[index as usize % REGISTER_COUNT]
    }

    fn write_register(&mut self, index: u8, data: u8) {
        self.registers[index as usize % REGISTER_COUNT] = data;
    }

    fn poll_irq(&mut self) -> bool {
        self.irq
    }
}
