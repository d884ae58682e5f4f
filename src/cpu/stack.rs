//! Stack unit: the descending stack in page $01.
//!
//! SP wraps silently in both directions, as on hardware.

use crate::{
    bus::{Bus, BusError},
    cpu::cpu::CPU,
};

pub const STACK_PAGE: u16 = 0x0100;

impl<B: Bus> CPU<B> {
    pub fn push8(&mut self, value: u8) -> Result<(), BusError> {
        self.bus.write(STACK_PAGE | self.regs.sp as u16, value)?;
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        Ok(())
    }

    /// High byte first, so the word sits little-endian in memory.
    pub fn push16(&mut self, value: u16) -> Result<(), BusError> {
        self.push8((value >> 8) as u8)?;
        self.push8(value as u8)
    }

    pub fn pull8(&mut self) -> Result<u8, BusError> {
        self.regs.sp = self.regs.sp.wrapping_add(1);
        let addr = STACK_PAGE | self.regs.sp as u16;
        let value = self.bus.read(addr)?;
        if self.config.clear_pulled_stack {
            self.bus.write(addr, 0)?;
        }
        Ok(value)
    }

    pub fn pull16(&mut self) -> Result<u16, BusError> {
        let lo = self.pull8()? as u16;
        let hi = self.pull8()? as u16;
        Ok((hi << 8) | lo)
    }
}
