//! Addressing-mode resolver.
//!
//! While an instruction executes, PC points at its opcode. Resolving a mode steps PC onto
//! each operand byte as it is read, so after `resolve` PC sits on the instruction's last
//! byte and the loop's single `pc += 1` lands on the next opcode.
//! See [6502 addressing modes](https://www.nesdev.org/obelisk-6502-guide/addressing.html).

use crate::{
    bus::{Bus, BusError},
    cpu::cpu::CPU,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    /// JMP only. Carries the page-wrap bug of the real chip.
    Indirect,
    /// `($nn,X)`
    IndexedIndirect,
    /// `($nn),Y`
    IndirectIndexed,
    /// Branches only. Signed offset from the byte after the instruction.
    Relative,
}

impl AddressingMode {
    /// Bytes following the opcode.
    pub fn operand_bytes(self) -> u16 {
        use AddressingMode::*;

        match self {
            Implied | Accumulator => 0,
            Immediate | ZeroPage | ZeroPageX | ZeroPageY | IndexedIndirect | IndirectIndexed
            | Relative => 1,
            Absolute | AbsoluteX | AbsoluteY | Indirect => 2,
        }
    }
}

/// What an instruction operates on once its mode is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Implied,
    Accumulator,
    Immediate(u8),
    /// Effective address. For `Relative` this is the branch target.
    Address(u16),
}

impl<B: Bus> CPU<B> {
    /// Step PC onto the next instruction byte and read it.
    fn next_operand_byte(&mut self) -> Result<u8, BusError> {
        self.regs.pc = self.regs.pc.wrapping_add(1);
        let byte = self.bus.read(self.regs.pc)?;
        self.operand.push(byte);
        Ok(byte)
    }

    fn next_operand_word(&mut self) -> Result<u16, BusError> {
        let lo = self.next_operand_byte()? as u16;
        let hi = self.next_operand_byte()? as u16;
        Ok((hi << 8) | lo)
    }

    /// Little-endian pointer in zero page. The high byte wraps to $00, never $0100.
    fn read_zero_page_word(&mut self, ptr: u8) -> Result<u16, BusError> {
        let lo = self.bus.read(ptr as u16)? as u16;
        let hi = self.bus.read(ptr.wrapping_add(1) as u16)? as u16;
        Ok((hi << 8) | lo)
    }

    pub(super) fn resolve(&mut self, mode: AddressingMode) -> Result<Operand, BusError> {
        let operand = match mode {
            AddressingMode::Implied => Operand::Implied,
            AddressingMode::Accumulator => Operand::Accumulator,
            AddressingMode::Immediate => Operand::Immediate(self.next_operand_byte()?),
            AddressingMode::ZeroPage => Operand::Address(self.next_operand_byte()? as u16),
            AddressingMode::ZeroPageX => {
                let base = self.next_operand_byte()?;
                Operand::Address(base.wrapping_add(self.regs.x) as u16)
            }
            AddressingMode::ZeroPageY => {
                let base = self.next_operand_byte()?;
                Operand::Address(base.wrapping_add(self.regs.y) as u16)
            }
            AddressingMode::Absolute => Operand::Address(self.next_operand_word()?),
            AddressingMode::AbsoluteX => {
                let base = self.next_operand_word()?;
                Operand::Address(base.wrapping_add(self.regs.x as u16))
            }
            AddressingMode::AbsoluteY => {
                let base = self.next_operand_word()?;
                Operand::Address(base.wrapping_add(self.regs.y as u16))
            }
            AddressingMode::Indirect => {
                let ptr = self.next_operand_word()?;
                let lo = self.bus.read(ptr)? as u16;
                // $xxFF reads its high byte from $xx00, not the next page
                let hi_addr = (ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF);
                let hi = self.bus.read(hi_addr)? as u16;
                Operand::Address((hi << 8) | lo)
            }
            AddressingMode::IndexedIndirect => {
                let zp = self.next_operand_byte()?;
                let ptr = zp.wrapping_add(self.regs.x);
                Operand::Address(self.read_zero_page_word(ptr)?)
            }
            AddressingMode::IndirectIndexed => {
                let zp = self.next_operand_byte()?;
                let base = self.read_zero_page_word(zp)?;
                Operand::Address(base.wrapping_add(self.regs.y as u16))
            }
            AddressingMode::Relative => {
                let offset = self.next_operand_byte()? as i8;
                // PC is on the offset byte; the loop adds the final +1
                Operand::Address(self.regs.pc.wrapping_add(offset as u16))
            }
        };

        Ok(operand)
    }
}
