//! Instruction executor.
//!
//! One arm per mnemonic. Operands come from the resolver; flags are touched only where
//! the hardware touches them.
//! See [6502 instruction reference](https://www.nesdev.org/obelisk-6502-guide/reference.html).

use crate::{
    bus::Bus,
    cpu::{
        addressing::Operand,
        cpu::{CPU, IRQ_VECTOR},
        fault::FaultKind,
        flags::Status,
        opcodes::{Instruction, Mnemonic::*},
    },
};

impl<B: Bus> CPU<B> {
    pub(super) fn execute(&mut self, instruction: Instruction) -> Result<(), FaultKind> {
        let operand = self.resolve(instruction.mode)?;

        match instruction.mnemonic {
            LDA => {
                self.regs.a = self.load(instruction, operand)?;
                self.regs.status.update_zero_and_negative(self.regs.a);
            }
            LDX => {
                self.regs.x = self.load(instruction, operand)?;
                self.regs.status.update_zero_and_negative(self.regs.x);
            }
            LDY => {
                self.regs.y = self.load(instruction, operand)?;
                self.regs.status.update_zero_and_negative(self.regs.y);
            }

            STA => self.store(instruction, operand, self.regs.a)?,
            STX => self.store(instruction, operand, self.regs.x)?,
            STY => self.store(instruction, operand, self.regs.y)?,

            TAX => {
                self.regs.x = self.regs.a;
                self.regs.status.update_zero_and_negative(self.regs.x);
            }
            TAY => {
                self.regs.y = self.regs.a;
                self.regs.status.update_zero_and_negative(self.regs.y);
            }
            TSX => {
                self.regs.x = self.regs.sp;
                self.regs.status.update_zero_and_negative(self.regs.x);
            }
            TXA => {
                self.regs.a = self.regs.x;
                self.regs.status.update_zero_and_negative(self.regs.a);
            }
            TYA => {
                self.regs.a = self.regs.y;
                self.regs.status.update_zero_and_negative(self.regs.a);
            }
            TXS => self.regs.sp = self.regs.x, // no flags

            ADC => {
                let value = self.load(instruction, operand)?;
                self.add_with_carry(value);
            }
            SBC => {
                // A - M - !C == A + !M + C
                let value = self.load(instruction, operand)?;
                self.add_with_carry(!value);
            }

            AND => {
                self.regs.a &= self.load(instruction, operand)?;
                self.regs.status.update_zero_and_negative(self.regs.a);
            }
            ORA => {
                self.regs.a |= self.load(instruction, operand)?;
                self.regs.status.update_zero_and_negative(self.regs.a);
            }
            EOR => {
                self.regs.a ^= self.load(instruction, operand)?;
                self.regs.status.update_zero_and_negative(self.regs.a);
            }
            BIT => {
                let value = self.load(instruction, operand)?;
                self.regs.status.zero = self.regs.a & value == 0;
                self.regs.status.negative = value & 0x80 != 0;
                self.regs.status.overflow = value & 0x40 != 0;
            }

            CMP => {
                let value = self.load(instruction, operand)?;
                self.compare(self.regs.a, value);
            }
            CPX => {
                let value = self.load(instruction, operand)?;
                self.compare(self.regs.x, value);
            }
            CPY => {
                let value = self.load(instruction, operand)?;
                self.compare(self.regs.y, value);
            }

            ASL => self.modify(instruction, operand, |p, value| {
                p.carry = value & 0x80 != 0;
                value << 1
            })?,
            LSR => self.modify(instruction, operand, |p, value| {
                p.carry = value & 0x01 != 0;
                value >> 1
            })?,
            ROL => self.modify(instruction, operand, |p, value| {
                let old_carry = p.carry as u8;
                p.carry = value & 0x80 != 0;
                (value << 1) | old_carry
            })?,
            ROR => self.modify(instruction, operand, |p, value| {
                let old_carry = p.carry as u8;
                p.carry = value & 0x01 != 0;
                (value >> 1) | (old_carry << 7)
            })?,
            INC => self.modify(instruction, operand, |_, value| value.wrapping_add(1))?,
            DEC => self.modify(instruction, operand, |_, value| value.wrapping_sub(1))?,

            INX => {
                self.regs.x = self.regs.x.wrapping_add(1);
                self.regs.status.update_zero_and_negative(self.regs.x);
            }
            INY => {
                self.regs.y = self.regs.y.wrapping_add(1);
                self.regs.status.update_zero_and_negative(self.regs.y);
            }
            DEX => {
                self.regs.x = self.regs.x.wrapping_sub(1);
                self.regs.status.update_zero_and_negative(self.regs.x);
            }
            DEY => {
                self.regs.y = self.regs.y.wrapping_sub(1);
                self.regs.status.update_zero_and_negative(self.regs.y);
            }

            BCC => self.branch(instruction, operand, !self.regs.status.carry)?,
            BCS => self.branch(instruction, operand, self.regs.status.carry)?,
            BNE => self.branch(instruction, operand, !self.regs.status.zero)?,
            BEQ => self.branch(instruction, operand, self.regs.status.zero)?,
            BPL => self.branch(instruction, operand, !self.regs.status.negative)?,
            BMI => self.branch(instruction, operand, self.regs.status.negative)?,
            BVC => self.branch(instruction, operand, !self.regs.status.overflow)?,
            BVS => self.branch(instruction, operand, self.regs.status.overflow)?,

            // The loop adds one after every instruction, so jumps land one byte short.
            JMP => {
                let target = self.address(instruction, operand)?;
                self.regs.pc = target.wrapping_sub(1);
            }
            JSR => {
                // PC is on the last byte of the JSR: the hardware's return-1
                let target = self.address(instruction, operand)?;
                self.push16(self.regs.pc)?;
                self.regs.pc = target.wrapping_sub(1);
            }
            RTS => self.regs.pc = self.pull16()?,
            RTI => {
                let p = self.pull8()?;
                self.regs.status = Status::from_byte(p);
                // interrupts push the address of the next opcode itself
                self.regs.pc = self.pull16()?.wrapping_sub(1);
            }
            BRK => {
                // skips the padding byte
                self.push16(self.regs.pc.wrapping_add(instruction.len()))?;
                self.push8(self.regs.status.pushed_by_instruction())?;
                self.regs.status.brk = true;
                self.regs.status.interrupt_disable = true;
                self.regs.pc = self.read_word(IRQ_VECTOR)?.wrapping_sub(1);
            }

            PHA => self.push8(self.regs.a)?,
            PHP => self.push8(self.regs.status.pushed_by_instruction())?,
            PLA => {
                self.regs.a = self.pull8()?;
                self.regs.status.update_zero_and_negative(self.regs.a);
            }
            PLP => {
                let p = self.pull8()?;
                self.regs.status = Status::from_byte(p);
            }

            CLC => self.regs.status.carry = false,
            CLD => self.regs.status.decimal = false,
            CLI => self.regs.status.interrupt_disable = false,
            CLV => self.regs.status.overflow = false,
            SEC => self.regs.status.carry = true,
            SED => self.regs.status.decimal = true,
            SEI => self.regs.status.interrupt_disable = true,

            NOP => {}
        }

        Ok(())
    }

    fn invalid(instruction: Instruction) -> FaultKind {
        FaultKind::InvalidOperand {
            mnemonic: instruction.mnemonic,
            mode: instruction.mode,
        }
    }

    fn load(&mut self, instruction: Instruction, operand: Operand) -> Result<u8, FaultKind> {
        match operand {
            Operand::Immediate(value) => Ok(value),
            Operand::Address(addr) => Ok(self.bus.read(addr)?),
            Operand::Accumulator => Ok(self.regs.a),
            Operand::Implied => Err(Self::invalid(instruction)),
        }
    }

    fn store(
        &mut self,
        instruction: Instruction,
        operand: Operand,
        value: u8,
    ) -> Result<(), FaultKind> {
        let addr = self.address(instruction, operand)?;
        self.bus.write(addr, value)?;
        Ok(())
    }

    fn address(&self, instruction: Instruction, operand: Operand) -> Result<u16, FaultKind> {
        match operand {
            Operand::Address(addr) => Ok(addr),
            _ => Err(Self::invalid(instruction)),
        }
    }

    /// Read-modify-write on A or memory; Z and N follow the result.
    fn modify<F>(
        &mut self,
        instruction: Instruction,
        operand: Operand,
        op: F,
    ) -> Result<(), FaultKind>
    where
        F: FnOnce(&mut Status, u8) -> u8,
    {
        let result = match operand {
            Operand::Accumulator => {
                self.regs.a = op(&mut self.regs.status, self.regs.a);
                self.regs.a
            }
            Operand::Address(addr) => {
                let value = self.bus.read(addr)?;
                let result = op(&mut self.regs.status, value);
                self.bus.write(addr, result)?;
                result
            }
            _ => return Err(Self::invalid(instruction)),
        };

        self.regs.status.update_zero_and_negative(result);
        Ok(())
    }

    /// Binary add of A, `value` and carry. Decimal mode is ignored.
    fn add_with_carry(&mut self, value: u8) {
        let a = self.regs.a;
        let sum = a as u16 + value as u16 + self.regs.status.carry as u16;
        let result = sum as u8;

        self.regs.status.carry = sum > 0xFF;
        // both inputs share a sign the result does not
        self.regs.status.overflow = (!(a ^ value) & (a ^ result)) & 0x80 != 0;
        self.regs.a = result;
        self.regs.status.update_zero_and_negative(result);
    }

    /// N comes from the difference, not from the register.
    fn compare(&mut self, register: u8, value: u8) {
        self.regs.status.carry = register >= value;
        self.regs.status.zero = register == value;
        self.regs.status.negative = register.wrapping_sub(value) & 0x80 != 0;
    }

    fn branch(
        &mut self,
        instruction: Instruction,
        operand: Operand,
        condition: bool,
    ) -> Result<(), FaultKind> {
        let target = self.address(instruction, operand)?;
        if condition {
            self.regs.pc = target;
        }
        Ok(())
    }
}
