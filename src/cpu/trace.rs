//! Per-step diagnostic record.
//!
//! `step` returns a `StepTrace` for every retired instruction. Its `Display` is a
//! nestest-style line, without the cycle and PPU columns:
//!
//! ```text
//! C000  4C F5 C5  JMP $C5F5                       A:00 X:00 Y:00 P:24 SP:FD
//! ```

use std::fmt;

use crate::cpu::{addressing::AddressingMode, opcodes::Instruction, registers::Registers};

/// The operand bytes consumed by one instruction (0 to 2).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OperandBytes {
    bytes: [u8; 2],
    len: u8,
}

impl OperandBytes {
    pub fn push(&mut self, byte: u8) {
        if let Some(slot) = self.bytes.get_mut(self.len as usize) {
            *slot = byte;
            self.len += 1;
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    Nmi,
    Irq,
}

impl fmt::Display for Interrupt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Interrupt::Nmi => f.write_str("NMI"),
            Interrupt::Irq => f.write_str("IRQ"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepTrace {
    /// Address of the opcode. After an interrupt this is the handler's first byte.
    pub pc: u16,
    pub opcode: u8,
    pub operand: OperandBytes,
    /// `None` for an undocumented opcode run as a NOP.
    pub instruction: Option<Instruction>,
    /// Registers just before the opcode was fetched.
    pub before: Registers,
    pub interrupt: Option<Interrupt>,
}

impl StepTrace {
    /// Bytes the instruction occupied, opcode included. An undocumented opcode is one byte.
    pub fn len(&self) -> u16 {
        self.instruction.map_or(1, Instruction::len)
    }

    fn write_operand(&self, f: &mut fmt::Formatter, mode: AddressingMode) -> fmt::Result {
        let bytes = self.operand.as_slice();
        let byte = bytes.first().copied().unwrap_or(0);
        let word = match bytes {
            [lo, hi] => u16::from_le_bytes([*lo, *hi]),
            _ => byte as u16,
        };

        match mode {
            AddressingMode::Implied => Ok(()),
            AddressingMode::Accumulator => f.write_str("A"),
            AddressingMode::Immediate => write!(f, "#${:02X}", byte),
            AddressingMode::ZeroPage => write!(f, "${:02X}", byte),
            AddressingMode::ZeroPageX => write!(f, "${:02X},X", byte),
            AddressingMode::ZeroPageY => write!(f, "${:02X},Y", byte),
            AddressingMode::Absolute => write!(f, "${:04X}", word),
            AddressingMode::AbsoluteX => write!(f, "${:04X},X", word),
            AddressingMode::AbsoluteY => write!(f, "${:04X},Y", word),
            AddressingMode::Indirect => write!(f, "(${:04X})", word),
            AddressingMode::IndexedIndirect => write!(f, "(${:02X},X)", byte),
            AddressingMode::IndirectIndexed => write!(f, "(${:02X}),Y", byte),
            AddressingMode::Relative => {
                let target = self.pc.wrapping_add(2).wrapping_add(byte as i8 as u16);
                write!(f, "${:04X}", target)
            }
        }
    }
}

impl fmt::Display for StepTrace {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut raw = format!("{:02X}", self.opcode);
        for byte in self.operand.as_slice() {
            raw.push_str(&format!(" {:02X}", byte));
        }

        let mut disasm = match self.instruction {
            Some(instruction) => {
                let mut text = instruction.mnemonic.to_string();
                let operand = OperandText {
                    trace: self,
                    mode: instruction.mode,
                }
                .to_string();
                if !operand.is_empty() {
                    text.push(' ');
                    text.push_str(&operand);
                }
                text
            }
            None => "*NOP".to_string(),
        };
        if let Some(interrupt) = self.interrupt {
            disasm.push_str(&format!(" [{}]", interrupt));
        }

        write!(f, "{:04X}  {:<8}  {:<30}  {}", self.pc, raw, disasm, self.before)
    }
}

struct OperandText<'a> {
    trace: &'a StepTrace,
    mode: AddressingMode,
}

impl fmt::Display for OperandText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.trace.write_operand(f, self.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::{flags::Status, opcodes::decode};

    fn trace(pc: u16, opcode: u8, bytes: &[u8]) -> StepTrace {
        let mut operand = OperandBytes::default();
        for &byte in bytes {
            operand.push(byte);
        }
        StepTrace {
            pc,
            opcode,
            operand,
            instruction: decode(opcode),
            before: Registers {
                pc,
                sp: 0xFD,
                status: Status::from_byte(0x24),
                ..Default::default()
            },
            interrupt: None,
        }
    }

    #[test]
    fn operand_bytes_hold_at_most_two() {
        let mut operand = OperandBytes::default();
        operand.push(1);
        operand.push(2);
        operand.push(3);
        assert_eq!(operand.as_slice(), &[1, 2]);

        operand.clear();
        assert!(operand.as_slice().is_empty());
    }

    #[test]
    fn renders_absolute_jump() {
        let line = trace(0xC000, 0x4C, &[0xF5, 0xC5]).to_string();

        assert!(line.starts_with("C000  4C F5 C5  JMP $C5F5"));
        assert!(line.ends_with("A:00 X:00 Y:00 P:24 SP:FD"));
    }

    #[test]
    fn renders_each_operand_shape() {
        let cases: [(u8, &[u8], &str); 8] = [
            (0xA9, &[0x42], "LDA #$42"),
            (0xB6, &[0x10], "LDX $10,Y"),
            (0x0A, &[], "ASL A"),
            (0xEA, &[], "NOP"),
            (0x6C, &[0xFF, 0x02], "JMP ($02FF)"),
            (0xA1, &[0x80], "LDA ($80,X)"),
            (0x91, &[0x80], "STA ($80),Y"),
            (0x02, &[], "*NOP"),
        ];

        for (opcode, bytes, text) in cases {
            let line = trace(0x8000, opcode, bytes).to_string();
            assert!(line.contains(text), "{line:?} should contain {text:?}");
        }
    }

    #[test]
    fn relative_operand_shows_target() {
        assert!(trace(0x8000, 0xD0, &[0xFE]).to_string().contains("BNE $8000"));
        assert!(trace(0x8000, 0xF0, &[0x10]).to_string().contains("BEQ $8012"));
    }

    #[test]
    fn interrupt_is_tagged() {
        let mut step = trace(0x9000, 0xEA, &[]);
        step.interrupt = Some(Interrupt::Nmi);

        assert!(step.to_string().contains("NOP [NMI]"));
    }

    #[test]
    fn len_counts_opcode_and_operands() {
        assert_eq!(trace(0x8000, 0xEA, &[]).len(), 1);
        assert_eq!(trace(0x8000, 0xA9, &[0x01]).len(), 2);
        assert_eq!(trace(0x8000, 0x8D, &[0x00, 0x02]).len(), 3);
        assert_eq!(trace(0x8000, 0x00, &[]).len(), 2);
        assert_eq!(trace(0x8000, 0x02, &[]).len(), 1);
    }
}
