//! Errors surfaced by `CPU::step` and `CPU::power`.

use std::fmt;

use crate::{
    bus::BusError,
    cpu::{
        addressing::AddressingMode,
        cpu::Stage,
        opcodes::{Mnemonic, OPCODE_TABLE},
        registers::Registers,
        trace::Interrupt,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FaultKind {
    /// A bus access failed (unmapped address or mapper refusal).
    Bus(BusError),
    /// Undocumented opcode under `IllegalOpcodePolicy::Fault`.
    IllegalOpcode(u8),
    /// The instruction needs an operand its mode cannot supply.
    InvalidOperand { mnemonic: Mnemonic, mode: AddressingMode },
}

impl From<BusError> for FaultKind {
    fn from(err: BusError) -> Self {
        FaultKind::Bus(err)
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FaultKind::Bus(err) => write!(f, "{}", err),
            FaultKind::IllegalOpcode(opcode) => write!(f, "illegal opcode ${:02X}", opcode),
            FaultKind::InvalidOperand { mnemonic, mode } => {
                write!(f, "{} has no operand in {:?} mode", mnemonic, mode)
            }
        }
    }
}

/// A step that could not complete.
///
/// `registers` is the state just before the failing opcode was fetched, or before the step
/// if entering an interrupt failed; the CPU has already been rolled back to it. When an
/// interrupt was entered in the same step this is the handler's entry state and
/// `interrupt` names it. Bus writes made before the fault are not undone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuFault {
    pub kind: FaultKind,
    pub stage: Stage,
    /// `None` if the fault happened before the opcode was read.
    pub opcode: Option<u8>,
    pub registers: Registers,
    pub interrupt: Option<Interrupt>,
}

impl CpuFault {
    /// The failing bus address, if this was a bus fault.
    pub fn addr(&self) -> Option<u16> {
        match &self.kind {
            FaultKind::Bus(err) => Some(err.addr()),
            _ => None,
        }
    }
}

impl fmt::Display for CpuFault {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?} fault at PC ${:04X}", self.stage, self.registers.pc)?;
        if let Some(interrupt) = self.interrupt {
            write!(f, " in {} handler", interrupt)?;
        }
        if let Some(opcode) = self.opcode {
            match OPCODE_TABLE[opcode as usize] {
                Some(instruction) => write!(f, " ({} ${:02X})", instruction.mnemonic, opcode)?,
                None => write!(f, " (${:02X})", opcode)?,
            }
        }
        write!(f, ": {} [{}]", self.kind, self.registers)
    }
}

impl std::error::Error for CpuFault {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            FaultKind::Bus(err) => Some(err),
            _ => None,
        }
    }
}
