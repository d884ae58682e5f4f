use log::{debug, info, trace, warn};

use crate::{
    bus::{Bus, BusError},
    config::{CpuConfig, IllegalOpcodePolicy},
    cpu::{
        fault::{CpuFault, FaultKind},
        opcodes::{self, Instruction},
        registers::Registers,
        trace::{Interrupt, OperandBytes, StepTrace},
    },
};

pub const NMI_VECTOR: u16 = 0xFFFA;
pub const RESET_VECTOR: u16 = 0xFFFC;
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Where a step is, or where the last one stopped.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Servicing interrupts and reading the opcode.
    #[default]
    Fetch,
    /// Looking the opcode up in the table.
    Decode,
    /// Resolving the operand and running the instruction.
    Execute,
}

pub struct CPU<B: Bus> {
    pub regs: Registers,
    pub bus: B,
    pub(super) config: CpuConfig,
    pub(super) operand: OperandBytes,
    opcode: Option<u8>,
    /// NMI edge seen on the bus but not yet entered.
    nmi_pending: bool,
    stage: Stage,
    retired: u64,
}

impl<B: Bus> CPU<B> {
    pub fn new(bus: B) -> Self {
        Self::with_config(bus, CpuConfig::default())
    }

    pub fn with_config(bus: B, config: CpuConfig) -> Self {
        Self {
            regs: Registers::default(),
            bus,
            config,
            operand: OperandBytes::default(),
            opcode: None,
            nmi_pending: false,
            stage: Stage::default(),
            retired: 0,
        }
    }

    pub fn config(&self) -> CpuConfig {
        self.config
    }

    /// `Fetch` after a clean step; the failing stage after a fault.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Instructions executed since power-on.
    pub fn retired(&self) -> u64 {
        self.retired
    }

    /// Cold start: erase work RAM, zero every register, then run the reset sequence.
    pub fn power(&mut self) -> Result<(), CpuFault> {
        self.bus.power();
        self.regs = Registers::default();
        self.nmi_pending = false;
        self.retired = 0;
        self.reset()
    }

    /// Warm reset. PC comes from the reset vector and SP drops by three with nothing
    /// written, as the real sequence runs three suppressed pushes. A, X, Y and RAM survive.
    pub fn reset(&mut self) -> Result<(), CpuFault> {
        let snapshot = self.regs;
        self.stage = Stage::Fetch;
        self.opcode = None;
        self.operand.clear();

        let vector = match self.read_word(RESET_VECTOR) {
            Ok(vector) => vector,
            Err(err) => return Err(self.fault(err.into(), snapshot, None)),
        };

        self.regs.pc = vector;
        self.regs.sp = self.regs.sp.wrapping_sub(3);
        self.regs.status.interrupt_disable = true;

        info!("reset: PC=${:04X} SP=${:02X}", self.regs.pc, self.regs.sp);
        Ok(())
    }

    /// Run exactly one instruction, servicing a pending interrupt first.
    ///
    /// On failure the registers are rolled back to their state before the instruction. An
    /// interrupt entered in this step stays entered: the rollback point is the handler's
    /// first opcode and the fault names the interrupt.
    pub fn step(&mut self) -> Result<StepTrace, CpuFault> {
        let snapshot = self.regs;
        self.stage = Stage::Fetch;
        self.opcode = None;
        self.operand.clear();

        let interrupt = match self.service_interrupt() {
            Ok(interrupt) => interrupt,
            Err(err) => return Err(self.fault(err.into(), snapshot, None)),
        };

        let before = self.regs;
        match self.run_instruction(before, interrupt) {
            Ok(step) => {
                self.stage = Stage::Fetch;
                self.retired += 1;
                trace!("{}", step);
                Ok(step)
            }
            Err(kind) => Err(self.fault(kind, before, interrupt)),
        }
    }

    fn run_instruction(
        &mut self,
        before: Registers,
        interrupt: Option<Interrupt>,
    ) -> Result<StepTrace, FaultKind> {
        let pc = self.regs.pc;
        let opcode = self.bus.read(pc)?;
        self.opcode = Some(opcode);

        self.stage = Stage::Decode;
        let instruction = self.decode(opcode)?;

        self.stage = Stage::Execute;
        if let Some(instruction) = instruction {
            self.execute(instruction)?;
        }
        self.regs.pc = self.regs.pc.wrapping_add(1);

        Ok(StepTrace {
            pc,
            opcode,
            operand: self.operand,
            instruction,
            before,
            interrupt,
        })
    }

    /// `Ok(None)` means an undocumented opcode to be run as a one-byte NOP.
    fn decode(&self, opcode: u8) -> Result<Option<Instruction>, FaultKind> {
        if let Some(instruction) = opcodes::decode(opcode) {
            return Ok(Some(instruction));
        }

        match self.config.illegal_opcodes {
            IllegalOpcodePolicy::Nop => {
                warn!(
                    "undocumented opcode ${:02X} at ${:04X} run as NOP",
                    opcode, self.regs.pc
                );
                Ok(None)
            }
            IllegalOpcodePolicy::Fault => Err(FaultKind::IllegalOpcode(opcode)),
        }
    }

    /// NMI is always taken; IRQ only while interrupt-disable is clear. The NMI edge is
    /// held until its stack frame is fully pushed.
    fn service_interrupt(&mut self) -> Result<Option<Interrupt>, BusError> {
        self.nmi_pending |= self.bus.poll_nmi();

        let interrupt = if self.nmi_pending {
            Interrupt::Nmi
        } else if !self.regs.status.interrupt_disable && self.bus.poll_irq() {
            Interrupt::Irq
        } else {
            return Ok(None);
        };

        let vector = match interrupt {
            Interrupt::Nmi => NMI_VECTOR,
            Interrupt::Irq => IRQ_VECTOR,
        };

        self.push16(self.regs.pc)?;
        self.push8(self.regs.status.pushed_by_interrupt())?;
        self.regs.status.interrupt_disable = true;
        self.regs.pc = self.read_word(vector)?;

        if interrupt == Interrupt::Nmi {
            self.nmi_pending = false;
        }
        Ok(Some(interrupt))
    }

    pub(super) fn read_word(&mut self, addr: u16) -> Result<u16, BusError> {
        let lo = self.bus.read(addr)? as u16;
        let hi = self.bus.read(addr.wrapping_add(1))? as u16;
        Ok((hi << 8) | lo)
    }

    fn fault(
        &mut self,
        kind: FaultKind,
        snapshot: Registers,
        interrupt: Option<Interrupt>,
    ) -> CpuFault {
        self.regs = snapshot;
        let fault = CpuFault {
            kind,
            stage: self.stage,
            opcode: self.opcode,
            registers: snapshot,
            interrupt,
        };
        debug!("{}", fault);
        fault
    }
}
