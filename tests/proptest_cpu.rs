//! Property-based tests for CPU invariants.

use proptest::prelude::*;
use ricoh::{
    bus::{Bus, BusError},
    cpu::{
        addressing::AddressingMode,
        cpu::CPU,
        flags::Status,
        opcodes::{Mnemonic, OPCODE_TABLE},
    },
};

/// 64 KiB of plain RAM, reset vector at $8000.
struct FlatBus {
    mem: Vec<u8>,
}

impl FlatBus {
    fn new() -> Self {
        let mut mem = vec![0; 0x10000];
        mem[0xFFFC] = 0x00;
        mem[0xFFFD] = 0x80;
        Self { mem }
    }
}

impl Bus for FlatBus {
    fn read(&mut self, addr: u16) -> Result<u8, BusError> {
        Ok(self.mem[addr as usize])
    }

    fn write(&mut self, addr: u16, data: u8) -> Result<(), BusError> {
        self.mem[addr as usize] = data;
        Ok(())
    }
}

fn setup_cpu(program: &[u8]) -> CPU<FlatBus> {
    let mut bus = FlatBus::new();
    bus.mem[0x8000..0x8000 + program.len()].copy_from_slice(program);
    let mut cpu = CPU::new(bus);
    cpu.power().unwrap();
    cpu
}

/// Opcodes that leave PC to the loop (no branches, jumps, calls or returns).
fn straight_line_opcodes() -> Vec<u8> {
    OPCODE_TABLE
        .iter()
        .enumerate()
        .filter(|(_, entry)| {
            entry.is_some_and(|instruction| {
                instruction.mode != AddressingMode::Relative
                    && !matches!(
                        instruction.mnemonic,
                        Mnemonic::JMP
                            | Mnemonic::JSR
                            | Mnemonic::RTS
                            | Mnemonic::RTI
                            | Mnemonic::BRK
                    )
            })
        })
        .map(|(opcode, _)| opcode as u8)
        .collect()
}

// ========== Stack ==========

proptest! {
    /// Property: pull16 returns what push16 stored and SP ends where it started
    #[test]
    fn prop_push16_pull16_round_trip(value in any::<u16>(), sp in any::<u8>()) {
        let mut cpu = setup_cpu(&[]);
        cpu.regs.sp = sp;

        cpu.push16(value).unwrap();
        prop_assert_eq!(cpu.regs.sp, sp.wrapping_sub(2));

        let pulled = cpu.pull16().unwrap();
        prop_assert_eq!(pulled, value);
        prop_assert_eq!(cpu.regs.sp, sp);
    }

    /// Property: bytes come back in reverse order of pushing
    #[test]
    fn prop_stack_is_lifo(bytes in prop::collection::vec(any::<u8>(), 1..64)) {
        let mut cpu = setup_cpu(&[]);

        for &byte in &bytes {
            cpu.push8(byte).unwrap();
        }
        for &byte in bytes.iter().rev() {
            prop_assert_eq!(cpu.pull8().unwrap(), byte);
        }
        prop_assert_eq!(cpu.regs.sp, 0xFD);
    }
}

// ========== ALU ==========

proptest! {
    /// Property: SBC with the complementary carry undoes ADC
    #[test]
    fn prop_sbc_inverts_adc(
        a in any::<u8>(),
        m in any::<u8>(),
        carry in any::<bool>()
    ) {
        let mut cpu = setup_cpu(&[
            0x69, m, // ADC #m
            0xE9, m, // SBC #m
        ]);
        cpu.regs.a = a;
        cpu.regs.status.carry = carry;

        cpu.step().unwrap();
        cpu.regs.status.carry = !carry;
        cpu.step().unwrap();

        prop_assert_eq!(cpu.regs.a, a);
    }

    /// Property: ADC overflow is set exactly when the signed sum leaves -128..=127
    #[test]
    fn prop_adc_overflow_matches_signed_range(
        a in any::<u8>(),
        m in any::<u8>(),
        carry in any::<bool>()
    ) {
        let mut cpu = setup_cpu(&[0x69, m]); // ADC #m
        cpu.regs.a = a;
        cpu.regs.status.carry = carry;

        cpu.step().unwrap();

        let signed = a as i8 as i16 + m as i8 as i16 + carry as i16;
        let unsigned = a as u16 + m as u16 + carry as u16;
        prop_assert_eq!(cpu.regs.status.overflow, !(-128..=127).contains(&signed));
        prop_assert_eq!(cpu.regs.status.carry, unsigned > 0xFF);
        prop_assert_eq!(cpu.regs.a, unsigned as u8);
        prop_assert_eq!(cpu.regs.status.zero, unsigned as u8 == 0);
        prop_assert_eq!(cpu.regs.status.negative, unsigned & 0x80 != 0);
    }

    /// Property: SBC overflow is set exactly when the signed difference leaves -128..=127
    #[test]
    fn prop_sbc_overflow_matches_signed_range(
        a in any::<u8>(),
        m in any::<u8>(),
        carry in any::<bool>()
    ) {
        let mut cpu = setup_cpu(&[0xE9, m]); // SBC #m
        cpu.regs.a = a;
        cpu.regs.status.carry = carry;

        cpu.step().unwrap();

        let signed = a as i8 as i16 - m as i8 as i16 - (!carry) as i16;
        prop_assert_eq!(cpu.regs.status.overflow, !(-128..=127).contains(&signed));
        prop_assert_eq!(cpu.regs.status.carry, a as i16 - m as i16 - (!carry) as i16 >= 0);
    }

    /// Property: CMP sets C on >=, Z on ==, N from bit 7 of the difference
    #[test]
    fn prop_cmp_flags(a in any::<u8>(), m in any::<u8>()) {
        let mut cpu = setup_cpu(&[0xC9, m]); // CMP #m
        cpu.regs.a = a;

        cpu.step().unwrap();

        prop_assert_eq!(cpu.regs.status.carry, a >= m);
        prop_assert_eq!(cpu.regs.status.zero, a == m);
        prop_assert_eq!(cpu.regs.status.negative, a.wrapping_sub(m) & 0x80 != 0);
        prop_assert_eq!(cpu.regs.a, a);
    }
}

// ========== Addressing ==========

proptest! {
    /// Property: a taken branch lands at next-PC plus the signed offset
    #[test]
    fn prop_branch_reach(offset in any::<i8>()) {
        let mut cpu = setup_cpu(&[0xB0, offset as u8]); // BCS offset
        cpu.regs.status.carry = true;

        cpu.step().unwrap();

        prop_assert_eq!(cpu.regs.pc, (0x8002i32 + offset as i32) as u16);
    }

    /// Property: zero page,X never leaves page zero
    #[test]
    fn prop_zero_page_x_wraps(base in any::<u8>(), x in any::<u8>(), value in any::<u8>()) {
        let mut cpu = setup_cpu(&[0xB5, base]); // LDA base,X
        let effective = base.wrapping_add(x) as usize;
        cpu.bus.mem[effective] = value;
        cpu.regs.x = x;

        cpu.step().unwrap();

        prop_assert_eq!(cpu.regs.a, value);
    }

    /// Property: straight-line instructions advance PC by their length
    #[test]
    fn prop_pc_advances_by_instruction_length(
        opcode in prop::sample::select(straight_line_opcodes()),
        operand1 in any::<u8>(),
        operand2 in any::<u8>(),
    ) {
        let mut cpu = setup_cpu(&[opcode, operand1, operand2]);
        let len = OPCODE_TABLE[opcode as usize].map(|instruction| instruction.len());

        let step = cpu.step().unwrap();

        prop_assert_eq!(Some(step.len()), len);
        prop_assert_eq!(Some(cpu.regs.pc), len.map(|len| 0x8000 + len));
    }
}

// ========== Status byte ==========

proptest! {
    /// Property: unpacking then packing a status byte only forces bit 5
    #[test]
    fn prop_status_byte_round_trip(p in any::<u8>()) {
        prop_assert_eq!(Status::from_byte(p).to_byte(), p | 0x20);
    }

    /// Property: PHP then PLP restores every flag
    #[test]
    fn prop_php_plp_restores_flags(p in any::<u8>()) {
        let mut cpu = setup_cpu(&[
            0x08, // PHP
            0xA9, 0x00, // LDA #$00
            0x28, // PLP
        ]);
        let status = Status::from_byte(p);
        cpu.regs.status = status;

        cpu.step().unwrap();
        cpu.step().unwrap();
        cpu.step().unwrap();

        prop_assert_eq!(cpu.regs.status, Status { brk: true, ..status });
    }
}
