//! 6502 processor status register (P).
//!
//! Flags are kept as named booleans; the packed byte only exists when the status is pushed
//! to or pulled from the stack.

pub const FLAG_CARRY: u8 = 1 << 0;
pub const FLAG_ZERO: u8 = 1 << 1;
pub const FLAG_INTERRUPT_DISABLE: u8 = 1 << 2;
pub const FLAG_DECIMAL: u8 = 1 << 3;  // Stored, but the 2A03 has no BCD
pub const FLAG_BREAK: u8 = 1 << 4;
pub const FLAG_UNUSED: u8 = 1 << 5;   // Always 1 when pushed
pub const FLAG_OVERFLOW: u8 = 1 << 6;
pub const FLAG_NEGATIVE: u8 = 1 << 7;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub carry: bool,
    pub zero: bool,
    pub interrupt_disable: bool,
    pub decimal: bool,
    pub brk: bool,
    pub overflow: bool,
    pub negative: bool,
}

impl Status {
    /// Pack into NV1BDIZC order. Bit 5 is always set.
    pub fn to_byte(self) -> u8 {
        let mut p = FLAG_UNUSED;
        for (set, bit) in [
            (self.carry, FLAG_CARRY),
            (self.zero, FLAG_ZERO),
            (self.interrupt_disable, FLAG_INTERRUPT_DISABLE),
            (self.decimal, FLAG_DECIMAL),
            (self.brk, FLAG_BREAK),
            (self.overflow, FLAG_OVERFLOW),
            (self.negative, FLAG_NEGATIVE),
        ] {
            if set {
                p |= bit;
            }
        }
        p
    }

    /// Unpack from NV1BDIZC order. Bit 5 is ignored.
    pub fn from_byte(p: u8) -> Self {
        Self {
            carry: p & FLAG_CARRY != 0,
            zero: p & FLAG_ZERO != 0,
            interrupt_disable: p & FLAG_INTERRUPT_DISABLE != 0,
            decimal: p & FLAG_DECIMAL != 0,
            brk: p & FLAG_BREAK != 0,
            overflow: p & FLAG_OVERFLOW != 0,
            negative: p & FLAG_NEGATIVE != 0,
        }
    }

    /// Byte pushed by PHP and BRK: break bit forced on.
    pub fn pushed_by_instruction(self) -> u8 {
        self.to_byte() | FLAG_BREAK
    }

    /// Byte pushed when servicing NMI/IRQ: break bit forced off.
    pub fn pushed_by_interrupt(self) -> u8 {
        self.to_byte() & !FLAG_BREAK
    }

    pub fn update_zero_and_negative(&mut self, value: u8) {
        self.zero = value == 0;
        self.negative = value & 0x80 != 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_flag_has_its_documented_bit() {
        let cases: [(fn(&mut Status), u8); 7] = [
            (|p| p.carry = true, 0x21),
            (|p| p.zero = true, 0x22),
            (|p| p.interrupt_disable = true, 0x24),
            (|p| p.decimal = true, 0x28),
            (|p| p.brk = true, 0x30),
            (|p| p.overflow = true, 0x60),
            (|p| p.negative = true, 0xA0),
        ];

        for (set, byte) in cases {
            let mut status = Status::default();
            set(&mut status);
            assert_eq!(status.to_byte(), byte);
            assert_eq!(Status::from_byte(byte), status);
        }
    }

    #[test]
    fn unused_bit_is_ignored_on_unpack() {
        assert_eq!(Status::from_byte(0x20), Status::default());
        assert_eq!(Status::from_byte(0xFF).to_byte(), 0xFF);
    }

    #[test]
    fn pushed_bytes_differ_only_in_break() {
        let status = Status {
            carry: true,
            negative: true,
            ..Default::default()
        };

        assert_eq!(status.pushed_by_instruction(), 0xB1);
        assert_eq!(status.pushed_by_interrupt(), 0xA1);
    }

    #[test]
    fn zero_and_negative_are_both_rewritten() {
        let mut status = Status {
            zero: true,
            negative: true,
            ..Default::default()
        };

        status.update_zero_and_negative(0x01);
        assert!(!status.zero);
        assert!(!status.negative);

        status.update_zero_and_negative(0x80);
        assert!(!status.zero);
        assert!(status.negative);

        status.update_zero_and_negative(0x00);
        assert!(status.zero);
        assert!(!status.negative);
    }
}
