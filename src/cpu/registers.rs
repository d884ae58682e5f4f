//! Register file: the whole programmer-visible CPU state.

use std::fmt;

use crate::cpu::flags::Status;

/// PC, SP, A, X, Y and P. `Copy`, so a snapshot is just an assignment.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    pub pc: u16,
    pub sp: u8,
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub status: Status,
}

impl fmt::Display for Registers {
    /// nestest-style: `A:00 X:00 Y:00 P:24 SP:FD`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X}",
            self.a,
            self.x,
            self.y,
            self.status.to_byte(),
            self.sp
        )
    }
}
