//! NES mappers for PRG/CHR memory mapping.
//!
//! Mapper trait, Mapper0 (NROM) reference implementation, and common types.

use std::fmt;

/// Nametable mirroring mode for PPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
}

/// Failures raised by a mapper, either while building it from PRG/CHR images or while
/// serving an access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapperError {
    /// The address is outside the window this mapper serves.
    OutOfRange { addr: u16 },
    /// PRG image length the mapper cannot lay out.
    BadPrgSize { len: usize },
    /// CHR image length the mapper cannot lay out.
    BadChrSize { len: usize },
}

impl fmt::Display for MapperError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MapperError::OutOfRange { addr } => {
                write!(f, "address ${:04X} is outside the mapper window", addr)
            }
            MapperError::BadPrgSize { len } => {
                write!(f, "unsupported PRG ROM size: {} bytes", len)
            }
            MapperError::BadChrSize { len } => {
                write!(f, "unsupported CHR size: {} bytes", len)
            }
        }
    }
}

impl std::error::Error for MapperError {}

pub mod mapper;

pub mod mapper0;
