//! Fundamental data types used throughout bftape

use std::{
    fmt::Display,
    num::Wrapping,
    ops::{AddAssign, Sub, SubAssign},
};
use thiserror::Error;

/// Error type for TapeAddr operations
#[derive(Debug, Clone, Copy, Error, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum TapeAddrError {
    /// The data pointer moved before the first cell.
    #[error("Tape pointer moved too far left (before start of tape)")]
    TapeAddrIsNegative,
    /// The data pointer moved past the last cell.
    #[error("Tape pointer moved too far to the right (past end of tape)")]
    TapeAddrTooLarge,
}

/// Newtype for the data pointer
#[derive(Debug, Clone, Copy, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TapeAddr(pub usize);

impl From<usize> for TapeAddr {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl From<TapeAddr> for usize {
    fn from(value: TapeAddr) -> Self {
        value.0
    }
}

impl Display for TapeAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A tape cell (i16 with wrapping semantics).
#[derive(Debug, Clone, Copy, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Cell(Wrapping<i16>);

impl Cell {
    pub const ZERO: Cell = Cell(Wrapping(0));

    pub fn is_zero(&self) -> bool {
        self.0 .0 == 0
    }

    /// The byte written by an output instruction (low 8 bits).
    pub fn low_byte(&self) -> u8 {
        self.0 .0 as u8
    }
}

impl AddAssign for Cell {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Cell {
    type Output = Cell;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Cell {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl From<i16> for Cell {
    fn from(value: i16) -> Self {
        Self(Wrapping(value))
    }
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Self(Wrapping(value as i16))
    }
}

impl From<u8> for Cell {
    fn from(value: u8) -> Self {
        Self(Wrapping(value as i16))
    }
}

impl From<Cell> for i16 {
    fn from(value: Cell) -> Self {
        value.0 .0
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
