//! The fixed size tape of the virtual machine

use crate::{settings::PointerPolicy, Cell, TapeAddr, TapeAddrError};

/// A tape implemented with a Vec that never grows or shrinks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    data: Vec<Cell>,
    policy: PointerPolicy,
}

impl Tape {
    /// Create a zeroed tape of `size` cells.
    pub fn new(size: usize, policy: PointerPolicy) -> Self {
        Self {
            data: vec![Cell::ZERO; size],
            policy,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.data
    }

    pub fn get(&self, addr: TapeAddr) -> Cell {
        self.try_get(addr).unwrap_or_default()
    }

    pub fn try_get(&self, addr: TapeAddr) -> Result<Cell, TapeAddrError> {
        self.data
            .get(usize::from(addr))
            .copied()
            .ok_or(TapeAddrError::TapeAddrTooLarge)
    }

    pub fn try_set(&mut self, addr: TapeAddr, value: Cell) -> Result<(), TapeAddrError> {
        let cell = self
            .data
            .get_mut(usize::from(addr))
            .ok_or(TapeAddrError::TapeAddrTooLarge)?;
        *cell = value;
        Ok(())
    }

    pub fn try_modify(&mut self, addr: TapeAddr, diff: Cell) -> Result<(), TapeAddrError> {
        let cell = self
            .data
            .get_mut(usize::from(addr))
            .ok_or(TapeAddrError::TapeAddrTooLarge)?;
        *cell += diff;
        Ok(())
    }

    /// Move the pointer one cell to the right, applying the pointer policy.
    pub fn right(&self, addr: TapeAddr) -> Result<TapeAddr, TapeAddrError> {
        let next = addr.0 + 1;
        if next < self.len() {
            Ok(next.into())
        } else {
            match self.policy {
                PointerPolicy::Fault => Err(TapeAddrError::TapeAddrTooLarge),
                PointerPolicy::Wrap => Ok(TapeAddr(0)),
            }
        }
    }

    /// Move the pointer one cell to the left, applying the pointer policy.
    pub fn left(&self, addr: TapeAddr) -> Result<TapeAddr, TapeAddrError> {
        match addr.0.checked_sub(1) {
            Some(prev) => Ok(prev.into()),
            None => match self.policy {
                PointerPolicy::Fault => Err(TapeAddrError::TapeAddrIsNegative),
                PointerPolicy::Wrap => Ok(self.len().saturating_sub(1).into()),
            },
        }
    }
}
