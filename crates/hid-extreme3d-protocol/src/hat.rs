//! Hat switch direction lookup.
//!
//! The hat reports a single 4-bit position code: 0 is north, codes advance
//! clockwise through the eight directions, and 8 is centered. Codes 9-15
//! never leave a healthy device and are rejected as corruption.

#![deny(static_mut_refs)]

use std::fmt;

use crate::{ProtocolError, ProtocolResult};

/// Position code reported when the hat is at rest.
pub const HAT_CENTERED: u8 = 8;

/// Discrete direction vector for one hat position, components in {-1, 0, 1}.
/// X grows east, Y grows north.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HatVector {
    pub x: i8,
    pub y: i8,
}

/// Direction table indexed by position code, clockwise from north.
const HAT_VECTORS: [HatVector; 9] = [
    HatVector { x: 0, y: 1 },
    HatVector { x: 1, y: 1 },
    HatVector { x: 1, y: 0 },
    HatVector { x: 1, y: -1 },
    HatVector { x: 0, y: -1 },
    HatVector { x: -1, y: -1 },
    HatVector { x: -1, y: 0 },
    HatVector { x: -1, y: 1 },
    HatVector { x: 0, y: 0 },
];

impl HatVector {
    /// Look up the direction vector for a raw hat position code.
    ///
    /// # Errors
    ///
    /// `InvalidHatCode` for codes 9-15.
    pub fn from_code(code: u8) -> ProtocolResult<Self> {
        HAT_VECTORS
            .get(usize::from(code))
            .copied()
            .ok_or(ProtocolError::InvalidHatCode(code))
    }

    pub fn is_centered(self) -> bool {
        self.x == 0 && self.y == 0
    }
}

impl fmt::Display for HatVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
