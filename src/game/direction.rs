//! Move directions.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four directions tiles can slide toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    /// Toward row 0.
    Up = 0,
    /// Toward the last row.
    Down = 1,
    /// Toward column 0.
    Left = 2,
    /// Toward the last column.
    Right = 3,
}

impl Direction {
    /// All four directions, in code order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Numeric code of this direction (0=Up, 1=Down, 2=Left, 3=Right).
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Lowercase name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Whether lines are read from the high index end for this direction.
    pub(crate) const fn is_reversed(self) -> bool {
        matches!(self, Self::Down | Self::Right)
    }

    /// Whether this direction moves tiles along columns.
    pub(crate) const fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for Direction {
    type Error = EngineError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Up),
            1 => Ok(Self::Down),
            2 => Ok(Self::Left),
            3 => Ok(Self::Right),
            _ => Err(EngineError::InvalidDirection {
                input: code.to_string(),
            }),
        }
    }
}

impl FromStr for Direction {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "u" => Ok(Self::Up),
            "down" | "d" => Ok(Self::Down),
            "left" | "l" => Ok(Self::Left),
            "right" | "r" => Ok(Self::Right),
            _ => Err(EngineError::InvalidDirection {
                input: s.to_string(),
            }),
        }
    }
}
