use std::fmt;
use serde::{Serialize, Deserialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Invalid priority {0}. Must be 1, 2 or 3")]
pub struct PriorityError(pub i64);

/// Importance a participant gives to a module. `One` is the most important.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub enum Priority { One = 1, Two = 2, Three = 3 }

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::One, Priority::Two, Priority::Three];

    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    pub const fn index(self) -> usize {
        self as usize - 1
    }
}

impl TryFrom<i64> for Priority {
    type Error = PriorityError;

    fn try_from(v: i64) -> Result<Self, PriorityError> {
        match v {
            1 => Ok(Priority::One),
            2 => Ok(Priority::Two),
            3 => Ok(Priority::Three),
            n => Err(PriorityError(n)),
        }
    }
}

impl From<Priority> for u8 {
    fn from(p: Priority) -> u8 { p.as_u8() }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}
