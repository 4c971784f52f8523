//! Grade symbols and the grade-point scale.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A course outcome as printed on the transcript.
///
/// | Grade | Points | Passed |
/// |-------|--------|--------|
/// | AA    | 4      | yes    |
/// | A     | 3      | yes    |
/// | B     | 2      | yes    |
/// | C     | 1      | yes    |
/// | D     | 0      | no     |
/// | E     | 0      | no     |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Grade {
    E,
    D,
    C,
    B,
    A,
    AA,
}

impl Grade {
    /// Report column order, best grade first.
    pub const ALL: [Grade; 6] = [Grade::AA, Grade::A, Grade::B, Grade::C, Grade::D, Grade::E];

    pub fn point(self) -> u32 {
        match self {
            Grade::E | Grade::D => 0,
            Grade::C => 1,
            Grade::B => 2,
            Grade::A => 3,
            Grade::AA => 4,
        }
    }

    pub fn is_passed(self) -> bool {
        self.point() > 0
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Grade::E => "E",
            Grade::D => "D",
            Grade::C => "C",
            Grade::B => "B",
            Grade::A => "A",
            Grade::AA => "AA",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown grade symbol: {0:?}")]
pub struct UnknownGrade(pub String);

impl FromStr for Grade {
    type Err = UnknownGrade;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "E" => Ok(Grade::E),
            "D" => Ok(Grade::D),
            "C" => Ok(Grade::C),
            "B" => Ok(Grade::B),
            "A" => Ok(Grade::A),
            "AA" => Ok(Grade::AA),
            other => Err(UnknownGrade(other.to_string())),
        }
    }
}
