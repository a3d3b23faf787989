//! Flow direction shared by a group and its categories.

use std::{fmt, str::FromStr};

use crate::EngineError;

/// Whether money enters (`In`) or leaves (`Out`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Flow {
    In,
    Out,
}

impl Flow {
    /// Canonical token, also used as the stored representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::In => "In",
            Self::Out => "Out",
        }
    }

    /// Parses the canonical token. Matching is exact: `"in"` is rejected.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "In" => Some(Self::In),
            "Out" => Some(Self::Out),
            _ => None,
        }
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Flow {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value).ok_or_else(|| EngineError::InvalidFlow(value.to_string()))
    }
}

impl FromStr for Flow {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}
