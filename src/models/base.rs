use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OrderError;

/// The bread/grain base of a thali.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Base {
    /// Five rotis.
    #[default]
    Roti,
    /// Three rotis and rice.
    Combo,
    /// Rice only.
    Rice,
}

impl Base {
    pub const ALL: [Base; 3] = [Base::Roti, Base::Combo, Base::Rice];

    /// Stable identifier used in persisted drafts and order payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Base::Roti => "roti",
            Base::Combo => "combo",
            Base::Rice => "rice",
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Base::Roti => "5 Rotis",
            Base::Combo => "3 Rotis + Rice",
            Base::Rice => "Rice Only",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Base::Roti => "Perfect for roti lovers",
            Base::Combo => "Best of both worlds",
            Base::Rice => "For rice enthusiasts",
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Base {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "roti" => Ok(Base::Roti),
            "combo" => Ok(Base::Combo),
            "rice" => Ok(Base::Rice),
            other => Err(OrderError::UnknownBase(other.to_string())),
        }
    }
}
