//! Shared domain enums

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Country
// ---------------------------------------------------------------------------

/// Author country of origin
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i16)]
pub enum Country {
    #[default]
    Unknown = 0,
    Russia = 1,
    Usa = 2,
    England = 3,
    France = 4,
    Germany = 5,
}

impl From<i16> for Country {
    fn from(v: i16) -> Self {
        match v {
            1 => Country::Russia,
            2 => Country::Usa,
            3 => Country::England,
            4 => Country::France,
            5 => Country::Germany,
            _ => Country::Unknown,
        }
    }
}

impl From<Country> for i16 {
    fn from(c: Country) -> Self {
        c as i16
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Country::Unknown => "Unknown",
            Country::Russia => "Russia",
            Country::Usa => "USA",
            Country::England => "England",
            Country::France => "France",
            Country::Germany => "Germany",
        };
        write!(f, "{}", label)
    }
}
