//! Author model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::enums::Country;

/// Author row. Identity is the (name, surname) pair; `id` is storage-only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: i32,
    pub name: String,
    pub surname: String,
    #[sqlx(try_from = "i16")]
    pub country: Country,
}

impl PartialEq for Author {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.surname == other.surname
    }
}

impl Eq for Author {}

impl std::fmt::Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name, self.surname)?;
        if self.country != Country::Unknown {
            write!(f, " ({})", self.country)?;
        }
        Ok(())
    }
}

/// Author to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    pub name: String,
    pub surname: String,
    pub country: Country,
}

impl NewAuthor {
    pub fn new(name: impl Into<String>, surname: impl Into<String>, country: Country) -> Self {
        Self {
            name: name.into(),
            surname: surname.into(),
            country,
        }
    }
}
