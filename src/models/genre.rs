//! Genre model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Genre row, identified by name
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

impl PartialEq for Genre {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Genre {}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Genre to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGenre {
    pub name: String,
}

impl NewGenre {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
