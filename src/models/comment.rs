//! Comment model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Reader comment attached to one or more books
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: i32,
    /// Handle of the person who wrote the comment
    pub author: String,
    pub text: String,
    /// Names of the commented books
    pub books: Vec<String>,
}

impl PartialEq for Comment {
    fn eq(&self, other: &Self) -> bool {
        self.author == other.author && self.text == other.text
    }
}

impl Eq for Comment {}

impl std::fmt::Display for Comment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.author, self.text)
    }
}

/// Comment to be inserted, linked to books by id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub author: String,
    pub text: String,
    pub book_ids: Vec<i32>,
}
