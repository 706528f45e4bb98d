//! Book model and related types

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};

use super::{author::Author, genre::Genre};

/// Full book with its authors and genre resolved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: i32,
    pub name: String,
    pub published: NaiveDate,
    /// Part number -> part title, kept in part order
    pub parts: BTreeMap<i32, String>,
    pub authors: Vec<Author>,
    pub genre: Genre,
}

/// Books are identified by name only.
impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Book {}

impl std::fmt::Display for Book {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\" ({})", self.name, self.published)?;
        if !self.authors.is_empty() {
            let authors: Vec<String> = self.authors.iter().map(ToString::to_string).collect();
            write!(f, ", by {}", authors.join(", "))?;
        }
        write!(f, ", genre: {}", self.genre)?;
        if !self.parts.is_empty() {
            let parts: Vec<String> = self
                .parts
                .iter()
                .map(|(number, title)| format!("{}. {}", number, title))
                .collect();
            write!(f, ", parts: {}", parts.join("; "))?;
        }
        Ok(())
    }
}

/// Book to be inserted. Authors and genre must already be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub name: String,
    pub published: NaiveDate,
    pub parts: BTreeMap<i32, String>,
    pub authors: Vec<Author>,
    pub genre: Genre,
}

/// Flat `books` row joined with its genre
#[derive(Debug, FromRow)]
pub(crate) struct BookRow {
    pub id: i32,
    pub name: String,
    pub published: NaiveDate,
    pub parts: Json<BTreeMap<i32, String>>,
    pub genre_id: i32,
    pub genre_name: String,
}

impl BookRow {
    pub(crate) fn into_book(self, authors: Vec<Author>) -> Book {
        Book {
            id: self.id,
            name: self.name,
            published: self.published,
            parts: self.parts.0,
            authors,
            genre: Genre {
                id: self.genre_id,
                name: self.genre_name,
            },
        }
    }
}
