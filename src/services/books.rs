//! Book catalog service
//!
//! Every operation answers with a human-readable status line. Missing books,
//! authors and genres are ordinary outcomes and never surface as errors.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;

use crate::{
    error::AppResult,
    models::{Comment, Country, NewAuthor, NewBook, NewGenre},
    repository::{AuthorRepository, BookRepository, CommentRepository, GenreRepository},
};

pub const BOOK_ALREADY_EXISTS: &str = "Book is already in the catalog";
pub const AUTHOR_CREATED: &str = "Author created";
pub const GENRE_CREATED: &str = "Genre created";
pub const BOOK_CREATED: &str = "Book created successfully";
pub const NO_BOOKS: &str = "No books in the catalog";
pub const BOOK_LIST_HEADER: &str = "Books:";
pub const BOOK_COUNT_PREFIX: &str = "Number of books in the catalog: ";
pub const BOOK_DELETED: &str = "Book deleted successfully";
pub const NO_BOOK_TO_DELETE: &str = "No book found in the catalog to delete";
pub const BOOK_FOUND_PREFIX: &str = "Found book: ";
pub const NO_BOOK_FOUND: &str = "No book found in the catalog";
pub const AUTHOR_BOOKS_HEADER: &str = "Books by author:";
pub const AUTHOR_BOOKS_EMPTY: &str = "Book list for the selected author is empty";
pub const NO_SUCH_AUTHOR: &str = "No such author in the catalog";
pub const GENRE_BOOKS_HEADER: &str = "Books in genre:";
pub const GENRE_BOOKS_EMPTY: &str = "Book list for the selected genre is empty";
pub const NO_SUCH_GENRE: &str = "No such genre in the catalog";
pub const COMMENTS_HEADER: &str = "Comments on book:";
pub const NO_COMMENTS: &str = "No comments on the book";

#[derive(Clone)]
pub struct BookService {
    books: Arc<dyn BookRepository>,
    authors: Arc<dyn AuthorRepository>,
    genres: Arc<dyn GenreRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl BookService {
    pub fn new(
        books: Arc<dyn BookRepository>,
        authors: Arc<dyn AuthorRepository>,
        genres: Arc<dyn GenreRepository>,
        comments: Arc<dyn CommentRepository>,
    ) -> Self {
        Self {
            books,
            authors,
            genres,
            comments,
        }
    }

    /// Create a book, creating its genre and author first when they are not
    /// in the catalog yet. Nothing is written if the book name is taken.
    ///
    /// The three inserts are not wrapped in one transaction: when the book
    /// insert fails, a genre or author created by this call is kept and the
    /// error is returned.
    pub async fn create_book_by_name_and_author_and_genre(
        &self,
        book_name: &str,
        author_name: &str,
        author_surname: &str,
        genre_name: &str,
    ) -> AppResult<String> {
        if self.books.get_by_name(book_name).await?.is_some() {
            tracing::info!("Book \"{}\" already exists, skipping creation", book_name);
            return Ok(BOOK_ALREADY_EXISTS.to_string());
        }

        let (genre, genre_created) = match self.genres.get_by_name(genre_name).await? {
            Some(genre) => (genre, false),
            None => (self.genres.insert(&NewGenre::new(genre_name)).await?, true),
        };

        let (author, author_created) = match self
            .authors
            .get_by_name_and_surname(author_name, author_surname)
            .await?
        {
            Some(author) => (author, false),
            None => {
                let new_author = NewAuthor::new(author_name, author_surname, Country::Unknown);
                (self.authors.insert(&new_author).await?, true)
            }
        };

        let book = NewBook {
            name: book_name.to_string(),
            published: Utc::now().date_naive(),
            parts: BTreeMap::new(),
            authors: vec![author],
            genre,
        };
        let created = self.books.insert(&book).await?;
        tracing::info!(
            "Created book \"{}\" (id={}, author_created={}, genre_created={})",
            created.name,
            created.id,
            author_created,
            genre_created
        );

        let mut lines = Vec::with_capacity(3);
        if author_created {
            lines.push(AUTHOR_CREATED);
        }
        if genre_created {
            lines.push(GENRE_CREATED);
        }
        lines.push(BOOK_CREATED);
        Ok(lines.join("\n"))
    }

    pub async fn get_all_books(&self) -> AppResult<String> {
        let books = self.books.get_all().await?;
        Ok(listing(BOOK_LIST_HEADER, &books).unwrap_or_else(|| NO_BOOKS.to_string()))
    }

    pub async fn count_books(&self) -> AppResult<String> {
        let count = self.books.count().await?;
        Ok(format!("{}{}", BOOK_COUNT_PREFIX, count))
    }

    pub async fn delete_book(&self, name: &str) -> AppResult<String> {
        if self.books.get_by_name(name).await?.is_none() {
            return Ok(NO_BOOK_TO_DELETE.to_string());
        }
        self.books.delete_by_name(name).await?;
        tracing::info!("Deleted book \"{}\"", name);
        Ok(BOOK_DELETED.to_string())
    }

    pub async fn get_book(&self, name: &str) -> AppResult<String> {
        Ok(match self.books.get_by_name(name).await? {
            Some(book) => format!("{}{}", BOOK_FOUND_PREFIX, book),
            None => NO_BOOK_FOUND.to_string(),
        })
    }

    pub async fn get_books_by_author_name_and_surname(
        &self,
        name: &str,
        surname: &str,
    ) -> AppResult<String> {
        let Some(author) = self.authors.get_by_name_and_surname(name, surname).await? else {
            return Ok(NO_SUCH_AUTHOR.to_string());
        };
        let books = self.books.get_by_author_id(author.id).await?;
        Ok(listing(AUTHOR_BOOKS_HEADER, &books).unwrap_or_else(|| AUTHOR_BOOKS_EMPTY.to_string()))
    }

    pub async fn get_books_by_genre_name(&self, name: &str) -> AppResult<String> {
        let Some(genre) = self.genres.get_by_name(name).await? else {
            return Ok(NO_SUCH_GENRE.to_string());
        };
        let books = self.books.get_by_genre_id(genre.id).await?;
        Ok(listing(GENRE_BOOKS_HEADER, &books).unwrap_or_else(|| GENRE_BOOKS_EMPTY.to_string()))
    }

    pub async fn get_comments_on_book(&self, name: &str) -> AppResult<String> {
        let comments: Vec<Comment> = self.comments.get_by_book_name(name).await?;
        Ok(listing(COMMENTS_HEADER, &comments).unwrap_or_else(|| NO_COMMENTS.to_string()))
    }
}

/// Header line followed by one entry per line, or `None` when empty
fn listing<T: std::fmt::Display>(header: &str, entries: &[T]) -> Option<String> {
    if entries.is_empty() {
        return None;
    }
    let mut out = header.to_string();
    for entry in entries {
        out.push('\n');
        out.push_str(&entry.to_string());
    }
    Some(out)
}
