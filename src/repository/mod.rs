//! Repository layer for database operations
//!
//! Each entity has a capability trait consumed by the service layer and a
//! PostgreSQL implementation. Lookups of a missing row return `Ok(None)` or an
//! empty list; only store failures are errors.

pub mod authors;
pub mod books;
pub mod comments;
pub mod genres;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Author, Book, Comment, Genre, NewAuthor, NewBook, NewComment, NewGenre},
};

pub use authors::PostgresAuthorsRepository;
pub use books::PostgresBooksRepository;
pub use comments::PostgresCommentsRepository;
pub use genres::PostgresGenresRepository;

/// Book storage
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>>;
    async fn get_by_name(&self, name: &str) -> AppResult<Option<Book>>;
    async fn get_all(&self) -> AppResult<Vec<Book>>;
    async fn count(&self) -> AppResult<i64>;
    /// Insert the book row and its author links
    async fn insert(&self, book: &NewBook) -> AppResult<Book>;
    async fn delete_by_name(&self, name: &str) -> AppResult<()>;
    async fn get_by_author_id(&self, author_id: i32) -> AppResult<Vec<Book>>;
    async fn get_by_genre_id(&self, genre_id: i32) -> AppResult<Vec<Book>>;
}

/// Author storage
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    async fn get_by_id(&self, id: i32) -> AppResult<Option<Author>>;
    async fn get_by_name_and_surname(&self, name: &str, surname: &str) -> AppResult<Option<Author>>;
    async fn get_all(&self) -> AppResult<Vec<Author>>;
    async fn count(&self) -> AppResult<i64>;
    async fn insert(&self, author: &NewAuthor) -> AppResult<Author>;
    async fn delete_by_id(&self, id: i32) -> AppResult<()>;
    async fn delete_by_name_and_surname(&self, name: &str, surname: &str) -> AppResult<()>;
}

/// Genre storage
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenreRepository: Send + Sync {
    async fn get_by_id(&self, id: i32) -> AppResult<Option<Genre>>;
    async fn get_by_name(&self, name: &str) -> AppResult<Option<Genre>>;
    async fn get_all(&self) -> AppResult<Vec<Genre>>;
    async fn count(&self) -> AppResult<i64>;
    async fn insert(&self, genre: &NewGenre) -> AppResult<Genre>;
    async fn delete_by_id(&self, id: i32) -> AppResult<()>;
    async fn delete_by_name(&self, name: &str) -> AppResult<()>;
}

/// Comment storage
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn get_by_id(&self, id: i32) -> AppResult<Option<Comment>>;
    /// Comments attached to the book with the given name
    async fn get_by_book_name(&self, name: &str) -> AppResult<Vec<Comment>>;
    async fn get_all(&self) -> AppResult<Vec<Comment>>;
    async fn count(&self) -> AppResult<i64>;
    async fn insert(&self, comment: &NewComment) -> AppResult<Comment>;
    async fn delete_by_id(&self, id: i32) -> AppResult<()>;
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub books: Arc<dyn BookRepository>,
    pub authors: Arc<dyn AuthorRepository>,
    pub genres: Arc<dyn GenreRepository>,
    pub comments: Arc<dyn CommentRepository>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: Arc::new(PostgresBooksRepository::new(pool.clone())),
            authors: Arc::new(PostgresAuthorsRepository::new(pool.clone())),
            genres: Arc::new(PostgresGenresRepository::new(pool.clone())),
            comments: Arc::new(PostgresCommentsRepository::new(pool.clone())),
            pool,
        }
    }

    /// Round-trip a trivial query to check the database is reachable
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
