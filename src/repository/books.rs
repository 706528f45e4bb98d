//! Books repository
//!
//! A book is stored as a `books` row (parts as JSONB, genre as a foreign key)
//! plus one `book_authors` row per author.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{types::Json, FromRow, Pool, Postgres};

use super::BookRepository;
use crate::{
    error::AppResult,
    models::{
        author::Author,
        book::{Book, BookRow, NewBook},
    },
};

const SELECT_BOOKS: &str = r#"
    SELECT b.id, b.name, b.published, b.parts, b.genre_id, g.name AS genre_name
    FROM books b
    JOIN genres g ON g.id = b.genre_id
"#;

#[derive(FromRow)]
struct BookAuthorRow {
    book_id: i32,
    #[sqlx(flatten)]
    author: Author,
}

#[derive(Clone)]
pub struct PostgresBooksRepository {
    pool: Pool<Postgres>,
}

impl PostgresBooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Attach authors to a batch of book rows with a single query
    async fn with_authors(&self, rows: Vec<BookRow>) -> AppResult<Vec<Book>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
        let links = sqlx::query_as::<_, BookAuthorRow>(
            r#"
            SELECT ba.book_id, a.id, a.name, a.surname, a.country
            FROM book_authors ba
            JOIN authors a ON a.id = ba.author_id
            WHERE ba.book_id = ANY($1)
            ORDER BY a.id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut authors: HashMap<i32, Vec<Author>> = HashMap::new();
        for link in links {
            authors.entry(link.book_id).or_default().push(link.author);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let book_authors = authors.remove(&row.id).unwrap_or_default();
                row.into_book(book_authors)
            })
            .collect())
    }

    async fn fetch_one_where(&self, clause: &str, name: &str) -> AppResult<Option<Book>> {
        let query = format!("{} WHERE {}", SELECT_BOOKS, clause);
        let row = sqlx::query_as::<_, BookRow>(&query)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(self.with_authors(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl BookRepository for PostgresBooksRepository {
    async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let query = format!("{} WHERE b.id = $1", SELECT_BOOKS);
        let row = sqlx::query_as::<_, BookRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(self.with_authors(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn get_by_name(&self, name: &str) -> AppResult<Option<Book>> {
        self.fetch_one_where("b.name = $1", name).await
    }

    async fn get_all(&self) -> AppResult<Vec<Book>> {
        let query = format!("{} ORDER BY b.id", SELECT_BOOKS);
        let rows = sqlx::query_as::<_, BookRow>(&query)
            .fetch_all(&self.pool)
            .await?;
        self.with_authors(rows).await
    }

    async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn insert(&self, book: &NewBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO books (name, published, parts, genre_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&book.name)
        .bind(book.published)
        .bind(Json(&book.parts))
        .bind(book.genre.id)
        .fetch_one(&mut *tx)
        .await?;

        for author in &book.authors {
            sqlx::query(
                "INSERT INTO book_authors (book_id, author_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(id)
            .bind(author.id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        tracing::debug!("Inserted book \"{}\" (id={})", book.name, id);

        Ok(Book {
            id,
            name: book.name.clone(),
            published: book.published,
            parts: book.parts.clone(),
            authors: book.authors.clone(),
            genre: book.genre.clone(),
        })
    }

    async fn delete_by_name(&self, name: &str) -> AppResult<()> {
        // book_authors and book_comments rows go with the book (ON DELETE CASCADE)
        sqlx::query("DELETE FROM books WHERE name = $1")
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn get_by_author_id(&self, author_id: i32) -> AppResult<Vec<Book>> {
        let query = format!(
            "{} WHERE b.id IN (SELECT book_id FROM book_authors WHERE author_id = $1) ORDER BY b.id",
            SELECT_BOOKS
        );
        let rows = sqlx::query_as::<_, BookRow>(&query)
            .bind(author_id)
            .fetch_all(&self.pool)
            .await?;
        self.with_authors(rows).await
    }

    async fn get_by_genre_id(&self, genre_id: i32) -> AppResult<Vec<Book>> {
        let query = format!("{} WHERE b.genre_id = $1 ORDER BY b.id", SELECT_BOOKS);
        let rows = sqlx::query_as::<_, BookRow>(&query)
            .bind(genre_id)
            .fetch_all(&self.pool)
            .await?;
        self.with_authors(rows).await
    }
}
