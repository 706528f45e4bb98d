//! Comments repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::CommentRepository;
use crate::{
    error::AppResult,
    models::comment::{Comment, NewComment},
};

/// Comment columns plus the names of every linked book
const SELECT_COMMENTS: &str = r#"
    SELECT c.id, c.author, c.text,
           COALESCE(array_agg(b.name::text ORDER BY b.id) FILTER (WHERE b.id IS NOT NULL), '{}'::text[]) AS books
    FROM comments c
    LEFT JOIN book_comments bc ON bc.comment_id = c.id
    LEFT JOIN books b ON b.id = bc.book_id
"#;

#[derive(Clone)]
pub struct PostgresCommentsRepository {
    pool: Pool<Postgres>,
}

impl PostgresCommentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentsRepository {
    async fn get_by_id(&self, id: i32) -> AppResult<Option<Comment>> {
        let query = format!("{} WHERE c.id = $1 GROUP BY c.id", SELECT_COMMENTS);
        let comment = sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(comment)
    }

    async fn get_by_book_name(&self, name: &str) -> AppResult<Vec<Comment>> {
        let query = format!(
            r#"{}
            WHERE c.id IN (
                SELECT bc2.comment_id FROM book_comments bc2
                JOIN books b2 ON b2.id = bc2.book_id
                WHERE b2.name = $1
            )
            GROUP BY c.id
            ORDER BY c.id"#,
            SELECT_COMMENTS
        );
        let rows = sqlx::query_as::<_, Comment>(&query)
            .bind(name)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_all(&self) -> AppResult<Vec<Comment>> {
        let query = format!("{} GROUP BY c.id ORDER BY c.id", SELECT_COMMENTS);
        let rows = sqlx::query_as::<_, Comment>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn insert(&self, comment: &NewComment) -> AppResult<Comment> {
        let mut tx = self.pool.begin().await?;

        let id: i32 = sqlx::query_scalar(
            "INSERT INTO comments (author, text) VALUES ($1, $2) RETURNING id",
        )
        .bind(&comment.author)
        .bind(&comment.text)
        .fetch_one(&mut *tx)
        .await?;

        for book_id in &comment.book_ids {
            sqlx::query(
                "INSERT INTO book_comments (book_id, comment_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(book_id)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        }

        let books: Vec<String> =
            sqlx::query_scalar("SELECT name::text FROM books WHERE id = ANY($1) ORDER BY id")
                .bind(&comment.book_ids)
                .fetch_all(&mut *tx)
                .await?;

        tx.commit().await?;
        tracing::debug!("Inserted comment id={} on {} book(s)", id, books.len());

        Ok(Comment {
            id,
            author: comment.author.clone(),
            text: comment.text.clone(),
            books,
        })
    }

    async fn delete_by_id(&self, id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
