//! Authors repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::AuthorRepository;
use crate::{
    error::AppResult,
    models::author::{Author, NewAuthor},
};

#[derive(Clone)]
pub struct PostgresAuthorsRepository {
    pool: Pool<Postgres>,
}

impl PostgresAuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorRepository for PostgresAuthorsRepository {
    async fn get_by_id(&self, id: i32) -> AppResult<Option<Author>> {
        let author = sqlx::query_as::<_, Author>("SELECT * FROM authors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(author)
    }

    async fn get_by_name_and_surname(&self, name: &str, surname: &str) -> AppResult<Option<Author>> {
        let author = sqlx::query_as::<_, Author>(
            "SELECT * FROM authors WHERE name = $1 AND surname = $2",
        )
        .bind(name)
        .bind(surname)
        .fetch_optional(&self.pool)
        .await?;
        Ok(author)
    }

    async fn get_all(&self) -> AppResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, Author>("SELECT * FROM authors ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn insert(&self, author: &NewAuthor) -> AppResult<Author> {
        let row = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO authors (name, surname, country)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&author.name)
        .bind(&author.surname)
        .bind(i16::from(author.country))
        .fetch_one(&self.pool)
        .await?;
        tracing::debug!("Inserted author {} (id={})", row, row.id);
        Ok(row)
    }

    async fn delete_by_id(&self, id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_by_name_and_surname(&self, name: &str, surname: &str) -> AppResult<()> {
        sqlx::query("DELETE FROM authors WHERE name = $1 AND surname = $2")
            .bind(name)
            .bind(surname)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
