//! Repository tests against PostgreSQL
//!
//! Each test gets a fresh database with migrations applied.
//! Run with: DATABASE_URL=postgres://... cargo test -- --ignored

use std::collections::BTreeMap;

use chrono::NaiveDate;
use sqlx::PgPool;

use bookshelf_server::{
    error::AppError,
    models::{Country, NewAuthor, NewBook, NewComment, NewGenre},
    repository::{
        AuthorRepository, BookRepository, CommentRepository, GenreRepository,
        PostgresAuthorsRepository, PostgresBooksRepository, PostgresCommentsRepository,
        PostgresGenresRepository,
    },
};

fn tolstoy() -> NewAuthor {
    NewAuthor::new("Leo", "Tolstoy", Country::Russia)
}

fn dostoevsky() -> NewAuthor {
    NewAuthor::new("Fyodor", "Dostoevsky", Country::Russia)
}

#[sqlx::test]
#[ignore]
async fn test_author_insert_and_lookup(pool: PgPool) {
    let authors = PostgresAuthorsRepository::new(pool);

    let inserted = authors.insert(&tolstoy()).await.unwrap();

    let by_key = authors
        .get_by_name_and_surname("Leo", "Tolstoy")
        .await
        .unwrap()
        .expect("author by name");
    assert_eq!(by_key, inserted);
    assert_eq!(by_key.country, Country::Russia);

    let by_id = authors.get_by_id(inserted.id).await.unwrap().expect("author by id");
    assert_eq!(by_id, inserted);
}

#[sqlx::test]
#[ignore]
async fn test_author_list_and_count(pool: PgPool) {
    let authors = PostgresAuthorsRepository::new(pool);
    let leo = authors.insert(&tolstoy()).await.unwrap();
    let fyodor = authors.insert(&dostoevsky()).await.unwrap();

    let all = authors.get_all().await.unwrap();
    assert!(all.contains(&leo));
    assert!(all.contains(&fyodor));
    assert_eq!(authors.count().await.unwrap(), 2);
}

#[sqlx::test]
#[ignore]
async fn test_author_delete(pool: PgPool) {
    let authors = PostgresAuthorsRepository::new(pool);
    let leo = authors.insert(&tolstoy()).await.unwrap();
    authors.insert(&dostoevsky()).await.unwrap();

    authors.delete_by_id(leo.id).await.unwrap();
    assert!(authors.get_by_id(leo.id).await.unwrap().is_none());

    authors.delete_by_name_and_surname("Fyodor", "Dostoevsky").await.unwrap();
    assert!(authors
        .get_by_name_and_surname("Fyodor", "Dostoevsky")
        .await
        .unwrap()
        .is_none());
    assert_eq!(authors.count().await.unwrap(), 0);
}

#[sqlx::test]
#[ignore]
async fn test_genre_lifecycle(pool: PgPool) {
    let genres = PostgresGenresRepository::new(pool);

    assert!(genres.get_by_name("novel").await.unwrap().is_none());
    let novel = genres.insert(&NewGenre::new("novel")).await.unwrap();
    genres.insert(&NewGenre::new("poem")).await.unwrap();

    assert_eq!(genres.get_by_name("novel").await.unwrap(), Some(novel.clone()));
    assert_eq!(genres.get_by_id(novel.id).await.unwrap(), Some(novel.clone()));
    assert_eq!(genres.count().await.unwrap(), 2);

    genres.delete_by_name("poem").await.unwrap();
    genres.delete_by_id(novel.id).await.unwrap();
    assert!(genres.get_all().await.unwrap().is_empty());
}

#[sqlx::test]
#[ignore]
async fn test_genre_in_use_cannot_be_deleted(pool: PgPool) {
    let genres = PostgresGenresRepository::new(pool.clone());
    let books = PostgresBooksRepository::new(pool);

    let novel = genres.insert(&NewGenre::new("novel")).await.unwrap();
    books
        .insert(&NewBook {
            name: "War and Peace".to_string(),
            published: NaiveDate::from_ymd_opt(1869, 1, 1).unwrap(),
            parts: BTreeMap::new(),
            authors: vec![],
            genre: novel.clone(),
        })
        .await
        .unwrap();

    assert!(matches!(genres.delete_by_id(novel.id).await, Err(AppError::Database(_))));
    assert!(matches!(genres.delete_by_name("novel").await, Err(AppError::Database(_))));

    assert_eq!(genres.get_by_name("novel").await.unwrap(), Some(novel.clone()));
    assert_eq!(books.get_by_genre_id(novel.id).await.unwrap().len(), 1);
}

#[sqlx::test]
#[ignore]
async fn test_deleting_absent_rows_is_a_no_op(pool: PgPool) {
    let authors = PostgresAuthorsRepository::new(pool.clone());
    let genres = PostgresGenresRepository::new(pool.clone());
    let books = PostgresBooksRepository::new(pool.clone());
    let comments = PostgresCommentsRepository::new(pool);

    books.delete_by_name("missing").await.unwrap();
    authors.delete_by_id(999).await.unwrap();
    authors.delete_by_name_and_surname("Nobody", "Anywhere").await.unwrap();
    genres.delete_by_id(999).await.unwrap();
    genres.delete_by_name("missing").await.unwrap();
    comments.delete_by_id(999).await.unwrap();

    assert_eq!(books.count().await.unwrap(), 0);
    assert_eq!(authors.count().await.unwrap(), 0);
    assert_eq!(genres.count().await.unwrap(), 0);
    assert_eq!(comments.count().await.unwrap(), 0);
}

#[sqlx::test]
#[ignore]
async fn test_book_insert_and_queries(pool: PgPool) {
    let authors = PostgresAuthorsRepository::new(pool.clone());
    let genres = PostgresGenresRepository::new(pool.clone());
    let books = PostgresBooksRepository::new(pool);

    let leo = authors.insert(&tolstoy()).await.unwrap();
    let novel = genres.insert(&NewGenre::new("novel")).await.unwrap();
    let parts = BTreeMap::from([(1, "Volume One".to_string()), (2, "Volume Two".to_string())]);

    let inserted = books
        .insert(&NewBook {
            name: "War and Peace".to_string(),
            published: NaiveDate::from_ymd_opt(1869, 1, 1).unwrap(),
            parts: parts.clone(),
            authors: vec![leo.clone()],
            genre: novel.clone(),
        })
        .await
        .unwrap();

    let loaded = books
        .get_by_name("War and Peace")
        .await
        .unwrap()
        .expect("book by name");
    assert_eq!(loaded, inserted);
    assert_eq!(loaded.parts, parts);
    assert_eq!(loaded.authors, vec![leo.clone()]);
    assert_eq!(loaded.genre, novel);

    assert_eq!(books.get_by_id(inserted.id).await.unwrap(), Some(inserted.clone()));
    assert_eq!(books.get_by_author_id(leo.id).await.unwrap(), vec![inserted.clone()]);
    assert_eq!(books.get_by_genre_id(novel.id).await.unwrap(), vec![inserted.clone()]);
    assert_eq!(books.get_all().await.unwrap().len(), 1);
    assert_eq!(books.count().await.unwrap(), 1);
}

#[sqlx::test]
#[ignore]
async fn test_book_name_is_unique(pool: PgPool) {
    let genres = PostgresGenresRepository::new(pool.clone());
    let books = PostgresBooksRepository::new(pool);
    let novel = genres.insert(&NewGenre::new("novel")).await.unwrap();

    let book = NewBook {
        name: "Anna Karenina".to_string(),
        published: NaiveDate::from_ymd_opt(1878, 1, 1).unwrap(),
        parts: BTreeMap::new(),
        authors: vec![],
        genre: novel,
    };
    books.insert(&book).await.unwrap();

    assert!(books.insert(&book).await.is_err());
    assert_eq!(books.count().await.unwrap(), 1);
}

#[sqlx::test]
#[ignore]
async fn test_book_delete_removes_links(pool: PgPool) {
    let authors = PostgresAuthorsRepository::new(pool.clone());
    let genres = PostgresGenresRepository::new(pool.clone());
    let books = PostgresBooksRepository::new(pool.clone());
    let comments = PostgresCommentsRepository::new(pool);

    let leo = authors.insert(&tolstoy()).await.unwrap();
    let novel = genres.insert(&NewGenre::new("novel")).await.unwrap();
    let book = books
        .insert(&NewBook {
            name: "War and Peace".to_string(),
            published: NaiveDate::from_ymd_opt(1869, 1, 1).unwrap(),
            parts: BTreeMap::new(),
            authors: vec![leo.clone()],
            genre: novel,
        })
        .await
        .unwrap();
    comments
        .insert(&NewComment {
            author: "user".to_string(),
            text: "so good".to_string(),
            book_ids: vec![book.id],
        })
        .await
        .unwrap();

    books.delete_by_name("War and Peace").await.unwrap();

    assert!(books.get_by_name("War and Peace").await.unwrap().is_none());
    assert!(books.get_by_author_id(leo.id).await.unwrap().is_empty());
    assert!(comments.get_by_book_name("War and Peace").await.unwrap().is_empty());
    // the author itself is kept
    assert!(authors.get_by_id(leo.id).await.unwrap().is_some());
}

#[sqlx::test]
#[ignore]
async fn test_comments_by_book_name(pool: PgPool) {
    let genres = PostgresGenresRepository::new(pool.clone());
    let books = PostgresBooksRepository::new(pool.clone());
    let comments = PostgresCommentsRepository::new(pool);

    let novel = genres.insert(&NewGenre::new("novel")).await.unwrap();
    let mut ids = Vec::new();
    for name in ["War and Peace", "Anna Karenina"] {
        let book = books
            .insert(&NewBook {
                name: name.to_string(),
                published: NaiveDate::from_ymd_opt(1870, 1, 1).unwrap(),
                parts: BTreeMap::new(),
                authors: vec![],
                genre: novel.clone(),
            })
            .await
            .unwrap();
        ids.push(book.id);
    }

    let both = comments
        .insert(&NewComment {
            author: "user".to_string(),
            text: "so good".to_string(),
            book_ids: ids.clone(),
        })
        .await
        .unwrap();
    assert_eq!(both.books, vec!["War and Peace".to_string(), "Anna Karenina".to_string()]);

    comments
        .insert(&NewComment {
            author: "critic".to_string(),
            text: "too long".to_string(),
            book_ids: vec![ids[0]],
        })
        .await
        .unwrap();

    let on_war = comments.get_by_book_name("War and Peace").await.unwrap();
    assert_eq!(on_war.len(), 2);
    assert_eq!(on_war[0], both);
    assert_eq!(on_war[0].books.len(), 2);

    let on_anna = comments.get_by_book_name("Anna Karenina").await.unwrap();
    assert_eq!(on_anna, vec![both.clone()]);

    assert_eq!(comments.count().await.unwrap(), 2);
    assert_eq!(comments.get_by_id(both.id).await.unwrap(), Some(both.clone()));

    comments.delete_by_id(both.id).await.unwrap();
    assert!(comments.get_by_book_name("Anna Karenina").await.unwrap().is_empty());
    assert_eq!(comments.get_all().await.unwrap().len(), 1);
}
