//! Book catalog endpoints
//!
//! Each handler forwards to one `BookService` operation and returns its status
//! message. A missing book, author or genre is still a 200 with a message.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::MessageResponse;
use crate::{error::AppResult, AppState};

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookRequest {
    #[validate(custom(function = "not_blank", message = "Book name must not be blank"))]
    pub book_name: String,
    #[validate(custom(function = "not_blank", message = "Author name must not be blank"))]
    pub author_name: String,
    #[validate(custom(function = "not_blank", message = "Author surname must not be blank"))]
    pub author_surname: String,
    #[validate(custom(function = "not_blank", message = "Genre name must not be blank"))]
    pub genre_name: String,
}

/// Rejects empty and whitespace-only names
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "Book listing or empty-catalog notice", body = MessageResponse)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> AppResult<Json<MessageResponse>> {
    let message = state.services.books.get_all_books().await?;
    Ok(Json(message.into()))
}

/// Create a book, creating its author and genre when missing
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBookRequest,
    responses(
        (status = 200, description = "Creation report", body = MessageResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    Json(data): Json<CreateBookRequest>,
) -> AppResult<Json<MessageResponse>> {
    data.validate()?;
    let message = state
        .services
        .books
        .create_book_by_name_and_author_and_genre(
            &data.book_name,
            &data.author_name,
            &data.author_surname,
            &data.genre_name,
        )
        .await?;
    Ok(Json(message.into()))
}

/// Count books
#[utoipa::path(
    get,
    path = "/catalog/count",
    tag = "books",
    responses(
        (status = 200, description = "Number of books", body = MessageResponse)
    )
)]
pub async fn count_books(State(state): State<AppState>) -> AppResult<Json<MessageResponse>> {
    let message = state.services.books.count_books().await?;
    Ok(Json(message.into()))
}

/// Get a book by name
#[utoipa::path(
    get,
    path = "/books/{name}",
    tag = "books",
    params(("name" = String, Path, description = "Book name")),
    responses(
        (status = 200, description = "Book details or not-found notice", body = MessageResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let message = state.services.books.get_book(&name).await?;
    Ok(Json(message.into()))
}

/// Delete a book by name
#[utoipa::path(
    delete,
    path = "/books/{name}",
    tag = "books",
    params(("name" = String, Path, description = "Book name")),
    responses(
        (status = 200, description = "Deletion confirmation or not-found notice", body = MessageResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let message = state.services.books.delete_book(&name).await?;
    Ok(Json(message.into()))
}

/// List comments on a book
#[utoipa::path(
    get,
    path = "/books/{name}/comments",
    tag = "books",
    params(("name" = String, Path, description = "Book name")),
    responses(
        (status = 200, description = "Comment listing or no-comments notice", body = MessageResponse)
    )
)]
pub async fn list_comments(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let message = state.services.books.get_comments_on_book(&name).await?;
    Ok(Json(message.into()))
}

/// List books written by an author
#[utoipa::path(
    get,
    path = "/authors/{name}/{surname}/books",
    tag = "books",
    params(
        ("name" = String, Path, description = "Author first name"),
        ("surname" = String, Path, description = "Author surname")
    ),
    responses(
        (status = 200, description = "Book listing, empty notice or unknown-author notice", body = MessageResponse)
    )
)]
pub async fn list_books_by_author(
    State(state): State<AppState>,
    Path((name, surname)): Path<(String, String)>,
) -> AppResult<Json<MessageResponse>> {
    let message = state
        .services
        .books
        .get_books_by_author_name_and_surname(&name, &surname)
        .await?;
    Ok(Json(message.into()))
}

/// List books of a genre
#[utoipa::path(
    get,
    path = "/genres/{name}/books",
    tag = "books",
    params(("name" = String, Path, description = "Genre name")),
    responses(
        (status = 200, description = "Book listing, empty notice or unknown-genre notice", body = MessageResponse)
    )
)]
pub async fn list_books_by_genre(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let message = state.services.books.get_books_by_genre_name(&name).await?;
    Ok(Json(message.into()))
}
