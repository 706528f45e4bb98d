//! Data models for Bookshelf

pub mod author;
pub mod book;
pub mod comment;
pub mod enums;
pub mod genre;

// Re-export commonly used types
pub use author::{Author, NewAuthor};
pub use book::{Book, NewBook};
pub use comment::{Comment, NewComment};
pub use enums::Country;
pub use genre::{Genre, NewGenre};
