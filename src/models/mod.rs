//! Data models for the catalog

pub mod author;
pub mod book;

// Re-export commonly used types
pub use author::{Author, AuthorForm, CreateAuthor};
pub use book::{Book, BookDeletion, BookForm, BookQuery, BookSort, BookWithAuthor, CreateBook};

/// Trim a submitted form value; blank input counts as absent.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
