//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{non_blank, Author};
use crate::error::{AppError, AppResult};

/// Book record from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i64,
    pub isbn: Option<String>,
    pub title: String,
    pub publication_year: Option<String>,
    pub author_id: i64,
}

/// Book joined with its author's name, as listed on the home page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookWithAuthor {
    pub id: i64,
    pub isbn: Option<String>,
    pub title: String,
    pub publication_year: Option<String>,
    pub author_id: i64,
    pub author_name: String,
}

/// Home page query parameters
#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
pub struct BookQuery {
    /// Case-insensitive substring of the title or the author name
    pub query: Option<String>,
    /// `title` or `author`; anything else keeps the default order
    pub sort: Option<String>,
}

impl BookQuery {
    /// Search text exactly as typed; only an empty string means "no filter"
    pub fn filter(&self) -> Option<&str> {
        self.query.as_deref().filter(|q| !q.is_empty())
    }

    pub fn sort_key(&self) -> Option<BookSort> {
        self.sort.as_deref().and_then(BookSort::from_param)
    }
}

/// Sort order of the book list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookSort {
    Title,
    Author,
}

impl BookSort {
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "title" => Some(BookSort::Title),
            "author" => Some(BookSort::Author),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BookSort::Title => "title",
            BookSort::Author => "author",
        }
    }

    pub(crate) fn order_by(&self) -> &'static str {
        match self {
            BookSort::Title => "b.title, b.id",
            BookSort::Author => "a.name, b.id",
        }
    }
}

/// Raw `add_book` form submission
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct BookForm {
    pub isbn: Option<String>,
    pub title: Option<String>,
    pub publication_year: Option<String>,
    pub author_id: Option<String>,
}

/// Create book request
#[derive(Debug, Clone, Validate)]
pub struct CreateBook {
    #[validate(length(max = 20, message = "ISBN must be at most 20 characters"))]
    pub isbn: Option<String>,
    #[validate(length(min = 1, max = 120, message = "Title must be 1 to 120 characters"))]
    pub title: String,
    #[validate(length(max = 4, message = "Publication year must be at most 4 characters"))]
    pub publication_year: Option<String>,
    pub author_id: i64,
}

impl CreateBook {
    pub fn new(title: impl Into<String>, author_id: i64) -> Self {
        Self {
            isbn: None,
            title: title.into(),
            publication_year: None,
            author_id,
        }
    }

    pub fn isbn(mut self, isbn: impl Into<String>) -> Self {
        self.isbn = Some(isbn.into());
        self
    }

    pub fn published(mut self, year: impl Into<String>) -> Self {
        self.publication_year = Some(year.into());
        self
    }
}

impl TryFrom<BookForm> for CreateBook {
    type Error = AppError;

    fn try_from(form: BookForm) -> AppResult<Self> {
        let title = non_blank(form.title)
            .ok_or_else(|| AppError::Validation("Title is required".to_string()))?;
        let author_id = non_blank(form.author_id)
            .ok_or_else(|| AppError::Validation("Author is required".to_string()))?;
        let author_id = author_id
            .parse::<i64>()
            .map_err(|_| AppError::Validation(format!("Invalid author id: {}", author_id)))?;

        Ok(Self {
            isbn: non_blank(form.isbn),
            title,
            publication_year: non_blank(form.publication_year),
            author_id,
        })
    }
}

/// Outcome of deleting a book
#[derive(Debug, Clone)]
pub struct BookDeletion {
    pub book: Book,
    /// Set when the book was its author's last one and the author went with it
    pub removed_author: Option<Author>,
}
