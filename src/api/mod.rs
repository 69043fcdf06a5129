//! HTTP handlers for the catalog pages

pub mod authors;
pub mod books;
pub mod health;
pub mod notice;
pub mod openapi;

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{error::AppError, AppState};

/// Book id taken from the URL path.
///
/// A segment that is not an integer cannot name a book, so it is reported as
/// not found rather than as a malformed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for BookId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::NotFound(e.body_text()))?;

        raw.parse::<i64>()
            .map(BookId)
            .map_err(|_| AppError::NotFound(format!("Book with id {} not found", raw)))
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let pages = Router::new()
        // Health
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Books
        .route("/", get(books::list_books))
        .route("/add_book", get(books::add_book_form).post(books::add_book))
        .route("/book/:book_id/delete", post(books::delete_book))
        // Authors
        .route("/add_author", get(authors::add_author_form).post(authors::add_author))
        .with_state(state);

    Router::new()
        .merge(pages)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
}
