//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authors, books, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library Catalog",
        version = "0.1.0",
        description = "Browse, add and delete books and authors"
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::list_books,
        books::add_book_form,
        books::add_book,
        books::delete_book,
        // Authors
        authors::add_author_form,
        authors::add_author,
    ),
    components(
        schemas(
            crate::models::book::BookForm,
            crate::models::book::BookQuery,
            crate::models::book::BookWithAuthor,
            crate::models::author::AuthorForm,
            crate::models::author::Author,
            health::HealthResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book list, creation and deletion"),
        (name = "authors", description = "Author creation")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
