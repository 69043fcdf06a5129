//! Book endpoints: the home list, the add-book form and deletion

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;

use super::{notice::Notice, BookId};
use crate::{
    error::{AppError, AppResult},
    models::book::{BookForm, BookQuery, CreateBook},
    views::{AddBookPage, HomePage},
    AppState,
};

/// List books, filtered and sorted
#[utoipa::path(
    get,
    path = "/",
    tag = "books",
    params(
        ("query" = Option<String>, Query, description = "Case-insensitive substring of title or author name"),
        ("sort" = Option<String>, Query, description = "`title` or `author`")
    ),
    responses(
        (status = 200, description = "Book list page", content_type = "text/html", body = String)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<BookQuery>,
) -> AppResult<(CookieJar, Html<String>)> {
    let books = state.services.catalog.list_books(&query).await?;
    let (jar, notice) = state.notices.take(jar);

    let html = state.views.home(&HomePage {
        page_title: "Library",
        books: &books,
        query: query.filter(),
        sort: query.sort_key().map(|s| s.as_str()),
        notice: notice.as_ref(),
    })?;

    Ok((jar, Html(html)))
}

/// Show the add-book form
#[utoipa::path(
    get,
    path = "/add_book",
    tag = "books",
    responses(
        (status = 200, description = "Book creation form", content_type = "text/html", body = String)
    )
)]
pub async fn add_book_form(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let (jar, notice) = state.notices.take(jar);
    let html = render_add_book(&state, notice.as_ref()).await?;
    Ok((jar, Html(html)))
}

/// Create a book and come back to the form
#[utoipa::path(
    post,
    path = "/add_book",
    tag = "books",
    request_body(content = BookForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Book created, redirect to /add_book"),
        (status = 404, description = "Author not found", content_type = "text/html", body = String),
        (status = 422, description = "Invalid form", content_type = "text/html", body = String)
    )
)]
pub async fn add_book(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    let created = match CreateBook::try_from(form) {
        Ok(data) => state.services.catalog.create_book(data).await,
        Err(e) => Err(e),
    };

    match created {
        Ok(_) => {
            let notice = Notice::success("Book added successfully!");
            Ok((state.notices.put(jar, &notice), Redirect::to("/add_book")).into_response())
        }
        Err(e @ (AppError::Validation(_) | AppError::NotFound(_))) => {
            let notice = Notice::error(e.public_message());
            let html = render_add_book(&state, Some(&notice)).await?;
            Ok((e.status_code(), jar, Html(html)).into_response())
        }
        Err(e) => Err(e),
    }
}

/// Delete a book; its author goes too when this was their last book
#[utoipa::path(
    post,
    path = "/book/{book_id}/delete",
    tag = "books",
    params(
        ("book_id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 303, description = "Book deleted, redirect to /"),
        (status = 404, description = "Book not found or id not an integer", content_type = "text/html", body = String)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    jar: CookieJar,
    BookId(book_id): BookId,
) -> AppResult<(CookieJar, Redirect)> {
    let deletion = state.services.catalog.delete_book(book_id).await?;

    let notice = match deletion.removed_author {
        Some(author) => Notice::success(format!(
            "Book deleted successfully! Author {} removed (no books left).",
            author.name
        )),
        None => Notice::success("Book deleted successfully!"),
    };

    Ok((state.notices.put(jar, &notice), Redirect::to("/")))
}

async fn render_add_book(state: &AppState, notice: Option<&Notice>) -> AppResult<String> {
    let authors = state.services.catalog.list_authors().await?;
    state.views.add_book(&AddBookPage {
        page_title: "Add book",
        authors: &authors,
        notice,
    })
}
