//! Author endpoints

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;

use super::notice::Notice;
use crate::{
    error::{AppError, AppResult},
    models::author::{AuthorForm, CreateAuthor},
    views::AddAuthorPage,
    AppState,
};

/// Show the add-author form
#[utoipa::path(
    get,
    path = "/add_author",
    tag = "authors",
    responses(
        (status = 200, description = "Author creation form", content_type = "text/html", body = String)
    )
)]
pub async fn add_author_form(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let (jar, notice) = state.notices.take(jar);
    let html = state.views.add_author(&AddAuthorPage {
        page_title: "Add author",
        notice: notice.as_ref(),
    })?;
    Ok((jar, Html(html)))
}

/// Create an author and come back to the form
#[utoipa::path(
    post,
    path = "/add_author",
    tag = "authors",
    request_body(content = AuthorForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Author created, redirect to /add_author"),
        (status = 422, description = "Invalid form", content_type = "text/html", body = String)
    )
)]
pub async fn add_author(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<AuthorForm>,
) -> AppResult<Response> {
    let created = match CreateAuthor::try_from(form) {
        Ok(data) => state.services.catalog.create_author(data).await,
        Err(e) => Err(e),
    };

    match created {
        Ok(_) => {
            let notice = Notice::success("Author added successfully!");
            Ok((state.notices.put(jar, &notice), Redirect::to("/add_author")).into_response())
        }
        Err(e @ AppError::Validation(_)) => {
            let notice = Notice::error(e.public_message());
            let html = state.views.add_author(&AddAuthorPage {
                page_title: "Add author",
                notice: Some(&notice),
            })?;
            Ok((e.status_code(), jar, Html(html)).into_response())
        }
        Err(e) => Err(e),
    }
}
