//! HTTP tests driving the router directly

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use tower::ServiceExt;

use catalog_server::{
    api,
    config::{AppConfig, DatabaseConfig},
    models::{BookQuery, CreateAuthor, CreateBook},
    repository::{self, Repository},
    services::catalog::CatalogService,
    AppState,
};

const NOTICE_COOKIE: &str = "catalog_notice";

async fn setup() -> (Router, CatalogService) {
    let config = AppConfig {
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
        },
        ..Default::default()
    };
    let pool = repository::connect(&config.database)
        .await
        .expect("Failed to open in-memory database");
    let repository = Repository::new(pool);
    let catalog = CatalogService::new(repository.clone());
    let state = AppState::new(&config, repository).expect("Failed to build state");
    (api::create_router(state), catalog)
}

fn form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("No Location header")
}

/// The `name=value` pair of the notice cookie set by a response
fn notice_cookie(response: &Response) -> String {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(NOTICE_COOKIE))
        .and_then(|v| v.split(';').next())
        .expect("No notice cookie")
        .to_string()
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = setup().await;

    let response = app.clone().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("\"status\":\"healthy\""));

    let response = app.oneshot(get("/ready")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_home_lists_books() {
    let (app, catalog) = setup().await;
    let author = catalog.create_author(CreateAuthor::new("Frank Herbert")).await.unwrap();
    catalog.create_book(CreateBook::new("Dune", author.id)).await.unwrap();

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("<strong>Dune</strong> by Frank Herbert"));
}

#[tokio::test]
async fn test_home_filters_and_sorts() {
    let (app, catalog) = setup().await;
    let author = catalog.create_author(CreateAuthor::new("Iain Banks")).await.unwrap();
    catalog.create_book(CreateBook::new("The Wasp Factory", author.id)).await.unwrap();
    catalog.create_book(CreateBook::new("Excession", author.id)).await.unwrap();
    let other = catalog.create_author(CreateAuthor::new("Isaac Asimov")).await.unwrap();
    catalog.create_book(CreateBook::new("Foundation", other.id)).await.unwrap();

    let response = app.oneshot(get("/?query=BANKS&sort=title")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(!html.contains("Foundation"));
    let excession = html.find("Excession").expect("Excession missing");
    let wasp = html.find("The Wasp Factory").expect("The Wasp Factory missing");
    assert!(excession < wasp);
}

#[tokio::test]
async fn test_add_author_redirects_with_notice() {
    let (app, catalog) = setup().await;

    let response = app
        .clone()
        .oneshot(form("/add_author", "name=Jane+Doe&birth_date=1950-01-01&date_of_death="))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/add_author");
    let cookie = notice_cookie(&response);

    let authors = catalog.list_authors().await.unwrap();
    assert_eq!(authors.len(), 1);
    assert_eq!(authors[0].name, "Jane Doe");
    assert_eq!(authors[0].birth_date.as_deref(), Some("1950-01-01"));
    assert_eq!(authors[0].date_of_death, None);

    // The next page shows the notice once and clears it
    let response = app
        .oneshot(
            Request::builder()
                .uri("/add_author")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_some());
    assert!(body_text(response).await.contains("Author added successfully!"));
}

#[tokio::test]
async fn test_add_author_without_name_is_rejected() {
    let (app, catalog) = setup().await;

    let response = app
        .oneshot(form("/add_author", "birth_date=1950"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(response).await.contains("Author name is required"));
    assert!(catalog.list_authors().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_add_book_form_lists_authors() {
    let (app, catalog) = setup().await;
    let author = catalog.create_author(CreateAuthor::new("Jane Doe")).await.unwrap();

    let response = app.oneshot(get("/add_book")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(&format!("<option value=\"{}\">Jane Doe</option>", author.id)));
}

#[tokio::test]
async fn test_add_book_redirects() {
    let (app, catalog) = setup().await;
    let author = catalog.create_author(CreateAuthor::new("Jane Doe")).await.unwrap();

    let body = format!(
        "isbn=123&title=X&publication_year=2001&author_id={}",
        author.id
    );
    let response = app.oneshot(form("/add_book", &body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/add_book");
    notice_cookie(&response);

    let books = catalog.list_books(&BookQuery::default()).await.unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "X");
    assert_eq!(books[0].author_name, "Jane Doe");
}

#[tokio::test]
async fn test_add_book_for_missing_author() {
    let (app, catalog) = setup().await;

    let response = app
        .oneshot(form("/add_book", "title=X&author_id=99"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Author with id 99 not found"));
    assert!(catalog.list_books(&BookQuery::default()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_add_book_with_bad_author_id() {
    let (app, _) = setup().await;

    let response = app
        .oneshot(form("/add_book", "title=X&author_id=abc"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(response).await.contains("Invalid author id: abc"));
}

#[tokio::test]
async fn test_delete_book_cascades_and_redirects() {
    let (app, catalog) = setup().await;
    let author = catalog.create_author(CreateAuthor::new("Jane Doe")).await.unwrap();
    let book = catalog.create_book(CreateBook::new("X", author.id)).await.unwrap();

    let response = app
        .clone()
        .oneshot(form(&format!("/book/{}/delete", book.id), ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    let cookie = notice_cookie(&response);

    assert!(catalog.list_books(&BookQuery::default()).await.unwrap().is_empty());
    assert!(catalog.list_authors().await.unwrap().is_empty());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let html = body_text(response).await;
    assert!(html.contains("Book deleted successfully!"));
    assert!(html.contains("Author Jane Doe removed"));
    assert!(html.contains("No books found."));
}

#[tokio::test]
async fn test_delete_missing_book_is_not_found() {
    let (app, _) = setup().await;

    let response = app.oneshot(form("/book/404/delete", "")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Book with id 404 not found"));
}

#[tokio::test]
async fn test_delete_with_non_integer_id_is_not_found() {
    let (app, catalog) = setup().await;
    let author = catalog.create_author(CreateAuthor::new("Jane Doe")).await.unwrap();
    catalog.create_book(CreateBook::new("X", author.id)).await.unwrap();

    let response = app.clone().oneshot(form("/book/abc/delete", "")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Book with id abc not found"));

    let response = app.oneshot(form("/book/1.5/delete", "")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    assert_eq!(catalog.list_books(&BookQuery::default()).await.unwrap().len(), 1);
}
