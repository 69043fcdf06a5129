//! Catalog management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        author::{Author, CreateAuthor},
        book::{Book, BookDeletion, BookQuery, BookWithAuthor, CreateBook},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List books, optionally filtered by title/author and sorted
    pub async fn list_books(&self, query: &BookQuery) -> AppResult<Vec<BookWithAuthor>> {
        let filter = query.filter();
        let sort = query.sort_key();
        tracing::debug!(
            "Listing books - filter: {:?}, sort: {:?}",
            filter,
            sort.map(|s| s.as_str())
        );
        self.repository.books.list(filter, sort).await
    }

    /// List every author, by name
    pub async fn list_authors(&self) -> AppResult<Vec<Author>> {
        self.repository.authors.list().await
    }

    /// Get author by ID
    pub async fn find_author(&self, id: i64) -> AppResult<Author> {
        self.repository.authors.get_by_id(id).await
    }

    /// Books written by one author
    pub async fn list_books_by_author(&self, author_id: i64) -> AppResult<Vec<Book>> {
        // Verify author exists
        self.repository.authors.get_by_id(author_id).await?;
        self.repository.books.list_by_author(author_id).await
    }

    /// Create a new author
    pub async fn create_author(&self, data: CreateAuthor) -> AppResult<Author> {
        data.validate()?;
        let author = self.repository.authors.create(&data).await?;
        tracing::info!("Catalog: created author id={} name={:?}", author.id, author.name);
        Ok(author)
    }

    /// Create a new book for an existing author
    pub async fn create_book(&self, data: CreateBook) -> AppResult<Book> {
        data.validate()?;
        let book = self.repository.books.create(&data).await?;
        tracing::info!(
            "Catalog: created book id={} title={:?} author_id={}",
            book.id,
            book.title,
            book.author_id
        );
        Ok(book)
    }

    /// Delete a book, removing its author if it was their last one
    pub async fn delete_book(&self, id: i64) -> AppResult<BookDeletion> {
        let deletion = match self.repository.books.delete(id).await {
            Ok(deletion) => deletion,
            Err(e @ AppError::NotFound(_)) => {
                tracing::warn!("Catalog: cannot delete book id={}: {}", id, e);
                return Err(e);
            }
            // Store failures are logged once, when the error page is rendered
            Err(e) => return Err(e),
        };

        tracing::info!("Catalog: deleted book id={} title={:?}", deletion.book.id, deletion.book.title);
        if let Some(ref author) = deletion.removed_author {
            tracing::info!(
                "Catalog: removed author id={} name={:?} (no books left)",
                author.id,
                author.name
            );
        }
        Ok(deletion)
    }

    /// Check that the store answers
    pub async fn check_store(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
