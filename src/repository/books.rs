//! Books repository for database operations.
//!
//! Mutations that touch both tables (creating a book for an author, deleting
//! a book and its orphaned author) run inside a single transaction.

use sqlx::{Executor, Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::{
        author::Author,
        book::{Book, BookDeletion, BookSort, BookWithAuthor, CreateBook},
    },
};

const BOOK_COLUMNS: &str = "id, isbn, title, publication_year, author_id";

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Sqlite>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    // =========================================================================
    // READ
    // =========================================================================

    /// List books with their author names.
    ///
    /// `filter` matches a literal, case-insensitive substring of either the
    /// title or the author name. Without `sort` rows come back by id.
    pub async fn list(
        &self,
        filter: Option<&str>,
        sort: Option<BookSort>,
    ) -> AppResult<Vec<BookWithAuthor>> {
        let mut query = String::from(
            r#"
            SELECT b.id, b.isbn, b.title, b.publication_year, b.author_id,
                   a.name AS author_name
            FROM books b
            JOIN authors a ON a.id = b.author_id
            "#,
        );

        if filter.is_some() {
            // instr() keeps % and _ literal, unlike LIKE
            query.push_str(
                " WHERE instr(lower(b.title), lower(?)) > 0 OR instr(lower(a.name), lower(?)) > 0",
            );
        }

        query.push_str(" ORDER BY ");
        query.push_str(sort.map(|s| s.order_by()).unwrap_or("b.id"));

        let mut builder = sqlx::query_as::<_, BookWithAuthor>(&query);
        if let Some(filter) = filter {
            builder = builder.bind(filter).bind(filter);
        }

        let books = builder.fetch_all(&self.pool).await?;
        Ok(books)
    }

    /// List the books of one author by title
    pub async fn list_by_author(&self, author_id: i64) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books WHERE author_id = ? ORDER BY title, id",
            BOOK_COLUMNS
        ))
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    /// Count the books of one author
    pub async fn count_by_author(&self, author_id: i64) -> AppResult<i64> {
        count_books_of(&self.pool, author_id).await
    }

    // =========================================================================
    // WRITE
    // =========================================================================

    /// Create a book for an existing author.
    ///
    /// Fails with `NotFound` and writes nothing when the author is missing.
    pub async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let author_exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM authors WHERE id = ?")
            .bind(data.author_id)
            .fetch_one(&mut *tx)
            .await?
            > 0;
        if !author_exists {
            return Err(AppError::NotFound(format!(
                "Author with id {} not found",
                data.author_id
            )));
        }

        let book = sqlx::query_as::<_, Book>(&format!(
            r#"
            INSERT INTO books (isbn, title, publication_year, author_id)
            VALUES (?, ?, ?, ?)
            RETURNING {}
            "#,
            BOOK_COLUMNS
        ))
        .bind(&data.isbn)
        .bind(&data.title)
        .bind(&data.publication_year)
        .bind(data.author_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(book)
    }

    /// Delete a book, and its author too when no other book references them.
    pub async fn delete(&self, id: i64) -> AppResult<BookDeletion> {
        let mut tx = self.pool.begin().await?;

        let book = sqlx::query_as::<_, Book>(&format!("SELECT {} FROM books WHERE id = ?", BOOK_COLUMNS))
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let removed_author = if count_books_of(&mut *tx, book.author_id).await? == 0 {
            sqlx::query_as::<_, Author>(
                "DELETE FROM authors WHERE id = ? RETURNING id, name, birth_date, date_of_death",
            )
            .bind(book.author_id)
            .fetch_optional(&mut *tx)
            .await?
        } else {
            None
        };

        tx.commit().await?;

        Ok(BookDeletion {
            book,
            removed_author,
        })
    }
}

/// Book count of one author, on the pool or inside an open transaction
async fn count_books_of<'e, E>(executor: E, author_id: i64) -> AppResult<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM books WHERE author_id = ?")
        .bind(author_id)
        .fetch_one(executor)
        .await?;
    Ok(count)
}
