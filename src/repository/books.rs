//! PostgreSQL-backed book repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::BookStore;
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookFilter, NewBook, StockDecrement},
};

const BOOK_COLUMNS: &str = "id, name, author, isbn, published_at, price, stock";

/// Escape LIKE wildcards so user input matches literally
fn escape_like(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books WHERE id = $1",
            BOOK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(book)
    }

    async fn list(&self, offset: i64, limit: i64) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books ORDER BY id OFFSET $1 LIMIT $2",
            BOOK_COLUMNS
        ))
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    async fn search(&self, filter: &BookFilter) -> AppResult<Vec<Book>> {
        let mut conditions = vec!["1=1".to_string()];
        let mut idx = 1;

        if non_empty(&filter.name).is_some() {
            conditions.push(format!("name ILIKE '%' || ${} || '%' ESCAPE '\\'", idx));
            idx += 1;
        }
        if non_empty(&filter.author).is_some() {
            conditions.push(format!("author ILIKE '%' || ${} || '%' ESCAPE '\\'", idx));
            idx += 1;
        }
        if non_empty(&filter.isbn).is_some() {
            conditions.push(format!("isbn = ${}", idx));
        }

        // Byte-wise collation keeps the order identical to the in-memory store
        let query = format!(
            r#"
            SELECT {}
            FROM books
            WHERE {}
            ORDER BY author COLLATE "C" ASC,
                     name COLLATE "C" ASC,
                     published_at DESC NULLS FIRST,
                     id ASC
            "#,
            BOOK_COLUMNS,
            conditions.join(" AND ")
        );

        let mut builder = sqlx::query_as::<_, Book>(&query);
        if let Some(name) = non_empty(&filter.name) {
            builder = builder.bind(escape_like(name));
        }
        if let Some(author) = non_empty(&filter.author) {
            builder = builder.bind(escape_like(author));
        }
        if let Some(isbn) = non_empty(&filter.isbn) {
            builder = builder.bind(isbn.to_string());
        }

        Ok(builder.fetch_all(&self.pool).await?)
    }

    async fn decrement_stock(&self, id: i32) -> AppResult<StockDecrement> {
        // Dropping the transaction before commit rolls it back, so a
        // cancelled call never leaves a partial decrement behind.
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, Book>(&format!(
            "UPDATE books SET stock = stock - 1 WHERE id = $1 AND stock > 0 RETURNING {}",
            BOOK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let outcome = match updated {
            Some(book) => StockDecrement::Decremented(book),
            None => {
                let exists: bool =
                    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE id = $1)")
                        .bind(id)
                        .fetch_one(&mut *tx)
                        .await?;
                if exists {
                    StockDecrement::NoStock
                } else {
                    StockDecrement::NotFound
                }
            }
        };

        tx.commit().await?;
        Ok(outcome)
    }

    async fn insert(&self, book: &NewBook) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(&format!(
            r#"
            INSERT INTO books (name, author, isbn, published_at, price, stock)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            BOOK_COLUMNS
        ))
        .bind(&book.name)
        .bind(&book.author)
        .bind(&book.isbn)
        .bind(book.published_at)
        .bind(book.price)
        .bind(book.stock)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Conflict(format!("A book with ISBN {} already exists", book.isbn))
            }
            other => AppError::Database(other),
        })
    }

    async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
