//! Catalog query and purchase service

use std::future::Future;

use crate::{
    config::CatalogConfig,
    error::{AppError, AppResult},
    models::book::{Book, BookFilter, NewBook, Purchase, StockDecrement},
    repository::SharedStore,
};

/// Longest accepted search term, matching the column width
const MAX_FILTER_LEN: usize = 255;

fn book_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Book {} not found", id))
}

/// Trim a filter value; blank values count as absent
fn normalize_filter(field: &str, value: Option<String>) -> AppResult<Option<String>> {
    let Some(value) = value else {
        return Ok(None);
    };
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    if value.chars().count() > MAX_FILTER_LEN {
        return Err(AppError::InvalidInput(format!(
            "{} filter cannot exceed {} characters",
            field, MAX_FILTER_LEN
        )));
    }
    Ok(Some(value.to_string()))
}

#[derive(Clone)]
pub struct CatalogService {
    store: SharedStore,
    config: CatalogConfig,
}

impl CatalogService {
    pub fn new(store: SharedStore, config: CatalogConfig) -> Self {
        Self { store, config }
    }

    /// Run a store call under the configured deadline
    async fn with_deadline<T>(&self, call: impl Future<Output = AppResult<T>>) -> AppResult<T> {
        tokio::time::timeout(self.config.operation_timeout(), call).await?
    }

    /// Get a book by ID
    pub async fn fetch_book(&self, id: i32) -> AppResult<Book> {
        self.with_deadline(self.store.get_by_id(id))
            .await?
            .ok_or_else(|| book_not_found(id))
    }

    /// List books in id order with offset/limit pagination
    pub async fn list_books(&self, offset: Option<i64>, limit: Option<i64>) -> AppResult<Vec<Book>> {
        let (offset, limit) = self.page_bounds(offset, limit)?;
        self.with_deadline(self.store.list(offset, limit)).await
    }

    /// Search books by name, author and/or ISBN
    pub async fn search_books(&self, filter: BookFilter) -> AppResult<Vec<Book>> {
        let filter = BookFilter {
            name: normalize_filter("name", filter.name)?,
            author: normalize_filter("author", filter.author)?,
            isbn: normalize_filter("isbn", filter.isbn)?,
        };
        if let Some(ref isbn) = filter.isbn {
            let len = isbn.chars().count();
            if !(10..=13).contains(&len) {
                return Err(AppError::InvalidInput(
                    "isbn filter must be 10 to 13 characters".to_string(),
                ));
            }
        }
        self.with_deadline(self.store.search(&filter)).await
    }

    /// Buy one copy of a book.
    ///
    /// A failed decrement is followed by a re-read so that a sold-out book
    /// (`OutOfStock`) is told apart from a missing one (`NotFound`).
    pub async fn purchase_book(&self, id: i32) -> AppResult<Purchase> {
        match self.with_deadline(self.store.decrement_stock(id)).await? {
            StockDecrement::Decremented(book) => {
                tracing::info!(book_id = book.id, stock = book.stock, "Purchased '{}'", book.name);
                Ok(Purchase {
                    message: format!("You purchased '{}'", book.name),
                    book,
                })
            }
            StockDecrement::NoStock => match self.with_deadline(self.store.get_by_id(id)).await? {
                Some(book) => {
                    tracing::warn!(book_id = id, "Purchase refused, '{}' is sold out", book.name);
                    Err(AppError::OutOfStock(format!("'{}' is out of stock", book.name)))
                }
                None => Err(book_not_found(id)),
            },
            StockDecrement::NotFound => Err(book_not_found(id)),
        }
    }

    /// Validate and insert books in order, stopping at the first failure
    pub async fn import_books(&self, books: Vec<NewBook>) -> AppResult<Vec<Book>> {
        let mut created = Vec::with_capacity(books.len());
        for book in books {
            let book = book.checked()?;
            created.push(self.with_deadline(self.store.insert(&book)).await?);
        }
        Ok(created)
    }

    /// Number of books in the catalog
    pub async fn count_books(&self) -> AppResult<i64> {
        self.with_deadline(self.store.count()).await
    }

    /// Check the store answers within the deadline
    pub async fn ping(&self) -> AppResult<()> {
        self.with_deadline(self.store.ping()).await
    }

    fn page_bounds(&self, offset: Option<i64>, limit: Option<i64>) -> AppResult<(i64, i64)> {
        let offset = offset.unwrap_or(0);
        if offset < 0 {
            return Err(AppError::InvalidInput("offset cannot be negative".to_string()));
        }
        let max = self.config.max_page_size.max(1);
        let limit = limit.unwrap_or(self.config.default_page_size);
        if limit <= 0 {
            return Err(AppError::InvalidInput("limit must be greater than 0".to_string()));
        }
        Ok((offset, limit.min(max)))
    }
}
