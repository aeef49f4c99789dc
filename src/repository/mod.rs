//! Repository layer: the catalog store abstraction and its backends

pub mod books;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::book::{Book, BookFilter, NewBook, StockDecrement},
};

pub use books::BooksRepository;
pub use memory::InMemoryBookStore;

/// Capabilities the catalog service needs from a persistence backend.
///
/// Every implementation must make `decrement_stock` atomic: concurrent calls
/// against the same book never drive stock below zero and never both succeed
/// on the last copy.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Look up a book by id
    async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>>;

    /// Books in id order, skipping `offset` and returning at most `limit`
    async fn list(&self, offset: i64, limit: i64) -> AppResult<Vec<Book>>;

    /// Books matching every supplied filter, ordered by author, name,
    /// then most recent publication first
    async fn search(&self, filter: &BookFilter) -> AppResult<Vec<Book>>;

    /// Remove one copy from stock if any is left
    async fn decrement_stock(&self, id: i32) -> AppResult<StockDecrement>;

    /// Insert a new book; a duplicate ISBN is a `Conflict`
    async fn insert(&self, book: &NewBook) -> AppResult<Book>;

    async fn count(&self) -> AppResult<i64>;

    /// Check that the backend is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// Store handle shared by every service
pub type SharedStore = Arc<dyn BookStore>;
