//! In-memory book store, used by tests and database-less runs

use std::{cmp::Ordering, collections::BTreeMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::BookStore;
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookFilter, NewBook, StockDecrement},
};

#[derive(Default)]
struct State {
    books: BTreeMap<i32, Book>,
    last_id: i32,
}

#[derive(Default)]
pub struct InMemoryBookStore {
    state: RwLock<State>,
}

impl InMemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Search order: author, then name, then most recent publication first
/// (undated books lead, as with PostgreSQL `DESC`), then id.
fn search_order(a: &Book, b: &Book) -> Ordering {
    let published_desc = match (a.published_at, b.published_at) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => y.cmp(&x),
    };

    a.author
        .cmp(&b.author)
        .then_with(|| a.name.cmp(&b.name))
        .then(published_desc)
        .then_with(|| a.id.cmp(&b.id))
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn matches_filter(book: &Book, filter: &BookFilter) -> bool {
    let name_ok = match filter.name.as_deref() {
        Some(name) if !name.is_empty() => contains_ci(&book.name, name),
        _ => true,
    };
    let author_ok = match filter.author.as_deref() {
        Some(author) if !author.is_empty() => contains_ci(&book.author, author),
        _ => true,
    };
    let isbn_ok = match filter.isbn.as_deref() {
        Some(isbn) if !isbn.is_empty() => book.isbn == isbn,
        _ => true,
    };
    name_ok && author_ok && isbn_ok
}

#[async_trait]
impl BookStore for InMemoryBookStore {
    async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        Ok(self.state.read().await.books.get(&id).cloned())
    }

    async fn list(&self, offset: i64, limit: i64) -> AppResult<Vec<Book>> {
        if offset < 0 || limit < 0 {
            return Err(AppError::InvalidInput(
                "offset and limit must not be negative".to_string(),
            ));
        }
        let state = self.state.read().await;
        Ok(state
            .books
            .values()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn search(&self, filter: &BookFilter) -> AppResult<Vec<Book>> {
        let state = self.state.read().await;
        let mut found: Vec<Book> = state
            .books
            .values()
            .filter(|book| matches_filter(book, filter))
            .cloned()
            .collect();
        found.sort_by(search_order);
        Ok(found)
    }

    async fn decrement_stock(&self, id: i32) -> AppResult<StockDecrement> {
        // Check and decrement under one write guard
        let mut state = self.state.write().await;
        let outcome = match state.books.get_mut(&id) {
            None => StockDecrement::NotFound,
            Some(book) if book.stock <= 0 => StockDecrement::NoStock,
            Some(book) => {
                book.stock -= 1;
                StockDecrement::Decremented(book.clone())
            }
        };
        Ok(outcome)
    }

    async fn insert(&self, book: &NewBook) -> AppResult<Book> {
        let mut state = self.state.write().await;
        if state.books.values().any(|existing| existing.isbn == book.isbn) {
            return Err(AppError::Conflict(format!(
                "A book with ISBN {} already exists",
                book.isbn
            )));
        }
        if book.stock < 0 {
            return Err(AppError::InvalidInput("Stock cannot be negative".to_string()));
        }

        state.last_id += 1;
        let stored = Book {
            id: state.last_id,
            name: book.name.clone(),
            author: book.author.clone(),
            isbn: book.isbn.clone(),
            published_at: book.published_at,
            price: book.price,
            stock: book.stock,
        };
        state.books.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.state.read().await.books.len() as i64)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
