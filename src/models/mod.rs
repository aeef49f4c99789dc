//! Data models for the bookstore catalog

pub mod book;

pub use book::{Book, BookFilter, ListQuery, NewBook, Purchase, StockDecrement};
