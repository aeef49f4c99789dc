//! Book catalog endpoints

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};

use crate::{
    error::AppResult,
    models::book::{Book, BookFilter, ListQuery, Purchase},
};

/// List books with offset/limit pagination
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(ListQuery),
    responses(
        (status = 200, description = "Books in id order", body = Vec<Book>),
        (status = 400, description = "Invalid pagination", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> AppResult<Json<Vec<Book>>> {
    let Query(query) = query?;
    let books = state
        .services
        .catalog
        .list_books(query.offset, query.limit)
        .await?;
    Ok(Json(books))
}

/// Search books by name, author or ISBN
#[utoipa::path(
    get,
    path = "/books/search",
    tag = "books",
    params(BookFilter),
    responses(
        (status = 200, description = "Matching books ordered by author, name, newest first", body = Vec<Book>),
        (status = 400, description = "Invalid filter", body = crate::error::ErrorResponse)
    )
)]
pub async fn search_books(
    State(state): State<crate::AppState>,
    filter: Result<Query<BookFilter>, QueryRejection>,
) -> AppResult<Json<Vec<Book>>> {
    let Query(filter) = filter?;
    let books = state.services.catalog.search_books(filter).await?;
    Ok(Json(books))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 400, description = "Malformed book ID", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> AppResult<Json<Book>> {
    let Path(id) = id?;
    let book = state.services.catalog.fetch_book(id).await?;
    Ok(Json(book))
}

/// Buy one copy of a book
#[utoipa::path(
    post,
    path = "/books/{id}/buy",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Purchase confirmed", body = Purchase),
        (status = 400, description = "Book is out of stock", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn buy_book(
    State(state): State<crate::AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> AppResult<Json<Purchase>> {
    let Path(id) = id?;
    let purchase = state.services.catalog.purchase_book(id).await?;
    Ok(Json(purchase))
}
