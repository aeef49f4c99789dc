//! Book model and related request/response types

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Largest price representable by the NUMERIC(6,2) column
const MAX_PRICE: Decimal = Decimal::from_parts(999_999, 0, 0, false, 2);

/// Stored book record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    /// Book title
    pub name: String,
    pub author: String,
    /// ISBN-10 or ISBN-13, unique across the catalog
    pub isbn: String,
    pub published_at: Option<NaiveDate>,
    #[schema(value_type = Option<String>, example = "19.99")]
    pub price: Option<Decimal>,
    /// Copies available for purchase
    pub stock: i32,
}

/// Book payload used by seeding and bulk import
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewBook {
    #[validate(length(min = 1, max = 255, message = "Name must be 1 to 255 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 255, message = "Author must be 1 to 255 characters"))]
    pub author: String,
    #[validate(length(min = 10, max = 13, message = "ISBN must be 10 to 13 characters"))]
    pub isbn: String,
    pub published_at: Option<NaiveDate>,
    #[schema(value_type = Option<String>)]
    pub price: Option<Decimal>,
    #[serde(default)]
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: i32,
}

impl NewBook {
    /// Validate field rules and normalize the price to two fractional digits
    pub fn checked(mut self) -> AppResult<Self> {
        self.validate()?;
        if let Some(price) = self.price {
            if price.is_sign_negative() && !price.is_zero() {
                return Err(AppError::InvalidInput("Price cannot be negative".to_string()));
            }
            let rounded = price.round_dp(2);
            if rounded > MAX_PRICE {
                return Err(AppError::InvalidInput(format!("Price cannot exceed {}", MAX_PRICE)));
            }
            self.price = Some(rounded);
        }
        Ok(self)
    }
}

/// Search filters; every supplied filter must match
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookFilter {
    /// Case-insensitive substring of the title
    pub name: Option<String>,
    /// Case-insensitive substring of the author
    pub author: Option<String>,
    /// Exact ISBN
    pub isbn: Option<String>,
}

/// Offset/limit pagination parameters
#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Number of books to skip (default: 0)
    #[serde(alias = "skip")]
    pub offset: Option<i64>,
    /// Maximum number of books to return (default and cap: 100)
    pub limit: Option<i64>,
}

/// Result of a successful purchase
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Purchase {
    /// Confirmation message naming the purchased book
    pub message: String,
    pub book: Book,
}

/// Outcome of the store's conditional stock decrement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StockDecrement {
    Decremented(Book),
    NoStock,
    NotFound,
}
