//! Loan view models
//!
//! A loan is a plain (username, book_id) row; it only ever leaves the
//! database joined with its book, so these are the join shapes.

use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// Loan joined with its book, for the administrator view. Loans whose book
/// no longer exists are excluded by the inner join.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct BorrowedBookView {
    #[serde(rename = "id")]
    pub book_id: i64,
    pub title: String,
    pub author: String,
    pub genre: String,
    #[serde(rename = "borrowedBy")]
    pub borrowed_by: String,
}

/// Loan joined with its book, for a single reader's view
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct UserLoanView {
    #[serde(rename = "id")]
    pub book_id: i64,
    pub title: String,
    pub author: String,
    pub genre: String,
}
