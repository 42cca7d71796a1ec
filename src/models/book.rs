//! Book (inventory) model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Book record from the database.
///
/// `available` and `borrowed` are coupled: outside of administrative edits,
/// a book is unavailable and borrowed exactly while one active loan
/// references it. The borrow/return workflow flips both flags together with
/// the loan row, in one transaction.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub available: bool,
    pub borrowed: bool,
}

fn default_available() -> bool {
    true
}

/// Create book request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBook {
    pub title: String,
    pub author: String,
    pub genre: String,
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default)]
    pub borrowed: bool,
}

/// Update book request. Each field is optional and independent; absent means
/// "no change", not "clear".
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBook {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub available: Option<bool>,
}
