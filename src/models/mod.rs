//! Data models for Shelfmark

pub mod book;
pub mod loan;
pub mod user;

// Re-export commonly used types
pub use book::{Book, CreateBook, UpdateBook};
pub use loan::{BorrowedBookView, UserLoanView};
pub use user::{Claims, Role, User};
