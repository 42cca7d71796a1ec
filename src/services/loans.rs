//! Loan management service

use crate::{
    error::AppResult,
    models::loan::{BorrowedBookView, UserLoanView},
    repository::Repository,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Borrow a book for a user
    pub async fn borrow(&self, book_id: i64, username: &str) -> AppResult<()> {
        self.repository.loans.borrow(book_id, username).await?;

        tracing::info!(book_id, username, "book borrowed");

        Ok(())
    }

    /// Return a borrowed book
    pub async fn return_book(&self, book_id: i64, username: &str) -> AppResult<()> {
        self.repository.loans.return_book(book_id, username).await?;

        tracing::info!(book_id, username, "book returned");

        Ok(())
    }

    /// All active loans with their book details (administrator view)
    pub async fn all_loans(&self) -> AppResult<Vec<BorrowedBookView>> {
        self.repository.loans.list_all_with_books().await
    }

    /// Active loans for one user, with book details
    pub async fn loans_for(&self, username: &str) -> AppResult<Vec<UserLoanView>> {
        self.repository.loans.list_for_user(username).await
    }
}
