//! Loans repository for database operations
//!
//! Borrow and return each run inside a single transaction so the book's
//! availability flags and the loan row always change together. Under
//! concurrent borrow attempts for one book, the conditional flip on the
//! book row is the conflict check: at most one transaction updates it.

use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::loan::{BorrowedBookView, UserLoanView},
};

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Sqlite>,
}

impl LoansRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Borrow a book: create the loan record and mark the book unavailable,
    /// atomically.
    pub async fn borrow(&self, book_id: i64, username: &str) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        // The conditional flip comes first: it takes the write lock and is
        // the availability check in one statement, so concurrent borrows
        // serialize here and the loser sees the winner's committed state.
        let flipped = sqlx::query(
            "UPDATE books SET available = 0, borrowed = 1 WHERE id = $1 AND available = 1",
        )
        .bind(book_id)
        .execute(&mut *tx)
        .await?;

        if flipped.rows_affected() == 0 {
            // Nothing flipped: the book is either out or does not exist
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE id = $1)")
                    .bind(book_id)
                    .fetch_one(&mut *tx)
                    .await?;

            return if exists {
                Err(AppError::Unavailable("Book not available".to_string()))
            } else {
                Err(AppError::NotFound("Book not found".to_string()))
            };
        }

        let already_borrowed: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM loans WHERE username = $1 AND book_id = $2)",
        )
        .bind(username)
        .bind(book_id)
        .fetch_one(&mut *tx)
        .await?;

        if already_borrowed {
            // Dropping the transaction rolls the flip back
            return Err(AppError::AlreadyBorrowed(
                "You have already borrowed this book".to_string(),
            ));
        }

        // The loan is keyed by the body-supplied username, which need not be
        // the caller's account
        let user_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(&mut *tx)
                .await?;

        if !user_exists {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        sqlx::query("INSERT INTO loans (username, book_id) VALUES ($1, $2)")
            .bind(username)
            .bind(book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    /// Return a borrowed book: delete the loan record and restore the book's
    /// flags, atomically. The book may have been deleted while on loan; its
    /// absence is tolerated.
    pub async fn return_book(&self, book_id: i64, username: &str) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM loans WHERE username = $1 AND book_id = $2")
            .bind(username)
            .bind(book_id)
            .execute(&mut *tx)
            .await?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::NotFound(
                "You have not borrowed this book".to_string(),
            ));
        }

        sqlx::query("UPDATE books SET available = 1, borrowed = 0 WHERE id = $1")
            .bind(book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    /// All active loans with their book details (administrator view).
    /// Inner join: loans whose book has been deleted are excluded.
    pub async fn list_all_with_books(&self) -> AppResult<Vec<BorrowedBookView>> {
        let loans = sqlx::query_as::<_, BorrowedBookView>(
            r#"
            SELECT l.book_id, b.title, b.author, b.genre, l.username AS borrowed_by
            FROM loans l
            JOIN books b ON l.book_id = b.id
            ORDER BY l.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(loans)
    }

    /// Active loans for one user, with book details
    pub async fn list_for_user(&self, username: &str) -> AppResult<Vec<UserLoanView>> {
        let loans = sqlx::query_as::<_, UserLoanView>(
            r#"
            SELECT l.book_id, b.title, b.author, b.genre
            FROM loans l
            JOIN books b ON l.book_id = b.id
            WHERE l.username = $1
            ORDER BY l.id
            "#,
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        Ok(loans)
    }
}
