//! Borrow and return endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::loan::{BorrowedBookView, UserLoanView},
};

use super::{auth::MessageResponse, AuthenticatedUser};

/// Borrow request body
#[derive(Deserialize, ToSchema)]
pub struct BorrowRequest {
    /// Book ID, must match the path parameter
    pub book_id: i64,
    /// Account the loan is recorded under
    pub username: String,
}

/// Return request body
#[derive(Deserialize, ToSchema)]
pub struct ReturnRequest {
    /// Book ID, must match the path parameter
    pub book_id: i64,
    /// Account the loan is recorded under
    pub username: String,
}

/// Borrow a book
#[utoipa::path(
    post,
    path = "/user/borrow/{book_id}",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(
        ("book_id" = i64, Path, description = "Book ID")
    ),
    request_body = BorrowRequest,
    responses(
        (status = 200, description = "Book borrowed", body = MessageResponse),
        (status = 400, description = "Path and body book IDs disagree"),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Book unavailable or already borrowed by this user")
    )
)]
pub async fn borrow_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(book_id): Path<i64>,
    Json(request): Json<BorrowRequest>,
) -> AppResult<Json<MessageResponse>> {
    claims.require_user()?;

    if request.book_id != book_id {
        return Err(AppError::Validation(
            "Book id in path does not match request body".to_string(),
        ));
    }

    state
        .services
        .loans
        .borrow(request.book_id, &request.username)
        .await?;

    Ok(Json(MessageResponse::success()))
}

/// Return a borrowed book
#[utoipa::path(
    post,
    path = "/user/return/{book_id}",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(
        ("book_id" = i64, Path, description = "Book ID")
    ),
    request_body = ReturnRequest,
    responses(
        (status = 200, description = "Book returned", body = MessageResponse),
        (status = 400, description = "Path and body book IDs disagree"),
        (status = 404, description = "No active loan for this user and book")
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(book_id): Path<i64>,
    Json(request): Json<ReturnRequest>,
) -> AppResult<Json<MessageResponse>> {
    claims.require_user()?;

    if request.book_id != book_id {
        return Err(AppError::Validation(
            "Book id in path does not match request body".to_string(),
        ));
    }

    state
        .services
        .loans
        .return_book(request.book_id, &request.username)
        .await?;

    Ok(Json(MessageResponse::success()))
}

/// Every active loan, with book details and the borrower
#[utoipa::path(
    get,
    path = "/admin/borrowed-books",
    tag = "loans",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All active loans", body = Vec<BorrowedBookView>),
        (status = 403, description = "Not an administrator")
    )
)]
pub async fn all_borrowed_books(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<BorrowedBookView>>> {
    claims.require_admin()?;

    let loans = state.services.loans.all_loans().await?;
    Ok(Json(loans))
}

/// Active loans of one user
#[utoipa::path(
    get,
    path = "/user/borrowed-books/{username}",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(
        ("username" = String, Path, description = "Account to list loans for")
    ),
    responses(
        (status = 200, description = "That user's active loans", body = Vec<UserLoanView>),
        (status = 403, description = "Not a reader account")
    )
)]
pub async fn user_borrowed_books(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(username): Path<String>,
) -> AppResult<Json<Vec<UserLoanView>>> {
    claims.require_user()?;

    let loans = state.services.loans.loans_for(&username).await?;
    Ok(Json(loans))
}
