//! Catalog management service

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, UpdateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List every book in the catalog
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    /// Get a book by id
    pub async fn get_book(&self, id: i64) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Add a book to the catalog. A (title, author) pair may appear only once.
    pub async fn create_book(&self, book: CreateBook) -> AppResult<Book> {
        if self
            .repository
            .books
            .title_author_exists(&book.title, &book.author)
            .await?
        {
            return Err(AppError::Conflict("Book already exists".to_string()));
        }

        let created = self.repository.books.create(&book).await?;

        tracing::info!(book_id = created.id, title = %created.title, "book added to catalog");

        Ok(created)
    }

    /// Update the provided fields of an existing book; absent fields are left
    /// unchanged.
    pub async fn update_book(&self, id: i64, update: UpdateBook) -> AppResult<Book> {
        self.repository.books.update(id, &update).await
    }

    /// Remove a book. Loans referencing it are cascade-deleted by the schema.
    pub async fn delete_book(&self, id: i64) -> AppResult<()> {
        self.repository.books.delete(id).await?;

        tracing::info!(book_id = id, "book removed from catalog");

        Ok(())
    }
}
