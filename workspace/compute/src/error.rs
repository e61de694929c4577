use thiserror::Error;

/// Error types for the data-service procedures
#[derive(Error, Debug)]
pub enum ComputeError {
    /// Error from the database operations
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A referenced row does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Arguments the procedure cannot work with
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
