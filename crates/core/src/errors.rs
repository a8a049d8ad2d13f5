use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimetableError {
    #[error("{entity} with ID({id}) could not be found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("No {0} selected")]
    SelectionRequired(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl TimetableError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        TimetableError::NotFound { entity, id }
    }
}

pub type TimetableResult<T> = Result<T, TimetableError>;
