//! Typed error type for the db crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlx error: {0}")]
    Sqlx(#[source] sqlx::Error),

    /// A write hit a unique constraint; `constraint` names which one.
    #[error("unique constraint {constraint} violated: {message}")]
    UniqueViolation { constraint: String, message: String },

    #[error("could not decode row: {0}")]
    Decode(#[from] serde_json::Error),

    /// A company with this handle already exists.
    #[error("duplicate company: {0}")]
    DuplicateEntity(String),

    /// Both employee bounds were given and `min` exceeds `max`.
    #[error("minEmployees ({min}) cannot be greater than maxEmployees ({max})")]
    InvalidRange { min: i32, max: i32 },

    #[error("no company: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            if db.is_unique_violation() {
                return Self::UniqueViolation {
                    constraint: db.constraint().unwrap_or("unknown").to_owned(),
                    message: db.message().to_owned(),
                };
            }
        }
        Self::Sqlx(e)
    }
}

impl DbError {
    /// HTTP-style status a caller should surface for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::DuplicateEntity(_) | Self::UniqueViolation { .. } => 409,
            Self::InvalidRange { .. } | Self::BadRequest(_) => 400,
            Self::NotFound(_) => 404,
            Self::Sqlx(_) | Self::Decode(_) => 500,
        }
    }

    /// True when a write was rejected by the unique constraint `name`.
    pub(crate) fn violates(&self, name: &str) -> bool {
        matches!(self, Self::UniqueViolation { constraint, .. } if constraint == name)
    }
}
