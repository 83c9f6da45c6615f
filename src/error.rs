use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Capacity exceeded: {0}")]
    CapacityExceeded(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl AppError {
    /// HTTP status an API surface should answer with for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::NotFound(_) => 404,
            AppError::Validation(_) => 400,
            AppError::CapacityExceeded(_) => 503,
            AppError::Database(_) | AppError::Internal(_) => 500,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Validation(_) => "BAD_REQUEST",
            AppError::CapacityExceeded(_) => "CAPACITY_EXCEEDED",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// JSON error envelope. Storage and internal details are logged, not returned.
    pub fn to_body(&self) -> serde_json::Value {
        let message = match self {
            AppError::NotFound(msg)
            | AppError::Validation(msg)
            | AppError::CapacityExceeded(msg) => msg.clone(),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Database error occurred".to_string()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                "Internal server error".to_string()
            }
        };

        json!({
            "error": {
                "code": self.error_code(),
                "message": message,
            }
        })
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_taxonomy_to_status_codes() {
        assert_eq!(AppError::NotFound("video".into()).status_code(), 404);
        assert_eq!(AppError::Validation("title".into()).status_code(), 400);
        assert_eq!(AppError::CapacityExceeded("queue".into()).status_code(), 503);
        assert_eq!(AppError::Database(sqlx::Error::RowNotFound).status_code(), 500);
    }

    #[test]
    fn body_hides_database_details() {
        let body = AppError::Database(sqlx::Error::PoolTimedOut).to_body();
        assert_eq!(body["error"]["code"], "DATABASE_ERROR");
        assert_eq!(body["error"]["message"], "Database error occurred");

        let body = AppError::NotFound("Video 42 not found".into()).to_body();
        assert_eq!(body["error"]["message"], "Video 42 not found");
    }
}
