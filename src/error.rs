use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl AppError {
    /// Unique-constraint violations become `Conflict`; anything else stays a database error.
    pub fn conflict_on_unique(err: sqlx::Error, message: &str) -> Self {
        match err {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict(message.into())
            }
            other => AppError::Database(other),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Unauthorized | AppError::RateLimited => self.to_string(),
            AppError::Forbidden(msg)
            | AppError::NotFound(msg)
            | AppError::Validation(msg)
            | AppError::Conflict(msg) => msg.clone(),
            AppError::Database(e) => {
                tracing::error!(error = %e, "Database error");
                "Internal server error".into()
            }
            AppError::Internal(e) => {
                tracing::error!(error = %e, "Internal error");
                "Internal server error".into()
            }
        };

        let body = json!({
            "error": {
                "message": message,
                "code": status.as_u16(),
            }
        });

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use sqlx::error::DatabaseError;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_forbidden_and_not_found_are_distinct() {
        let (status, body) = body_json(AppError::Forbidden("Not authorized".into())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["message"], "Not authorized");
        assert_eq!(body["error"]["code"], 403);

        let (status, body) = body_json(AppError::NotFound("Patient not found".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["message"], "Patient not found");
    }

    #[tokio::test]
    async fn test_internal_errors_are_masked() {
        let (status, body) =
            body_json(AppError::Internal(anyhow::anyhow!("secret connection string"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["message"], "Internal server error");
    }

    #[derive(Debug)]
    struct PgConstraintError {
        unique: bool,
    }

    impl std::fmt::Display for PgConstraintError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.message())
        }
    }

    impl std::error::Error for PgConstraintError {}

    impl sqlx::error::DatabaseError for PgConstraintError {
        fn message(&self) -> &str {
            if self.unique {
                "duplicate key value violates unique constraint \"users_email_key\""
            } else {
                "insert or update violates foreign key constraint"
            }
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            if self.unique {
                sqlx::error::ErrorKind::UniqueViolation
            } else {
                sqlx::error::ErrorKind::ForeignKeyViolation
            }
        }
    }

    #[tokio::test]
    async fn test_duplicate_key_maps_to_conflict() {
        let err = sqlx::Error::Database(Box::new(PgConstraintError { unique: true }));
        let (status, body) =
            body_json(AppError::conflict_on_unique(err, "Email already in use")).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["message"], "Email already in use");
        assert_eq!(body["error"]["code"], 409);
    }

    #[test]
    fn test_other_database_errors_stay_internal() {
        let err = sqlx::Error::Database(Box::new(PgConstraintError { unique: false }));
        let mapped = AppError::conflict_on_unique(err, "Email already in use");
        assert!(matches!(mapped, AppError::Database(_)));
        assert_eq!(mapped.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let mapped = AppError::conflict_on_unique(sqlx::Error::RowNotFound, "Circle already exists");
        assert!(matches!(mapped, AppError::Database(_)));
    }

    #[test]
    fn test_validation_status() {
        assert_eq!(
            AppError::Validation("bad".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(AppError::RateLimited.status(), StatusCode::TOO_MANY_REQUESTS);
    }
}
