/// Error types for board-service
///
/// Only backend failures live here. Validation misses and absent posts are
/// not errors in this application: they turn into a flash notice plus a
/// redirect inside the handler that detected them.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

/// Result type for board-service operations
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Template(_) | AppError::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        tracing::error!(error = %self, "request failed");

        HttpResponse::build(self.status_code())
            .content_type("text/html; charset=utf-8")
            .body(
                "<!DOCTYPE html><html lang=\"ko\"><head><meta charset=\"utf-8\">\
                 <title>서버 오류</title></head>\
                 <body><h1>서버 오류가 발생했습니다.</h1>\
                 <p>잠시 후 다시 시도해주세요.</p></body></html>",
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_errors_map_to_internal_server_error() {
        let err = AppError::Database(sqlx::Error::PoolClosed);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_response_is_html() {
        let err = AppError::Database(sqlx::Error::PoolClosed);
        let resp = err.error_response();
        let content_type = resp
            .headers()
            .get(actix_web::http::header::CONTENT_TYPE)
            .expect("content type set");
        assert!(content_type.to_str().unwrap().starts_with("text/html"));
    }
}
