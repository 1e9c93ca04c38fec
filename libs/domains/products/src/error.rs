use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("Product with ID {0} not found")]
    NotFound(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The store answered, but not in a way a consistent store would
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl ProductError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Report the first failing field, in field-name order.
impl From<ValidationErrors> for ProductError {
    fn from(errors: ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let first = field_errors
            .iter()
            .min_by(|(a, _), (b, _)| a.cmp(b))
            .and_then(|(field, errs)| errs.first().map(|err| (field.to_string(), err)));

        match first {
            Some((field, err)) => {
                let reason = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                ProductError::Validation { field, reason }
            }
            None => ProductError::validation("body", errors.to_string()),
        }
    }
}

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::Validation { field, reason } => AppError::InvalidField { field, reason },
            ProductError::NotFound(id) => {
                AppError::NotFound(format!("Product with ID {} not found", id))
            }
            ProductError::ServiceUnavailable(msg) => AppError::ServiceUnavailable(msg),
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
            ProductError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_codes() {
        let cases = [
            (ProductError::validation("price", "must be greater than 0"), StatusCode::UNPROCESSABLE_ENTITY),
            (ProductError::NotFound("abc".into()), StatusCode::NOT_FOUND),
            (ProductError::ServiceUnavailable("down".into()), StatusCode::SERVICE_UNAVAILABLE),
            (ProductError::Internal("lost".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (ProductError::Database("reset".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_not_found_message_names_the_id() {
        let err = ProductError::NotFound("7c1e".into());
        assert_eq!(err.to_string(), "Product with ID 7c1e not found");
    }
}
