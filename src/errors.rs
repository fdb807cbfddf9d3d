use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use mongodb::error::{ErrorKind, WriteFailure};
use serde::Serialize;
use thiserror::Error;

const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Store error: {0}")]
    StoreError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::AlreadyExists(_) => "ALREADY_EXISTS",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::InvalidCredentials(_) => "INVALID_CREDENTIALS",
            AppError::InvalidToken(_) => "INVALID_TOKEN",
            AppError::StoreError(_) => "STORE_ERROR",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Message safe to hand back to the caller. Store and internal failures
    /// are replaced with a generic line; the detail only goes to the log.
    pub fn public_message(&self) -> String {
        match self {
            AppError::ValidationError(msg)
            | AppError::AlreadyExists(msg)
            | AppError::NotFound(msg)
            | AppError::InvalidCredentials(msg)
            | AppError::InvalidToken(msg) => msg.clone(),
            AppError::StoreError(_) | AppError::InternalError(_) => {
                "Something went wrong, please try again".to_string()
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    pub code: &'static str,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::AlreadyExists(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidCredentials(_) => StatusCode::UNAUTHORIZED,
            AppError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            AppError::StoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            log::error!("{}", self);
        }

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            message: self.public_message(),
            code: self.error_code(),
        })
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        if is_duplicate_key(&err) {
            return AppError::AlreadyExists("Record already exists".to_string());
        }
        AppError::StoreError(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for AppError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        AppError::InternalError(format!("BSON serialization error: {}", err))
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(err: bcrypt::BcryptError) -> Self {
        AppError::InternalError(format!("Password hashing failed: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(first_violation(&err, &[]))
    }
}

/// Picks a single, human readable message out of a validation report.
/// Fields listed in `field_order` are checked first, in that order; any
/// others follow in name order so the choice is stable.
pub fn first_violation(errors: &validator::ValidationErrors, field_order: &[&str]) -> String {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.iter().collect();
    fields.sort_by_key(|(field, _)| {
        let name = field.to_string();
        let rank = field_order
            .iter()
            .position(|known| *known == name)
            .unwrap_or(field_order.len());
        (rank, name)
    });

    fields
        .into_iter()
        .find_map(|(field, errs)| {
            errs.first().map(|e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("Invalid value for '{}'", field),
            })
        })
        .unwrap_or_else(|| "Invalid request body".to_string())
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE
    )
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::{
        bson::{self, doc},
        error::WriteError,
    };
    use validator::Validate;

    fn write_error(code: i32) -> mongodb::error::Error {
        let write_error: WriteError =
            bson::from_document(doc! { "code": code, "errmsg": "E11000 duplicate key error" })
                .unwrap();
        ErrorKind::Write(WriteFailure::WriteError(write_error)).into()
    }

    #[derive(Validate)]
    struct Credentials {
        #[validate(length(min = 5, message = "Password must contain at least 5 character"))]
        password: String,
        #[validate(email)]
        email: String,
    }

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::NotFound("test".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::AlreadyExists("test".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::ValidationError("test".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidCredentials("test".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::InvalidToken("test".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::StoreError("test".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_messages() {
        let err = AppError::NotFound("course".into());
        assert_eq!(err.to_string(), "Not found: course");
        assert_eq!(err.public_message(), "course");
    }

    #[test]
    fn test_store_error_detail_is_not_public() {
        let err = AppError::StoreError("connection reset by peer".into());
        assert!(!err.public_message().contains("connection reset"));
        assert_eq!(err.error_code(), "STORE_ERROR");
    }

    #[test]
    fn test_validation_errors_report_first_violation() {
        let credentials = Credentials {
            password: "abc".to_string(),
            email: "not-an-email".to_string(),
        };
        let err: AppError = credentials.validate().unwrap_err().into();

        // "email" sorts before "password" and has no custom message
        match err {
            AppError::ValidationError(msg) => assert_eq!(msg, "Invalid value for 'email'"),
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_errors_use_custom_message() {
        let credentials = Credentials {
            password: "abc".to_string(),
            email: "a@b.com".to_string(),
        };
        let err: AppError = credentials.validate().unwrap_err().into();
        assert_eq!(
            err.public_message(),
            "Password must contain at least 5 character"
        );
    }

    #[test]
    fn test_validation_errors_follow_given_field_order() {
        let credentials = Credentials {
            password: "abc".to_string(),
            email: "not-an-email".to_string(),
        };
        let errors = credentials.validate().unwrap_err();
        assert_eq!(
            first_violation(&errors, &["password", "email"]),
            "Password must contain at least 5 character"
        );
    }

    #[test]
    fn test_duplicate_key_write_maps_to_already_exists() {
        let err: AppError = write_error(DUPLICATE_KEY_CODE).into();
        assert!(matches!(err, AppError::AlreadyExists(_)));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_other_write_errors_map_to_store_error() {
        let err: AppError = write_error(121).into();
        assert!(matches!(err, AppError::StoreError(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
