use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::{first_violation, AppError, AppResult};

/// Validation that reports the first failing field in declaration order.
pub trait ValidateInOrder: Validate {
    const FIELD_ORDER: &'static [&'static str];

    fn validate_in_order(&self) -> AppResult<()> {
        self.validate()
            .map_err(|errors| AppError::ValidationError(first_violation(&errors, Self::FIELD_ORDER)))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,

    #[validate(email(message = "Invalid email"))]
    pub email: String,

    #[validate(length(min = 5, max = 12, message = "Password must contain 5 to 12 characters"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct SigninRequest {
    #[validate(email(message = "Invalid email"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,

    pub description: String,

    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: f64,

    #[validate(length(min = 1, message = "Image url is required"))]
    pub image_url: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    #[validate(required(message = "Course id is required"))]
    pub course_id: Option<String>,

    #[validate(length(min = 1, max = 200, message = "Title cannot be empty"))]
    pub title: Option<String>,

    pub description: Option<String>,

    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: Option<f64>,

    #[validate(length(min = 1, message = "Image url cannot be empty"))]
    pub image_url: Option<String>,
}

impl ValidateInOrder for SignupRequest {
    const FIELD_ORDER: &'static [&'static str] = &["first_name", "last_name", "email", "password"];
}

impl ValidateInOrder for SigninRequest {
    const FIELD_ORDER: &'static [&'static str] = &["email", "password"];
}

impl ValidateInOrder for CreateCourseRequest {
    const FIELD_ORDER: &'static [&'static str] = &["title", "description", "price", "image_url"];
}

impl ValidateInOrder for UpdateCourseRequest {
    const FIELD_ORDER: &'static [&'static str] =
        &["course_id", "title", "description", "price", "image_url"];
}

impl ValidateInOrder for PurchaseRequest {
    const FIELD_ORDER: &'static [&'static str] = &["course_id"];
}

impl UpdateCourseRequest {
    pub fn course_object_id(&self) -> AppResult<ObjectId> {
        let raw = self
            .course_id
            .as_deref()
            .ok_or_else(|| AppError::ValidationError("Course id is required".to_string()))?;
        parse_course_id(raw)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    #[validate(length(min = 1, message = "Course id is required"))]
    pub course_id: String,
}

impl PurchaseRequest {
    pub fn course_object_id(&self) -> AppResult<ObjectId> {
        parse_course_id(&self.course_id)
    }
}

fn parse_course_id(raw: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(raw.trim())
        .map_err(|_| AppError::ValidationError(format!("'{}' is not a valid course id", raw)))
}
