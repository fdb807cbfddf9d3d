use serde::Serialize;

use crate::models::domain::Course;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        MessageResponse {
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseCreatedResponse {
    pub message: String,
    pub course_id: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// A course as its creator sees it in the bulk listing. `updatedBy` is left out.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminCourseDto {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub image_url: String,
    pub created_by: String,
}

impl From<Course> for AdminCourseDto {
    fn from(course: Course) -> Self {
        AdminCourseDto {
            id: course.id.to_hex(),
            title: course.title,
            description: course.description,
            price: course.price,
            image_url: course.image_url,
            created_by: course.created_by.to_hex(),
        }
    }
}

/// Public catalogue entry; carries no admin references.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoursePreviewDto {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub image_url: String,
}

impl From<Course> for CoursePreviewDto {
    fn from(course: Course) -> Self {
        CoursePreviewDto {
            id: course.id.to_hex(),
            title: course.title,
            description: course.description,
            price: course.price,
            image_url: course.image_url,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchasedCourseDto {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub image_url: String,
}

impl From<Course> for PurchasedCourseDto {
    fn from(course: Course) -> Self {
        PurchasedCourseDto {
            title: course.title,
            description: course.description,
            price: course.price,
            image_url: course.image_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AdminCoursesResponse {
    pub course: Vec<AdminCourseDto>,
}

#[derive(Debug, Serialize)]
pub struct CoursesResponse<T: Serialize> {
    pub courses: Vec<T>,
}
