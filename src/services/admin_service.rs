use std::sync::Arc;

use mongodb::bson::oid::ObjectId;

use crate::{
    auth::{Identity, JwtService, PasswordHasher},
    errors::{AppError, AppResult},
    models::{
        domain::{Admin, Course},
        dto::{
            request::{
                CreateCourseRequest, SigninRequest, SignupRequest, UpdateCourseRequest,
                ValidateInOrder,
            },
            response::{
                AdminCourseDto, AdminCoursesResponse, CourseCreatedResponse, MessageResponse,
                TokenResponse,
            },
        },
    },
    repositories::{AdminRepository, CourseRepository},
};

pub struct AdminService {
    admins: Arc<dyn AdminRepository>,
    courses: Arc<dyn CourseRepository>,
    jwt_service: Arc<JwtService>,
    hasher: PasswordHasher,
}

impl AdminService {
    pub fn new(
        admins: Arc<dyn AdminRepository>,
        courses: Arc<dyn CourseRepository>,
        jwt_service: Arc<JwtService>,
        hasher: PasswordHasher,
    ) -> Self {
        Self {
            admins,
            courses,
            jwt_service,
            hasher,
        }
    }

    pub async fn signup(&self, request: SignupRequest) -> AppResult<MessageResponse> {
        request.validate_in_order()?;

        if self.admins.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::AlreadyExists("Admin already exists".to_string()));
        }

        let password_hash = self.hasher.hash_password(&request.password).await?;
        let admin = self
            .admins
            .create(Admin::from_signup(request, password_hash))
            .await?;

        log::info!("Admin {} signed up", admin.id);
        Ok(MessageResponse::new("Admin created successfully"))
    }

    pub async fn signin(&self, request: SigninRequest) -> AppResult<TokenResponse> {
        request.validate_in_order()?;

        let admin = self
            .admins
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::NotFound("No admin exists with that email".to_string()))?;

        if !self
            .hasher
            .verify_password(&request.password, &admin.password_hash)
            .await?
        {
            log::warn!("Failed signin for admin {}", admin.id);
            return Err(AppError::InvalidCredentials("Password is incorrect".to_string()));
        }

        let token = self.jwt_service.issue_token(&Identity::admin(admin.id))?;
        Ok(TokenResponse { token })
    }

    pub async fn create_course(
        &self,
        admin_id: ObjectId,
        request: CreateCourseRequest,
    ) -> AppResult<CourseCreatedResponse> {
        request.validate_in_order()?;

        let duplicate = self
            .courses
            .find_by_title_and_description(&request.title, &request.description)
            .await?;
        if duplicate.is_some() {
            return Err(AppError::AlreadyExists("Course already exists".to_string()));
        }

        let course = self
            .courses
            .create(Course::from_request(request, admin_id))
            .await?;

        log::info!("Admin {} created course {}", admin_id, course.id);
        Ok(CourseCreatedResponse {
            message: "Course created successfully".to_string(),
            course_id: course.id.to_hex(),
        })
    }

    pub async fn update_course(
        &self,
        admin_id: ObjectId,
        request: UpdateCourseRequest,
    ) -> AppResult<MessageResponse> {
        request.validate_in_order()?;
        let course_id = request.course_object_id()?;

        let updated = self
            .courses
            .update(&course_id, request.into(), &admin_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

        log::info!("Admin {} updated course {}", admin_id, updated.id);
        Ok(MessageResponse::new("Course updated successfully"))
    }

    pub async fn list_courses(&self, admin_id: ObjectId) -> AppResult<AdminCoursesResponse> {
        let courses = self.courses.find_by_creator(&admin_id).await?;

        Ok(AdminCoursesResponse {
            course: courses.into_iter().map(AdminCourseDto::from).collect(),
        })
    }
}
