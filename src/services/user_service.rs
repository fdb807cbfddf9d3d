use std::{collections::HashMap, sync::Arc};

use mongodb::bson::oid::ObjectId;

use crate::{
    auth::{Identity, JwtService, PasswordHasher},
    errors::{AppError, AppResult},
    models::{
        domain::User,
        dto::{
            request::{PurchaseRequest, SigninRequest, SignupRequest, ValidateInOrder},
            response::{
                CoursePreviewDto, CoursesResponse, MessageResponse, PurchasedCourseDto,
                TokenResponse,
            },
        },
    },
    repositories::{CourseRepository, UserRepository},
};

pub struct UserService {
    users: Arc<dyn UserRepository>,
    courses: Arc<dyn CourseRepository>,
    jwt_service: Arc<JwtService>,
    hasher: PasswordHasher,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        courses: Arc<dyn CourseRepository>,
        jwt_service: Arc<JwtService>,
        hasher: PasswordHasher,
    ) -> Self {
        Self {
            users,
            courses,
            jwt_service,
            hasher,
        }
    }

    pub async fn signup(&self, request: SignupRequest) -> AppResult<MessageResponse> {
        request.validate_in_order()?;

        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::AlreadyExists("User already exists".to_string()));
        }

        let password_hash = self.hasher.hash_password(&request.password).await?;
        let user = self
            .users
            .create(User::from_signup(request, password_hash))
            .await?;

        log::info!("User {} signed up", user.id);
        Ok(MessageResponse::new("User created successfully"))
    }

    pub async fn signin(&self, request: SigninRequest) -> AppResult<TokenResponse> {
        request.validate_in_order()?;

        let user = self
            .users
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::NotFound("No user exists with that email".to_string()))?;

        if !self
            .hasher
            .verify_password(&request.password, &user.password_hash)
            .await?
        {
            log::warn!("Failed signin for user {}", user.id);
            return Err(AppError::InvalidCredentials("Password is incorrect".to_string()));
        }

        let token = self.jwt_service.issue_token(&Identity::user(user.id))?;
        Ok(TokenResponse { token })
    }

    pub async fn preview(&self) -> AppResult<CoursesResponse<CoursePreviewDto>> {
        let courses = self.courses.find_all().await?;

        Ok(CoursesResponse {
            courses: courses.into_iter().map(CoursePreviewDto::from).collect(),
        })
    }

    pub async fn purchase(
        &self,
        user_id: ObjectId,
        request: PurchaseRequest,
    ) -> AppResult<MessageResponse> {
        request.validate_in_order()?;
        let course_id = request.course_object_id()?;

        if self.courses.find_by_id(&course_id).await?.is_none() {
            return Err(AppError::NotFound("Course not found".to_string()));
        }

        if !self.users.add_purchase(&user_id, &course_id).await? {
            return Err(AppError::NotFound("User does not exist".to_string()));
        }

        log::info!("User {} purchased course {}", user_id, course_id);
        Ok(MessageResponse::new("Purchased successfully"))
    }

    /// Purchased courses in purchase order. A course bought twice is listed
    /// twice; ids whose course no longer resolves are skipped.
    pub async fn purchases(&self, user_id: ObjectId) -> AppResult<CoursesResponse<PurchasedCourseDto>> {
        let user = self
            .users
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User does not exist".to_string()))?;

        let found = self.courses.find_by_ids(&user.purchased_course_ids).await?;
        let by_id: HashMap<ObjectId, _> = found.into_iter().map(|c| (c.id, c)).collect();

        let courses = user
            .purchased_course_ids
            .iter()
            .filter_map(|id| by_id.get(id).cloned())
            .map(PurchasedCourseDto::from)
            .collect();

        Ok(CoursesResponse { courses })
    }
}
