use std::sync::Arc;

use crate::{
    auth::{JwtService, PasswordHasher},
    config::Config,
    db::{Database, HealthProbe},
    errors::AppResult,
    repositories::{
        AdminRepository, CourseRepository, MongoAdminRepository, MongoCourseRepository,
        MongoUserRepository, UserRepository,
    },
    services::{AdminService, UserService},
};

#[derive(Clone)]
pub struct AppState {
    pub admin_service: Arc<AdminService>,
    pub user_service: Arc<UserService>,
    pub jwt_service: Arc<JwtService>,
    pub health: Arc<dyn HealthProbe>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let admin_repository = Arc::new(MongoAdminRepository::new(&db));
        admin_repository.ensure_indexes().await?;

        let user_repository = Arc::new(MongoUserRepository::new(&db));
        user_repository.ensure_indexes().await?;

        let course_repository = Arc::new(MongoCourseRepository::new(&db));
        course_repository.ensure_indexes().await?;

        Ok(Self::from_parts(
            config,
            admin_repository,
            user_repository,
            course_repository,
            Arc::new(db),
        ))
    }

    /// Wires services over already constructed stores.
    pub fn from_parts(
        config: Config,
        admins: Arc<dyn AdminRepository>,
        users: Arc<dyn UserRepository>,
        courses: Arc<dyn CourseRepository>,
        health: Arc<dyn HealthProbe>,
    ) -> Self {
        let jwt_service = Arc::new(JwtService::new(
            &config.jwt_secret,
            config.jwt_expiration_hours,
        ));
        let hasher = PasswordHasher::new(config.bcrypt_cost);

        let admin_service = Arc::new(AdminService::new(
            admins,
            Arc::clone(&courses),
            Arc::clone(&jwt_service),
            hasher,
        ));
        let user_service = Arc::new(UserService::new(
            users,
            courses,
            Arc::clone(&jwt_service),
            hasher,
        ));

        Self {
            admin_service,
            user_service,
            jwt_service,
            health,
            config: Arc::new(config),
        }
    }
}
