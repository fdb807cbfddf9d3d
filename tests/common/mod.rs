#![allow(dead_code, unused_macros)]

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use secrecy::SecretString;
use tokio::sync::RwLock;

use course_market_server::{
    app_state::AppState,
    config::Config,
    db::HealthProbe,
    errors::{AppError, AppResult},
    models::domain::{Admin, Course, CourseChanges, User},
    repositories::{AdminRepository, CourseRepository, UserRepository},
};

pub struct InMemoryAdminRepository {
    admins: Arc<RwLock<HashMap<ObjectId, Admin>>>,
}

impl InMemoryAdminRepository {
    pub fn new() -> Self {
        Self {
            admins: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn count_with_email(&self, email: &str) -> usize {
        let admins = self.admins.read().await;
        admins.values().filter(|a| a.email == email).count()
    }
}

#[async_trait]
impl AdminRepository for InMemoryAdminRepository {
    async fn create(&self, admin: Admin) -> AppResult<Admin> {
        let mut admins = self.admins.write().await;
        if admins.values().any(|a| a.email == admin.email) {
            return Err(AppError::AlreadyExists(format!(
                "Admin with email '{}' already exists",
                admin.email
            )));
        }
        admins.insert(admin.id, admin.clone());
        Ok(admin)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Admin>> {
        let admins = self.admins.read().await;
        Ok(admins.values().find(|a| a.email == email).cloned())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<ObjectId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn count_with_email(&self, email: &str) -> usize {
        let users = self.users.read().await;
        users.values().filter(|u| u.email == email).count()
    }

    pub async fn purchases_of(&self, email: &str) -> Vec<ObjectId> {
        let users = self.users.read().await;
        users
            .values()
            .find(|u| u.email == email)
            .map(|u| u.purchased_course_ids.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(AppError::AlreadyExists(format!(
                "User with email '{}' already exists",
                user.email
            )));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(id).cloned())
    }

    async fn add_purchase(&self, user_id: &ObjectId, course_id: &ObjectId) -> AppResult<bool> {
        let mut users = self.users.write().await;
        match users.get_mut(user_id) {
            Some(user) => {
                user.purchased_course_ids.push(*course_id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Keeps insertion order so listings come back the way they were created.
pub struct InMemoryCourseRepository {
    courses: Arc<RwLock<Vec<Course>>>,
}

impl InMemoryCourseRepository {
    pub fn new() -> Self {
        Self {
            courses: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn get(&self, id: &ObjectId) -> Option<Course> {
        let courses = self.courses.read().await;
        courses.iter().find(|c| c.id == *id).cloned()
    }
}

#[async_trait]
impl CourseRepository for InMemoryCourseRepository {
    async fn create(&self, course: Course) -> AppResult<Course> {
        let mut courses = self.courses.write().await;
        if courses.iter().any(|c| c.id == course.id) {
            return Err(AppError::AlreadyExists(format!(
                "Course with id '{}' already exists",
                course.id
            )));
        }
        courses.push(course.clone());
        Ok(course)
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Course>> {
        Ok(self.get(id).await)
    }

    async fn find_by_title_and_description(
        &self,
        title: &str,
        description: &str,
    ) -> AppResult<Option<Course>> {
        let courses = self.courses.read().await;
        Ok(courses
            .iter()
            .find(|c| c.title == title && c.description == description)
            .cloned())
    }

    async fn update(
        &self,
        id: &ObjectId,
        changes: CourseChanges,
        editor: &ObjectId,
    ) -> AppResult<Option<Course>> {
        let mut courses = self.courses.write().await;
        let Some(course) = courses.iter_mut().find(|c| c.id == *id) else {
            return Ok(None);
        };
        course.apply(&changes, *editor);
        Ok(Some(course.clone()))
    }

    async fn find_by_creator(&self, admin_id: &ObjectId) -> AppResult<Vec<Course>> {
        let courses = self.courses.read().await;
        Ok(courses
            .iter()
            .filter(|c| c.created_by == *admin_id)
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> AppResult<Vec<Course>> {
        let courses = self.courses.read().await;
        Ok(courses.clone())
    }

    async fn find_by_ids(&self, ids: &[ObjectId]) -> AppResult<Vec<Course>> {
        let courses = self.courses.read().await;
        Ok(courses
            .iter()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

pub struct StubHealth {
    pub healthy: bool,
}

#[async_trait]
impl HealthProbe for StubHealth {
    async fn ping(&self) -> AppResult<()> {
        if self.healthy {
            Ok(())
        } else {
            Err(AppError::StoreError("server selection timeout".to_string()))
        }
    }
}

pub fn test_config() -> Config {
    Config {
        mongo_conn_string: "mongodb://localhost:27017".to_string(),
        mongo_db_name: "course-market-test".to_string(),
        web_server_host: "127.0.0.1".to_string(),
        web_server_port: 3000,
        jwt_secret: SecretString::from("integration_test_secret".to_string()),
        jwt_expiration_hours: None,
        bcrypt_cost: 4,
    }
}

pub struct TestStores {
    pub admins: Arc<InMemoryAdminRepository>,
    pub users: Arc<InMemoryUserRepository>,
    pub courses: Arc<InMemoryCourseRepository>,
}

pub fn build_state(healthy: bool) -> (AppState, TestStores) {
    let stores = TestStores {
        admins: Arc::new(InMemoryAdminRepository::new()),
        users: Arc::new(InMemoryUserRepository::new()),
        courses: Arc::new(InMemoryCourseRepository::new()),
    };

    let state = AppState::from_parts(
        test_config(),
        stores.admins.clone(),
        stores.users.clone(),
        stores.courses.clone(),
        Arc::new(StubHealth { healthy }),
    );

    (state, stores)
}

pub fn make_course(title: &str, created_by: ObjectId) -> Course {
    Course::new(title, "A course", 10.0, "https://example.com/img.png", created_by)
}

/// Sends a request and returns the status with the decoded JSON body.
macro_rules! call_json {
    ($app:expr, $req:expr) => {{
        let resp = actix_web::test::call_service(&$app, $req).await;
        let status = resp.status();
        let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
        (status, body)
    }};
}
