use async_trait::async_trait;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::{Database, USERS_COLLECTION},
    errors::AppResult,
    models::domain::User,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> AppResult<User>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>>;
    /// Appends `course_id` to the user's purchases. Returns `false` when no
    /// user has the given id.
    async fn add_purchase(&self, user_id: &ObjectId, course_id: &ObjectId) -> AppResult<bool>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(USERS_COLLECTION);
        Self { collection }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        self.collection.insert_one(&user).await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = self.collection.find_one(doc! { "email": email }).await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>> {
        let user = self.collection.find_one(doc! { "_id": *id }).await?;
        Ok(user)
    }

    async fn add_purchase(&self, user_id: &ObjectId, course_id: &ObjectId) -> AppResult<bool> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": *user_id },
                doc! { "$push": { "purchasedCourseIds": *course_id } },
            )
            .await?;

        Ok(result.matched_count > 0)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let options = IndexOptions::builder().unique(true).build();
        let model = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(options)
            .build();

        self.collection.create_index(model).await?;
        log::info!("Created unique index on {}.email", USERS_COLLECTION);

        Ok(())
    }
}
