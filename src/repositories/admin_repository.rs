use async_trait::async_trait;
use mongodb::{
    bson::doc,
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::{Database, ADMINS_COLLECTION},
    errors::AppResult,
    models::domain::Admin,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn create(&self, admin: Admin) -> AppResult<Admin>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Admin>>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoAdminRepository {
    collection: Collection<Admin>,
}

impl MongoAdminRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(ADMINS_COLLECTION);
        Self { collection }
    }
}

#[async_trait]
impl AdminRepository for MongoAdminRepository {
    async fn create(&self, admin: Admin) -> AppResult<Admin> {
        self.collection.insert_one(&admin).await?;
        Ok(admin)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Admin>> {
        let admin = self.collection.find_one(doc! { "email": email }).await?;
        Ok(admin)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let options = IndexOptions::builder().unique(true).build();
        let model = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(options)
            .build();

        self.collection.create_index(model).await?;
        log::info!("Created unique index on {}.email", ADMINS_COLLECTION);

        Ok(())
    }
}
