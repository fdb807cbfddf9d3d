use async_trait::async_trait;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{
    bson::{self, doc, oid::ObjectId, Document},
    options::{IndexOptions, ReturnDocument},
    Collection, IndexModel,
};

use crate::{
    db::{Database, COURSES_COLLECTION},
    errors::AppResult,
    models::domain::{Course, CourseChanges},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn create(&self, course: Course) -> AppResult<Course>;
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Course>>;
    async fn find_by_title_and_description(
        &self,
        title: &str,
        description: &str,
    ) -> AppResult<Option<Course>>;
    /// Applies `changes` and records `editor` in one atomic write.
    /// Returns the updated course, or `None` if `id` does not exist.
    async fn update(
        &self,
        id: &ObjectId,
        changes: CourseChanges,
        editor: &ObjectId,
    ) -> AppResult<Option<Course>>;
    async fn find_by_creator(&self, admin_id: &ObjectId) -> AppResult<Vec<Course>>;
    async fn find_all(&self) -> AppResult<Vec<Course>>;
    async fn find_by_ids(&self, ids: &[ObjectId]) -> AppResult<Vec<Course>>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoCourseRepository {
    collection: Collection<Course>,
}

impl MongoCourseRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(COURSES_COLLECTION);
        Self { collection }
    }

    async fn collect(&self, filter: Document) -> AppResult<Vec<Course>> {
        let cursor = self.collection.find(filter).await?;
        let courses: Vec<Course> = cursor.try_collect().await?;
        Ok(courses)
    }
}

fn set_document(changes: &CourseChanges) -> AppResult<Document> {
    let mut set = doc! { "modifiedAt": bson::to_bson(&Utc::now())? };

    if let Some(title) = &changes.title {
        set.insert("title", title.clone());
    }
    if let Some(description) = &changes.description {
        set.insert("description", description.clone());
    }
    if let Some(price) = changes.price {
        set.insert("price", price);
    }
    if let Some(image_url) = &changes.image_url {
        set.insert("imageUrl", image_url.clone());
    }

    Ok(set)
}

fn update_document(changes: &CourseChanges, editor: &ObjectId) -> AppResult<Document> {
    Ok(doc! {
        "$set": set_document(changes)?,
        "$push": { "updatedBy": *editor },
    })
}

fn ids_filter(ids: &[ObjectId]) -> Document {
    doc! { "_id": { "$in": ids.to_vec() } }
}

#[async_trait]
impl CourseRepository for MongoCourseRepository {
    async fn create(&self, course: Course) -> AppResult<Course> {
        self.collection.insert_one(&course).await?;
        Ok(course)
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Course>> {
        let course = self.collection.find_one(doc! { "_id": *id }).await?;
        Ok(course)
    }

    async fn find_by_title_and_description(
        &self,
        title: &str,
        description: &str,
    ) -> AppResult<Option<Course>> {
        let course = self
            .collection
            .find_one(doc! { "title": title, "description": description })
            .await?;
        Ok(course)
    }

    async fn update(
        &self,
        id: &ObjectId,
        changes: CourseChanges,
        editor: &ObjectId,
    ) -> AppResult<Option<Course>> {
        let update = update_document(&changes, editor)?;

        let course = self
            .collection
            .find_one_and_update(doc! { "_id": *id }, update)
            .return_document(ReturnDocument::After)
            .await?;

        Ok(course)
    }

    async fn find_by_creator(&self, admin_id: &ObjectId) -> AppResult<Vec<Course>> {
        self.collect(doc! { "createdBy": *admin_id }).await
    }

    async fn find_all(&self) -> AppResult<Vec<Course>> {
        self.collect(doc! {}).await
    }

    async fn find_by_ids(&self, ids: &[ObjectId]) -> AppResult<Vec<Course>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.collect(ids_filter(ids)).await
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let creator_index = IndexModel::builder()
            .keys(doc! { "createdBy": 1 })
            .options(
                IndexOptions::builder()
                    .name("created_by".to_string())
                    .build(),
            )
            .build();
        self.collection.create_index(creator_index).await?;

        let identity_index = IndexModel::builder()
            .keys(doc! { "title": 1, "description": 1 })
            .options(
                IndexOptions::builder()
                    .name("title_description".to_string())
                    .build(),
            )
            .build();
        self.collection.create_index(identity_index).await?;

        log::info!("Created indexes for {} collection", COURSES_COLLECTION);
        Ok(())
    }
}
