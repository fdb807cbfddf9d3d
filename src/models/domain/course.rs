use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::models::dto::request::{CreateCourseRequest, UpdateCourseRequest};

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub image_url: String,
    pub created_by: ObjectId, // Never changes after insert
    #[serde(default)]
    pub updated_by: Vec<ObjectId>, // Append-only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl Course {
    pub fn new(
        title: &str,
        description: &str,
        price: f64,
        image_url: &str,
        created_by: ObjectId,
    ) -> Self {
        Course {
            id: ObjectId::new(),
            title: title.to_string(),
            description: description.to_string(),
            price,
            image_url: image_url.to_string(),
            created_by,
            updated_by: Vec::new(),
            created_at: Some(Utc::now()),
            modified_at: Some(Utc::now()),
        }
    }

    pub fn from_request(request: CreateCourseRequest, created_by: ObjectId) -> Self {
        Self::new(
            &request.title,
            &request.description,
            request.price,
            &request.image_url,
            created_by,
        )
    }

    /// Applies a partial update in memory, recording `editor` as an updater.
    pub fn apply(&mut self, changes: &CourseChanges, editor: ObjectId) {
        if let Some(title) = &changes.title {
            self.title = title.clone();
        }
        if let Some(description) = &changes.description {
            self.description = description.clone();
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(image_url) = &changes.image_url {
            self.image_url = image_url.clone();
        }
        self.updated_by.push(editor);
        self.modified_at = Some(Utc::now());
    }
}

/// The editable subset of a course. `None` leaves the stored value alone.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CourseChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image_url: Option<String>,
}

impl From<UpdateCourseRequest> for CourseChanges {
    fn from(request: UpdateCourseRequest) -> Self {
        CourseChanges {
            title: request.title,
            description: request.description,
            price: request.price,
            image_url: request.image_url,
        }
    }
}
