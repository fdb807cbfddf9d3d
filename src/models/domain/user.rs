use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::models::dto::request::SignupRequest;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    /// Purchase history in order; the same course may appear more than once.
    #[serde(default)]
    pub purchased_course_ids: Vec<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(first_name: &str, last_name: &str, email: &str, password_hash: &str) -> Self {
        User {
            id: ObjectId::new(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            purchased_course_ids: Vec::new(),
            created_at: Some(Utc::now()),
        }
    }

    pub fn from_signup(request: SignupRequest, password_hash: String) -> Self {
        User {
            id: ObjectId::new(),
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            password_hash,
            purchased_course_ids: Vec::new(),
            created_at: Some(Utc::now()),
        }
    }
}

#[cfg(test)]
impl User {
    pub fn assert_fields(&self, first_name: &str, last_name: &str, email: &str) {
        assert_eq!(self.first_name, first_name);
        assert_eq!(self.last_name, last_name);
        assert_eq!(self.email, email);
    }
}
