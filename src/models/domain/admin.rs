use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::models::dto::request::SignupRequest;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Admin {
    pub fn new(first_name: &str, last_name: &str, email: &str, password_hash: &str) -> Self {
        Admin {
            id: ObjectId::new(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Some(Utc::now()),
        }
    }

    pub fn from_signup(request: SignupRequest, password_hash: String) -> Self {
        Admin {
            id: ObjectId::new(),
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            password_hash,
            created_at: Some(Utc::now()),
        }
    }
}
