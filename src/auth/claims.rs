use chrono::{Duration, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::{
    errors::{AppError, AppResult},
    models::domain::Role,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (ObjectId hex of the admin or user)
    pub role: Role,
    pub iat: usize, // Issued at (as UTC timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<usize>, // Only present when an expiry is configured
}

impl Claims {
    pub fn new(identity: &Identity, expiration_hours: Option<i64>) -> AppResult<Self> {
        let now = Utc::now();
        let exp = match expiration_hours {
            None => None,
            Some(hours) => {
                let expires_at = Duration::try_hours(hours)
                    .and_then(|lifetime| now.checked_add_signed(lifetime))
                    .ok_or_else(|| {
                        AppError::InternalError(format!(
                            "Token lifetime of {} hours is out of range",
                            hours
                        ))
                    })?;
                Some(expires_at.timestamp() as usize)
            }
        };

        Ok(Self {
            sub: identity.id.to_hex(),
            role: identity.role,
            iat: now.timestamp() as usize,
            exp,
        })
    }
}

/// The resolved caller of a guarded request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub id: ObjectId,
    pub role: Role,
}

impl Identity {
    pub fn new(id: ObjectId, role: Role) -> Self {
        Self { id, role }
    }

    pub fn admin(id: ObjectId) -> Self {
        Self::new(id, Role::Admin)
    }

    pub fn user(id: ObjectId) -> Self {
        Self::new(id, Role::User)
    }
}
