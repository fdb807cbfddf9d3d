use crate::errors::{AppError, AppResult};

/// bcrypt with a cost fixed at startup. Hashing is CPU bound, so both
/// operations run on tokio's blocking pool.
#[derive(Clone, Copy, Debug)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub async fn hash_password(&self, plaintext: &str) -> AppResult<String> {
        let plaintext = plaintext.to_owned();
        let cost = self.cost;

        let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(plaintext, cost))
            .await
            .map_err(|e| AppError::InternalError(format!("Hashing task failed: {}", e)))??;

        Ok(hashed)
    }

    pub async fn verify_password(&self, plaintext: &str, hash: &str) -> AppResult<bool> {
        let plaintext = plaintext.to_owned();
        let hash = hash.to_owned();

        let matches = tokio::task::spawn_blocking(move || bcrypt::verify(plaintext, &hash))
            .await
            .map_err(|e| AppError::InternalError(format!("Verification task failed: {}", e)))??;

        Ok(matches)
    }
}
