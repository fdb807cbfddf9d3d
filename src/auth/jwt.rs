use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use mongodb::bson::oid::ObjectId;
use secrecy::{ExposeSecret, SecretString};

use crate::{
    auth::claims::{Claims, Identity},
    errors::{AppError, AppResult},
};

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiration_hours: Option<i64>,
}

impl JwtService {
    pub fn new(secret: &SecretString, expiration_hours: Option<i64>) -> Self {
        let secret_bytes = secret.expose_secret().as_bytes();

        let mut validation = Validation::default();
        if expiration_hours.is_none() {
            // Tokens are issued without `exp`, so it cannot be a required claim
            validation.set_required_spec_claims::<&str>(&[]);
        }

        Self {
            encoding_key: EncodingKey::from_secret(secret_bytes),
            decoding_key: DecodingKey::from_secret(secret_bytes),
            validation,
            expiration_hours,
        }
    }

    pub fn issue_token(&self, identity: &Identity) -> AppResult<String> {
        let claims = Claims::new(identity, self.expiration_hours)?;

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("Failed to create JWT: {}", e)))
    }

    pub fn verify_token(&self, token: &str) -> AppResult<Identity> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    AppError::InvalidToken("Token has expired".to_string())
                }
                ErrorKind::InvalidSignature => {
                    AppError::InvalidToken("Token signature is invalid".to_string())
                }
                _ => AppError::InvalidToken(format!("Token validation failed: {}", e)),
            })?;

        let id = ObjectId::parse_str(&token_data.claims.sub)
            .map_err(|_| AppError::InvalidToken("Token subject is malformed".to_string()))?;

        Ok(Identity::new(id, token_data.claims.role))
    }
}
