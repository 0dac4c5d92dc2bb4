use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info, warn};
use std::sync::Arc;
use uuid::Uuid;

use super::credentials::{generate_api_token, is_well_formed_api_token, CredentialHasher};
use super::users_model::{ApiKey, CreatedApiKey, NewApiKey};
use super::users_traits::{ApiKeyServiceTrait, UserRepositoryTrait};
use crate::errors::{Error, Result};

const INVALID_TOKEN: &str = "Invalid or revoked API key";

pub struct ApiKeyService {
    repository: Arc<dyn UserRepositoryTrait>,
    hasher: CredentialHasher,
}

impl ApiKeyService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>, hasher: CredentialHasher) -> Self {
        Self { repository, hasher }
    }
}

#[async_trait]
impl ApiKeyServiceTrait for ApiKeyService {
    async fn create_api_key(&self, user_id: &str, new_key: NewApiKey) -> Result<CreatedApiKey> {
        new_key.validate()?;
        // Make sure the owner exists before minting anything.
        self.repository.get_by_id(user_id)?;

        let token = generate_api_token();
        let key_hash = self.hasher.hash_blocking(&token).await?;
        let key = ApiKey {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: new_key.name.trim().to_string(),
            key_hash,
            created_at: Utc::now().naive_utc(),
            revoked_at: None,
        };
        let key = self.repository.insert_api_key(key).await?;
        info!("Created API key {} for user {}", key.id, user_id);
        Ok(CreatedApiKey { key, token })
    }

    fn list_api_keys(&self, user_id: &str) -> Result<Vec<ApiKey>> {
        let mut keys = self.repository.get_by_id(user_id)?.api_keys;
        keys.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(keys)
    }

    async fn revoke_api_key(&self, user_id: &str, key_id: &str) -> Result<ApiKey> {
        let user = self.repository.get_by_id(user_id)?;
        let key = user
            .api_keys
            .into_iter()
            .find(|k| k.id == key_id)
            .ok_or_else(|| Error::NotFound("API key".to_string()))?;
        if !key.is_active() {
            return Ok(key);
        }
        let revoked = self
            .repository
            .revoke_api_key(&key.id, Utc::now().naive_utc())
            .await?;
        info!("Revoked API key {} for user {}", revoked.id, user_id);
        Ok(revoked)
    }

    fn authenticate_bearer(&self, token: &str) -> Result<String> {
        let token = token.trim();
        if !is_well_formed_api_token(token) {
            debug!("Rejected malformed bearer token");
            return Err(Error::Unauthorized(INVALID_TOKEN.to_string()));
        }

        for user in self.repository.list_all()? {
            for key in user.active_api_keys() {
                match self.hasher.verify(token, &key.key_hash) {
                    Ok(true) => return Ok(user.id.clone()),
                    Ok(false) => {}
                    Err(e) => warn!("Skipping API key {} with unreadable hash: {}", key.id, e),
                }
            }
        }
        Err(Error::Unauthorized(INVALID_TOKEN.to_string()))
    }
}
