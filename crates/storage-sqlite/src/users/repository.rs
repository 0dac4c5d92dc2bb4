use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use kipo_core::errors::{DatabaseError, Error, Result};
use kipo_core::users::{ApiKey, User, UserRegistration, UserRepositoryTrait};

use super::model::{ApiKeyDB, UserDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{api_keys, users};

pub struct UserRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn load_user(conn: &mut SqliteConnection, user_id: &str) -> Result<User> {
    let user_db = users::table
        .find(user_id)
        .select(UserDB::as_select())
        .first::<UserDB>(conn)
        .optional()
        .into_core()?
        .ok_or_else(|| Error::Database(DatabaseError::NotFound(user_id.to_string())))?;
    let keys = ApiKeyDB::belonging_to(&user_db)
        .select(ApiKeyDB::as_select())
        .load::<ApiKeyDB>(conn)
        .into_core()?;
    Ok(user_db.into_domain(keys))
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn create(&self, registration: UserRegistration) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let now = Utc::now().naive_utc();
                let user_db = UserDB {
                    id: Uuid::new_v4().to_string(),
                    name: registration.name,
                    email: registration.email,
                    password_hash: registration.password_hash,
                    monthly_income: 0.0,
                    monthly_expenses: 0.0,
                    saving_categories: "[]".to_string(),
                    onboarding_completed: false,
                    created_at: now,
                    updated_at: now,
                };
                let inserted = diesel::insert_into(users::table)
                    .values(&user_db)
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(inserted.into_domain(Vec::new()))
            })
            .await
    }

    async fn update(&self, user: User) -> Result<User> {
        let user_db = UserDB::from(&user);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let affected = diesel::update(users::table.find(&user_db.id))
                    .set(&user_db)
                    .execute(conn)
                    .into_core()?;
                if affected == 0 {
                    return Err(Error::Database(DatabaseError::NotFound(user_db.id.clone())));
                }
                load_user(conn, &user_db.id)
            })
            .await
    }

    fn get_by_id(&self, user_id: &str) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;
        load_user(&mut conn, user_id)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let found = users::table
            .filter(users::email.eq(email))
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .into_core()?;
        match found {
            Some(user_db) => {
                let keys = ApiKeyDB::belonging_to(&user_db)
                    .select(ApiKeyDB::as_select())
                    .load::<ApiKeyDB>(&mut conn)
                    .into_core()?;
                Ok(Some(user_db.into_domain(keys)))
            }
            None => Ok(None),
        }
    }

    fn list_all(&self) -> Result<Vec<User>> {
        let mut conn = get_connection(&self.pool)?;
        let all_users = users::table
            .order(users::created_at.asc())
            .select(UserDB::as_select())
            .load::<UserDB>(&mut conn)
            .into_core()?;
        let all_keys = api_keys::table
            .order(api_keys::created_at.asc())
            .select(ApiKeyDB::as_select())
            .load::<ApiKeyDB>(&mut conn)
            .into_core()?;

        let mut keys_by_user: HashMap<String, Vec<ApiKeyDB>> = HashMap::new();
        for key in all_keys {
            keys_by_user.entry(key.user_id.clone()).or_default().push(key);
        }
        Ok(all_users
            .into_iter()
            .map(|u| {
                let keys = keys_by_user.remove(&u.id).unwrap_or_default();
                u.into_domain(keys)
            })
            .collect())
    }

    async fn insert_api_key(&self, key: ApiKey) -> Result<ApiKey> {
        let key_db = ApiKeyDB::from(key);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ApiKey> {
                let inserted = diesel::insert_into(api_keys::table)
                    .values(&key_db)
                    .returning(ApiKeyDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(ApiKey::from(inserted))
            })
            .await
    }

    async fn revoke_api_key(&self, key_id: &str, revoked_at: NaiveDateTime) -> Result<ApiKey> {
        let key_id = key_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ApiKey> {
                let updated = diesel::update(api_keys::table.find(&key_id))
                    .set(api_keys::revoked_at.eq(Some(revoked_at)))
                    .returning(ApiKeyDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .into_core()?
                    .ok_or_else(|| Error::Database(DatabaseError::NotFound(key_id.clone())))?;
                Ok(ApiKey::from(updated))
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{insert_user, test_db};

    fn api_key(user_id: &str, name: &str) -> ApiKey {
        ApiKey {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: name.to_string(),
            key_hash: format!("hash-{name}"),
            created_at: Utc::now().naive_utc(),
            revoked_at: None,
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_a_unique_violation() {
        let (pool, writer, _dir) = test_db();
        insert_user(&pool, &writer, "ana@mail.com").await;

        let repo = UserRepository::new(pool, writer);
        let err = repo
            .create(UserRegistration {
                name: "Other".to_string(),
                email: "ana@mail.com".to_string(),
                password_hash: "x".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Database(DatabaseError::UniqueViolation(_))
        ));
    }

    #[tokio::test]
    async fn update_keeps_profile_fields() {
        let (pool, writer, _dir) = test_db();
        let mut user = insert_user(&pool, &writer, "ana@mail.com").await;
        let repo = UserRepository::new(pool, writer);

        user.monthly_income = 2500.0;
        user.saving_categories = vec!["travel".to_string(), "home".to_string()];
        user.onboarding_completed = true;
        repo.update(user.clone()).await.unwrap();

        let stored = repo.find_by_email("ana@mail.com").unwrap().unwrap();
        assert_eq!(stored.monthly_income, 2500.0);
        assert_eq!(stored.saving_categories, user.saving_categories);
        assert!(stored.onboarding_completed);
    }

    #[tokio::test]
    async fn keys_are_attached_to_their_owner() {
        let (pool, writer, _dir) = test_db();
        let ana = insert_user(&pool, &writer, "ana@mail.com").await;
        let bob = insert_user(&pool, &writer, "bob@mail.com").await;
        let repo = UserRepository::new(pool, writer);

        repo.insert_api_key(api_key(&ana.id, "phone")).await.unwrap();
        repo.insert_api_key(api_key(&bob.id, "laptop")).await.unwrap();

        let all = repo.list_all().unwrap();
        assert_eq!(all.len(), 2);
        for user in all {
            assert_eq!(user.api_keys.len(), 1);
            assert_eq!(user.api_keys[0].user_id, user.id);
        }
    }

    #[tokio::test]
    async fn revoke_sets_timestamp() {
        let (pool, writer, _dir) = test_db();
        let ana = insert_user(&pool, &writer, "ana@mail.com").await;
        let repo = UserRepository::new(pool, writer);
        let key = repo.insert_api_key(api_key(&ana.id, "phone")).await.unwrap();

        let revoked = repo
            .revoke_api_key(&key.id, Utc::now().naive_utc())
            .await
            .unwrap();
        assert!(revoked.revoked_at.is_some());
        assert!(repo.get_by_id(&ana.id).unwrap().active_api_keys().next().is_none());

        let missing = repo
            .revoke_api_key("missing", Utc::now().naive_utc())
            .await
            .unwrap_err();
        assert!(matches!(missing, Error::Database(DatabaseError::NotFound(_))));
    }
}
