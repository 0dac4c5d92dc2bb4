use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use kipo_core::errors::Result;
use kipo_core::recommendations::{Recommendation, RecommendationRepositoryTrait};

use super::model::RecommendationDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::recommendations;

pub struct RecommendationRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl RecommendationRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl RecommendationRepositoryTrait for RecommendationRepository {
    async fn create_many(
        &self,
        items: Vec<Recommendation>,
    ) -> Result<Vec<Recommendation>> {
        let rows: Vec<RecommendationDB> = items.into_iter().map(RecommendationDB::from).collect();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Vec<Recommendation>> {
                diesel::insert_into(recommendations::table)
                    .values(&rows)
                    .execute(conn)
                    .into_core()?;
                Ok(rows.into_iter().map(Recommendation::from).collect())
            })
            .await
    }

    fn find_by_id(&self, recommendation_id: &str) -> Result<Option<Recommendation>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(recommendations::table
            .find(recommendation_id)
            .select(RecommendationDB::as_select())
            .first::<RecommendationDB>(&mut conn)
            .optional()
            .into_core()?
            .map(Recommendation::from))
    }

    fn list(&self, user_id: &str, limit: i64) -> Result<Vec<Recommendation>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = recommendations::table
            .filter(recommendations::user_id.eq(user_id))
            .select(RecommendationDB::as_select())
            .order(recommendations::created_at.desc())
            .limit(limit)
            .load::<RecommendationDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Recommendation::from).collect())
    }

    async fn delete(&self, recommendation_id: &str) -> Result<usize> {
        let recommendation_id = recommendation_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(recommendations::table.find(recommendation_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{insert_user, test_db};
    use chrono::{Duration, Utc};
    use kipo_core::recommendations::RecommendationType;

    fn recommendation(user_id: &str, title: &str, age_minutes: i64) -> Recommendation {
        Recommendation {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            transaction_id: None,
            recommendation_type: RecommendationType::Budget,
            title: title.to_string(),
            message: "Keep a weekly budget".to_string(),
            category: Some("food".to_string()),
            created_at: Utc::now().naive_utc() - Duration::minutes(age_minutes),
        }
    }

    #[tokio::test]
    async fn list_returns_newest_first_up_to_limit() {
        let (pool, writer, _dir) = test_db();
        let user = insert_user(&pool, &writer, "ana@mail.com").await;
        let repo = RecommendationRepository::new(pool, writer);

        repo.create_many(vec![
            recommendation(&user.id, "old", 30),
            recommendation(&user.id, "new", 1),
            recommendation(&user.id, "mid", 10),
        ])
        .await
        .unwrap();

        let titles: Vec<_> = repo
            .list(&user.id, 2)
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["new", "mid"]);
        assert_eq!(
            repo.list(&user.id, 10).unwrap()[0].recommendation_type,
            RecommendationType::Budget
        );
    }

    #[tokio::test]
    async fn delete_removes_single_row() {
        let (pool, writer, _dir) = test_db();
        let user = insert_user(&pool, &writer, "ana@mail.com").await;
        let repo = RecommendationRepository::new(pool, writer);

        let created = repo
            .create_many(vec![recommendation(&user.id, "tip", 0)])
            .await
            .unwrap();
        assert!(repo.find_by_id(&created[0].id).unwrap().is_some());
        assert_eq!(repo.delete(&created[0].id).await.unwrap(), 1);
        assert!(repo.find_by_id(&created[0].id).unwrap().is_none());
    }
}
