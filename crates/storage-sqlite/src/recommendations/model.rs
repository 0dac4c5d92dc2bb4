use chrono::NaiveDateTime;
use diesel::prelude::*;

use kipo_core::recommendations::{Recommendation, RecommendationType};

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::recommendations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RecommendationDB {
    pub id: String,
    pub user_id: String,
    pub transaction_id: Option<String>,
    pub recommendation_type: String,
    pub title: String,
    pub message: String,
    pub category: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<RecommendationDB> for Recommendation {
    fn from(db: RecommendationDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            transaction_id: db.transaction_id,
            // Rows are only written from validated drafts.
            recommendation_type: db
                .recommendation_type
                .parse()
                .unwrap_or(RecommendationType::Spending),
            title: db.title,
            message: db.message,
            category: db.category,
            created_at: db.created_at,
        }
    }
}

impl From<Recommendation> for RecommendationDB {
    fn from(domain: Recommendation) -> Self {
        Self {
            id: domain.id,
            user_id: domain.user_id,
            transaction_id: domain.transaction_id,
            recommendation_type: domain.recommendation_type.to_string(),
            title: domain.title,
            message: domain.message,
            category: domain.category,
            created_at: domain.created_at,
        }
    }
}
