use kipo_core::errors::{DatabaseError, Error};
use kipo_core::goals::{Goal, GoalRepositoryTrait, ReminderFrequency};
use kipo_core::Result;

use super::model::GoalDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::goals;
use crate::schema::goals::dsl::*;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use std::sync::Arc;

pub struct GoalRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GoalRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        GoalRepository { pool, writer }
    }
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    async fn insert_goal(&self, goal: Goal) -> Result<Goal> {
        let goal_db = GoalDB::try_from(goal).into_core()?;
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let result_db = diesel::insert_into(goals::table)
                    .values(&goal_db)
                    .returning(GoalDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Goal::from(result_db))
            })
            .await
    }

    async fn update_goal(&self, goal_update: Goal) -> Result<Goal> {
        let goal_db = GoalDB::try_from(goal_update).into_core()?;
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let goal_id_owned = goal_db.id.clone();
                let affected = diesel::update(goals.find(&goal_id_owned))
                    .set(&goal_db)
                    .execute(conn)
                    .into_core()?;
                if affected == 0 {
                    return Err(Error::Database(DatabaseError::NotFound(goal_id_owned)));
                }
                let result_db = goals
                    .filter(id.eq(goal_id_owned))
                    .select(GoalDB::as_select())
                    .first::<GoalDB>(conn)
                    .into_core()?;
                Ok(Goal::from(result_db))
            })
            .await
    }

    async fn delete_goal(&self, goal_id_to_delete: &str) -> Result<usize> {
        let goal_id_to_delete = goal_id_to_delete.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(goals.find(goal_id_to_delete))
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    fn find_goal(&self, goal_id: &str) -> Result<Option<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(goals
            .find(goal_id)
            .select(GoalDB::as_select())
            .first::<GoalDB>(&mut conn)
            .optional()
            .into_core()?
            .map(Goal::from))
    }

    fn load_goals(&self, owner_id: &str, active_only: bool) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = goals
            .filter(user_id.eq(owner_id))
            .select(GoalDB::as_select())
            .into_boxed();
        if active_only {
            query = query.filter(active.eq(true));
        }
        let goals_db = query
            .order((target_date.asc(), created_at.asc()))
            .load::<GoalDB>(&mut conn)
            .into_core()?;
        Ok(goals_db.into_iter().map(Goal::from).collect())
    }

    fn load_goals_with_reminders(&self) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let goals_db = goals
            .filter(active.eq(true))
            .filter(completed.eq(false))
            .filter(reminder_frequency.ne(ReminderFrequency::None.as_str()))
            .select(GoalDB::as_select())
            .load::<GoalDB>(&mut conn)
            .into_core()?;
        Ok(goals_db.into_iter().map(Goal::from).collect())
    }
}
