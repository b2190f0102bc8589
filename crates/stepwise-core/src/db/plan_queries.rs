//! Plan CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension, Row};

use crate::{
    error::{DatabaseResultExt, Result},
    models::Plan,
};

const INSERT_PLAN_SQL: &str = "INSERT INTO plans (title, content_md, created_at) VALUES (?1, ?2, ?3)";
const SELECT_PLAN_SQL: &str = "SELECT id, title, content_md, created_at FROM plans WHERE id = ?1";
// AUTOINCREMENT ids follow insertion order.
const LIST_PLANS_SQL: &str = "SELECT id, title, content_md, created_at FROM plans ORDER BY id DESC";
const DELETE_PLAN_SQL: &str = "DELETE FROM plans WHERE id = ?1";

fn plan_from_row(row: &Row<'_>) -> rusqlite::Result<Plan> {
    let created_at = row
        .get::<_, String>(3)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

    Ok(Plan {
        id: row.get::<_, i64>(0)? as u64,
        title: row.get(1)?,
        content_md: row.get(2)?,
        created_at: Some(created_at),
    })
}

impl super::Database {
    /// Stores a plan and returns it with its new ID.
    pub fn insert_plan(&mut self, title: &str, content_md: &str) -> Result<Plan> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        tx.execute(INSERT_PLAN_SQL, params![title, content_md, now.to_string()])
            .db_context("Failed to insert plan")?;
        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Plan {
            id,
            title: title.into(),
            content_md: content_md.into(),
            created_at: Some(now),
        })
    }

    /// Retrieves a plan by its ID.
    pub fn get_plan(&self, id: u64) -> Result<Option<Plan>> {
        self.connection
            .query_row(SELECT_PLAN_SQL, params![id as i64], plan_from_row)
            .optional()
            .db_context("Failed to query plan")
    }

    /// Lists all plans, newest first.
    pub fn list_plans(&self) -> Result<Vec<Plan>> {
        let mut stmt = self
            .connection
            .prepare(LIST_PLANS_SQL)
            .db_context("Failed to prepare query")?;

        let plans = stmt
            .query_map([], plan_from_row)
            .db_context("Failed to query plans")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch plans");
        plans
    }

    /// Deletes a plan. Returns `false` when no plan had that ID.
    pub fn delete_plan(&mut self, id: u64) -> Result<bool> {
        let rows = self
            .connection
            .execute(DELETE_PLAN_SQL, params![id as i64])
            .db_context("Failed to delete plan")?;
        Ok(rows > 0)
    }
}
