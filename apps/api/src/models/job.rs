use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A job posting. Created and mutated only by Employers; readable by any
/// authenticated caller. Salary is either `fixed_salary` or the
/// `salary_from`/`salary_to` pair, never both.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub country: String,
    pub city: String,
    pub location: String,
    pub fixed_salary: Option<i64>,
    pub salary_from: Option<i64>,
    pub salary_to: Option<i64>,
    pub expired: bool,
    pub posted_by: Uuid,
    pub posted_on: DateTime<Utc>,
}
