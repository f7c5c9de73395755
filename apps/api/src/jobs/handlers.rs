//! Axum route handlers for the Job API. Job mutations are Employer-only;
//! reads are open to any authenticated caller.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::job::JobRow;
use crate::models::user::Role;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostJobInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub location: Option<String>,
    pub fixed_salary: Option<i64>,
    pub salary_from: Option<i64>,
    pub salary_to: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub location: Option<String>,
    pub fixed_salary: Option<i64>,
    pub salary_from: Option<i64>,
    pub salary_to: Option<i64>,
    pub expired: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct JobListResponse {
    pub success: bool,
    pub jobs: Vec<JobRow>,
}

#[derive(Debug, Serialize)]
pub struct MyJobsResponse {
    pub success: bool,
    #[serde(rename = "myJobs")]
    pub my_jobs: Vec<JobRow>,
}

#[derive(Debug, Serialize)]
pub struct JobResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub job: JobRow,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

/// GET /api/v1/job/getall
pub async fn handle_get_all_jobs(
    State(state): State<AppState>,
    _caller: AuthUser,
) -> Result<Json<JobListResponse>, AppError> {
    let jobs = sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE expired = false")
        .fetch_all(&state.db)
        .await?;
    Ok(Json(JobListResponse {
        success: true,
        jobs,
    }))
}

/// GET /api/v1/job/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    _caller: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<JobResponse>, AppError> {
    let job = sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found.".to_string()))?;
    Ok(Json(JobResponse {
        success: true,
        message: None,
        job,
    }))
}

/// POST /api/v1/job/post
pub async fn handle_post_job(
    State(state): State<AppState>,
    caller: AuthUser,
    Json(input): Json<PostJobInput>,
) -> Result<Json<JobResponse>, AppError> {
    require_employer(&caller)?;
    validate_job_details(&input)?;

    let job = sqlx::query_as::<_, JobRow>(
        r#"
        INSERT INTO jobs
            (id, title, description, category, country, city, location,
             fixed_salary, salary_from, salary_to, expired, posted_by)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, false, $11)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&input.title)
    .bind(&input.description)
    .bind(&input.category)
    .bind(&input.country)
    .bind(&input.city)
    .bind(&input.location)
    .bind(input.fixed_salary)
    .bind(input.salary_from)
    .bind(input.salary_to)
    .bind(caller.user_id)
    .fetch_one(&state.db)
    .await?;

    info!("Job {} posted by {}", job.id, caller.user_id);
    Ok(Json(JobResponse {
        success: true,
        message: Some("Job Posted Successfully!".to_string()),
        job,
    }))
}

/// GET /api/v1/job/getmyjobs
pub async fn handle_get_my_jobs(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<MyJobsResponse>, AppError> {
    require_employer(&caller)?;
    let my_jobs = sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE posted_by = $1")
        .bind(caller.user_id)
        .fetch_all(&state.db)
        .await?;
    Ok(Json(MyJobsResponse {
        success: true,
        my_jobs,
    }))
}

/// PUT /api/v1/job/update/:id
pub async fn handle_update_job(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateJobInput>,
) -> Result<Json<JobResponse>, AppError> {
    require_employer(&caller)?;

    // Absent fields keep their stored value.
    let job = sqlx::query_as::<_, JobRow>(
        r#"
        UPDATE jobs SET
            title        = COALESCE($2, title),
            description  = COALESCE($3, description),
            category     = COALESCE($4, category),
            country      = COALESCE($5, country),
            city         = COALESCE($6, city),
            location     = COALESCE($7, location),
            fixed_salary = COALESCE($8, fixed_salary),
            salary_from  = COALESCE($9, salary_from),
            salary_to    = COALESCE($10, salary_to),
            expired      = COALESCE($11, expired)
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&input.title)
    .bind(&input.description)
    .bind(&input.category)
    .bind(&input.country)
    .bind(&input.city)
    .bind(&input.location)
    .bind(input.fixed_salary)
    .bind(input.salary_from)
    .bind(input.salary_to)
    .bind(input.expired)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound("OOPS! Job not found.".to_string()))?;

    Ok(Json(JobResponse {
        success: true,
        message: Some("Job Updated!".to_string()),
        job,
    }))
}

/// DELETE /api/v1/job/delete/:id
/// Does not cascade: applications referencing this job's employer remain.
pub async fn handle_delete_job(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    require_employer(&caller)?;

    let deleted = sqlx::query("DELETE FROM jobs WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;
    if deleted.rows_affected() == 0 {
        return Err(AppError::NotFound("OOPS! Job not found.".to_string()));
    }

    info!("Job {id} deleted by {}", caller.user_id);
    Ok(Json(MessageResponse {
        success: true,
        message: "Job Deleted!".to_string(),
    }))
}

/// Gate shared by every job mutation: post, getmyjobs, update, delete.
fn require_employer(caller: &AuthUser) -> Result<(), AppError> {
    if caller.role == Role::JobSeeker {
        return Err(AppError::RoleForbidden(Role::JobSeeker));
    }
    Ok(())
}

/// Full-details check plus the fixed-versus-ranged salary rule: a posting
/// carries exactly one of the two shapes.
fn validate_job_details(input: &PostJobInput) -> Result<(), AppError> {
    let missing = [
        &input.title,
        &input.description,
        &input.category,
        &input.country,
        &input.city,
        &input.location,
    ]
    .iter()
    .any(|f| f.as_deref().map(str::trim).filter(|s| !s.is_empty()).is_none());
    if missing {
        return Err(AppError::Validation(
            "Please provide full job details.".to_string(),
        ));
    }

    let ranged = input.salary_from.is_some() || input.salary_to.is_some();
    if input.fixed_salary.is_some() && ranged {
        return Err(AppError::Validation(
            "Cannot enter fixed and ranged salary together.".to_string(),
        ));
    }
    if input.fixed_salary.is_none() && !(input.salary_from.is_some() && input.salary_to.is_some())
    {
        return Err(AppError::Validation(
            "Please either provide fixed salary or ranged salary.".to_string(),
        ));
    }
    Ok(())
}
