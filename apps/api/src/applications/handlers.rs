//! Axum route handlers for the Application API.

use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::applications::service::{self, SubmitApplication};
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::application::{Application, EmployerApplication, SeekerApplication};
use crate::state::AppState;
use crate::storage::ResumeUpload;

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
    pub application: Application,
}

#[derive(Debug, Serialize)]
pub struct EmployerListResponse {
    pub success: bool,
    pub applications: Vec<EmployerApplication>,
}

#[derive(Debug, Serialize)]
pub struct SeekerListResponse {
    pub success: bool,
    pub applications: Vec<SeekerApplication>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

/// POST /api/v1/application/post
pub async fn handle_post_application(
    State(state): State<AppState>,
    caller: AuthUser,
    multipart: Multipart,
) -> Result<Json<SubmitResponse>, AppError> {
    let input = collect_submission(multipart).await?;
    let application = service::submit_application(
        state.applications.as_ref(),
        state.resumes.as_ref(),
        &caller,
        input,
    )
    .await?;

    Ok(Json(SubmitResponse {
        success: true,
        message: "Application Submitted!".to_string(),
        application,
    }))
}

/// GET /api/v1/application/employer/getall
pub async fn handle_employer_get_all(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<EmployerListResponse>, AppError> {
    let applications =
        service::applications_for_employer(state.applications.as_ref(), &caller).await?;
    Ok(Json(EmployerListResponse {
        success: true,
        applications,
    }))
}

/// GET /api/v1/application/jobseeker/getall
pub async fn handle_jobseeker_get_all(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<SeekerListResponse>, AppError> {
    let applications =
        service::applications_for_job_seeker(state.applications.as_ref(), &caller).await?;
    Ok(Json(SeekerListResponse {
        success: true,
        applications,
    }))
}

/// DELETE /api/v1/application/delete/:id
pub async fn handle_delete_application(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, AppError> {
    service::delete_application(state.applications.as_ref(), &caller, id).await?;
    Ok(Json(DeleteResponse {
        success: true,
        message: "Application Deleted!".to_string(),
    }))
}

/// Drains the multipart body into the submission form. Field names match
/// the browser form; unknown fields are ignored.
async fn collect_submission(mut multipart: Multipart) -> Result<SubmitApplication, AppError> {
    let mut input = SubmitApplication::default();

    while let Some(field) = multipart.next_field().await.map_err(bad_form)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "resume" => {
                let filename = field.file_name().unwrap_or("resume").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(bad_form)?;
                input.resume = Some(ResumeUpload {
                    filename,
                    content_type,
                    bytes,
                });
            }
            "name" => input.name = Some(field.text().await.map_err(bad_form)?),
            "email" => input.email = Some(field.text().await.map_err(bad_form)?),
            "coverLetter" => input.cover_letter = Some(field.text().await.map_err(bad_form)?),
            "phone" => input.phone = Some(field.text().await.map_err(bad_form)?),
            "address" => input.address = Some(field.text().await.map_err(bad_form)?),
            "jobId" => input.job_id = Some(field.text().await.map_err(bad_form)?),
            _ => {}
        }
    }

    Ok(input)
}

fn bad_form(e: MultipartError) -> AppError {
    tracing::warn!("Rejected malformed multipart body: {e}");
    AppError::Validation("Malformed form data.".to_string())
}
