pub mod health;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::applications::handlers as application_handlers;
use crate::jobs::handlers as job_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Job API
        .route("/api/v1/job/getall", get(job_handlers::handle_get_all_jobs))
        .route("/api/v1/job/post", post(job_handlers::handle_post_job))
        .route(
            "/api/v1/job/getmyjobs",
            get(job_handlers::handle_get_my_jobs),
        )
        .route(
            "/api/v1/job/update/:id",
            put(job_handlers::handle_update_job),
        )
        .route(
            "/api/v1/job/delete/:id",
            delete(job_handlers::handle_delete_job),
        )
        .route("/api/v1/job/:id", get(job_handlers::handle_get_job))
        // Application API
        .route(
            "/api/v1/application/post",
            post(application_handlers::handle_post_application),
        )
        .route(
            "/api/v1/application/employer/getall",
            get(application_handlers::handle_employer_get_all),
        )
        .route(
            "/api/v1/application/jobseeker/getall",
            get(application_handlers::handle_jobseeker_get_all),
        )
        .route(
            "/api/v1/application/delete/:id",
            delete(application_handlers::handle_delete_application),
        )
        .with_state(state)
}
