//! Repository seam for the application workflow. The service layer only
//! sees this trait, so it can be unit-tested against an in-memory fake.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::{
    ApplicantContact, Application, ApplicationRow, EmployerApplication, EmployerContact,
    PartyRef, ResumeRef, SeekerApplication,
};
use crate::models::job::JobRow;

/// Insert parameters for a new application record.
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub name: String,
    pub email: String,
    pub cover_letter: String,
    pub phone: String,
    pub address: String,
    pub resume: Option<ResumeRef>,
    pub applicant: PartyRef,
    pub employer: PartyRef,
}

#[async_trait]
pub trait ApplicationRepo: Send + Sync {
    async fn find_job_by_id(&self, job_id: Uuid) -> Result<Option<JobRow>, AppError>;
    async fn create_application(&self, new: NewApplication) -> Result<Application, AppError>;
    async fn list_for_employer(
        &self,
        employer: Uuid,
    ) -> Result<Vec<EmployerApplication>, AppError>;
    async fn list_for_job_seeker(
        &self,
        applicant: Uuid,
    ) -> Result<Vec<SeekerApplication>, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Application>, AppError>;
    async fn delete_by_id(&self, id: Uuid) -> Result<(), AppError>;
}

pub struct PgApplicationRepo {
    pool: PgPool,
}

impl PgApplicationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, Clone, FromRow)]
struct EmployerListingRow {
    #[sqlx(flatten)]
    application: ApplicationRow,
    applicant_name: String,
    applicant_email: String,
    applicant_phone: String,
    applicant_address: String,
}

#[derive(Debug, Clone, FromRow)]
struct SeekerListingRow {
    #[sqlx(flatten)]
    application: ApplicationRow,
    employer_name: String,
    employer_email: String,
}

#[async_trait]
impl ApplicationRepo for PgApplicationRepo {
    async fn find_job_by_id(&self, job_id: Uuid) -> Result<Option<JobRow>, AppError> {
        Ok(
            sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
                .bind(job_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn create_application(&self, new: NewApplication) -> Result<Application, AppError> {
        let row = sqlx::query_as::<_, ApplicationRow>(
            r#"
            INSERT INTO applications
                (id, name, email, cover_letter, phone, address,
                 resume_public_id, resume_url,
                 applicant_user_id, applicant_role, employer_user_id, employer_role)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.cover_letter)
        .bind(&new.phone)
        .bind(&new.address)
        .bind(new.resume.as_ref().map(|r| r.public_id.as_str()))
        .bind(new.resume.as_ref().map(|r| r.url.as_str()))
        .bind(new.applicant.user)
        .bind(new.applicant.role)
        .bind(new.employer.user)
        .bind(new.employer.role)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn list_for_employer(
        &self,
        employer: Uuid,
    ) -> Result<Vec<EmployerApplication>, AppError> {
        // Joined contact fields stand in for the document-store populate step.
        let rows = sqlx::query_as::<_, EmployerListingRow>(
            r#"
            SELECT a.*,
                   u.name    AS applicant_name,
                   u.email   AS applicant_email,
                   u.phone   AS applicant_phone,
                   u.address AS applicant_address
            FROM applications a
            JOIN users u ON u.id = a.applicant_user_id
            WHERE a.employer_user_id = $1
            "#,
        )
        .bind(employer)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| EmployerApplication {
                application: r.application.into(),
                applicant: ApplicantContact {
                    name: r.applicant_name,
                    email: r.applicant_email,
                    phone: r.applicant_phone,
                    address: r.applicant_address,
                },
            })
            .collect())
    }

    async fn list_for_job_seeker(
        &self,
        applicant: Uuid,
    ) -> Result<Vec<SeekerApplication>, AppError> {
        let rows = sqlx::query_as::<_, SeekerListingRow>(
            r#"
            SELECT a.*,
                   u.name  AS employer_name,
                   u.email AS employer_email
            FROM applications a
            JOIN users u ON u.id = a.employer_user_id
            WHERE a.applicant_user_id = $1
            "#,
        )
        .bind(applicant)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| SeekerApplication {
                application: r.application.into(),
                employer: EmployerContact {
                    name: r.employer_name,
                    email: r.employer_email,
                },
            })
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Application>, AppError> {
        let row = sqlx::query_as::<_, ApplicationRow>("SELECT * FROM applications WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Application::from))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
