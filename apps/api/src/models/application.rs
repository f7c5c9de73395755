use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::user::Role;

/// The `{identifier, URL}` pair returned by the object store after a
/// successful resume upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeRef {
    pub public_id: String,
    pub url: String,
}

/// A user reference with its role tag. The tag is a denormalized copy fixed
/// at creation time, never re-derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyRef {
    pub user: Uuid,
    pub role: Role,
}

/// Database row for an application. Parties and the resume reference are
/// stored flat; `Application` is the nested wire shape.
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub cover_letter: String,
    pub phone: String,
    pub address: String,
    pub resume_public_id: Option<String>,
    pub resume_url: Option<String>,
    pub applicant_user_id: Uuid,
    pub applicant_role: Role,
    pub employer_user_id: Uuid,
    pub employer_role: Role,
    pub created_at: DateTime<Utc>,
}

/// Wire shape of an application record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub cover_letter: String,
    pub phone: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume: Option<ResumeRef>,
    #[serde(rename = "applicantID")]
    pub applicant_id: PartyRef,
    #[serde(rename = "employerID")]
    pub employer_id: PartyRef,
    pub created_at: DateTime<Utc>,
}

impl From<ApplicationRow> for Application {
    fn from(row: ApplicationRow) -> Self {
        let resume = match (row.resume_public_id, row.resume_url) {
            (Some(public_id), Some(url)) => Some(ResumeRef { public_id, url }),
            _ => None,
        };
        Application {
            id: row.id,
            name: row.name,
            email: row.email,
            cover_letter: row.cover_letter,
            phone: row.phone,
            address: row.address,
            resume,
            applicant_id: PartyRef {
                user: row.applicant_user_id,
                role: row.applicant_role,
            },
            employer_id: PartyRef {
                user: row.employer_user_id,
                role: row.employer_role,
            },
            created_at: row.created_at,
        }
    }
}

/// Applicant contact details joined into the employer-side listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicantContact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Employer name/email joined into the job-seeker-side listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployerContact {
    pub name: String,
    pub email: String,
}

/// Employer listing entry: the application plus who applied.
#[derive(Debug, Clone, Serialize)]
pub struct EmployerApplication {
    #[serde(flatten)]
    pub application: Application,
    pub applicant: ApplicantContact,
}

/// Job-seeker listing entry: the application plus who it went to.
#[derive(Debug, Clone, Serialize)]
pub struct SeekerApplication {
    #[serde(flatten)]
    pub application: Application,
    pub employer: EmployerContact,
}
