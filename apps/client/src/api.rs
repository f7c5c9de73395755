//! HTTP client and wire types. Shapes mirror the server envelope
//! `{success, message?, ...payload}`; any non-2xx response surfaces the
//! server's `message` the way the browser client toasts it.

use chrono::{DateTime, Utc};
use reqwest::{multipart, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    #[error("{0}")]
    Form(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Job Seeker")]
    JobSeeker,
    Employer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
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

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeRef {
    pub public_id: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PartyRef {
    pub user: Uuid,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub cover_letter: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub resume: Option<ResumeRef>,
    #[serde(rename = "applicantID")]
    pub applicant_id: PartyRef,
    #[serde(rename = "employerID")]
    pub employer_id: PartyRef,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicantContact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmployerContact {
    pub name: String,
    pub email: String,
}

/// Listing entry from either applications endpoint. The employer view
/// carries `applicant`, the job-seeker view carries `employer`.
#[derive(Debug, Clone, Deserialize)]
pub struct ListedApplication {
    #[serde(flatten)]
    pub application: Application,
    #[serde(default)]
    pub applicant: Option<ApplicantContact>,
    #[serde(default)]
    pub employer: Option<EmployerContact>,
}

/// Submission form state, as the application page collects it.
#[derive(Debug, Clone, Default)]
pub struct ApplicationForm {
    pub name: String,
    pub email: String,
    pub cover_letter: String,
    pub phone: String,
    pub address: String,
    pub job_id: String,
    pub resume: Option<ResumeFile>,
}

#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PostJobForm {
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

/// Partial update for a posting; unset fields keep their stored value and
/// are left out of the request body entirely.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_salary: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_from: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_to: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expired: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct JobListEnvelope {
    jobs: Vec<Job>,
}

#[derive(Debug, Deserialize)]
struct MyJobsEnvelope {
    #[serde(rename = "myJobs")]
    my_jobs: Vec<Job>,
}

#[derive(Debug, Deserialize)]
struct JobEnvelope {
    job: Job,
}

#[derive(Debug, Deserialize)]
struct ApplicationEnvelope {
    message: String,
    application: Application,
}

#[derive(Debug, Deserialize)]
struct ApplicationListEnvelope {
    applications: Vec<ListedApplication>,
}

#[derive(Debug, Deserialize)]
struct MessageEnvelope {
    message: String,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Session token obtained from the auth service.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.http.request(method, format!("{}{path}", self.base_url));
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn handle<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        #[derive(Deserialize)]
        struct ErrorBody {
            message: Option<String>,
        }
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| "Something went wrong".to_string());
        Err(ClientError::Api { status, message })
    }

    pub async fn health(&self) -> Result<serde_json::Value, ClientError> {
        Self::handle(self.request(Method::GET, "/health").send().await?).await
    }

    pub async fn get_all_jobs(&self) -> Result<Vec<Job>, ClientError> {
        let envelope: JobListEnvelope =
            Self::handle(self.request(Method::GET, "/api/v1/job/getall").send().await?).await?;
        Ok(envelope.jobs)
    }

    pub async fn get_job(&self, id: Uuid) -> Result<Job, ClientError> {
        let envelope: JobEnvelope = Self::handle(
            self.request(Method::GET, &format!("/api/v1/job/{id}"))
                .send()
                .await?,
        )
        .await?;
        Ok(envelope.job)
    }

    pub async fn post_job(&self, form: &PostJobForm) -> Result<Job, ClientError> {
        let envelope: JobEnvelope = Self::handle(
            self.request(Method::POST, "/api/v1/job/post")
                .json(form)
                .send()
                .await?,
        )
        .await?;
        Ok(envelope.job)
    }

    pub async fn my_jobs(&self) -> Result<Vec<Job>, ClientError> {
        let envelope: MyJobsEnvelope = Self::handle(
            self.request(Method::GET, "/api/v1/job/getmyjobs")
                .send()
                .await?,
        )
        .await?;
        Ok(envelope.my_jobs)
    }

    pub async fn update_job(&self, id: Uuid, form: &UpdateJobForm) -> Result<Job, ClientError> {
        let envelope: JobEnvelope = Self::handle(
            self.request(Method::PUT, &format!("/api/v1/job/update/{id}"))
                .json(form)
                .send()
                .await?,
        )
        .await?;
        Ok(envelope.job)
    }

    pub async fn delete_job(&self, id: Uuid) -> Result<String, ClientError> {
        let envelope: MessageEnvelope = Self::handle(
            self.request(Method::DELETE, &format!("/api/v1/job/delete/{id}"))
                .send()
                .await?,
        )
        .await?;
        Ok(envelope.message)
    }

    /// Multipart submission; the `resume` part is attached only when the
    /// form holds a file, mirroring the optional file input.
    pub async fn submit_application(
        &self,
        form: ApplicationForm,
    ) -> Result<(String, Application), ClientError> {
        let mut body = multipart::Form::new()
            .text("name", form.name)
            .text("email", form.email)
            .text("coverLetter", form.cover_letter)
            .text("phone", form.phone)
            .text("address", form.address)
            .text("jobId", form.job_id);

        if let Some(file) = form.resume {
            let part = multipart::Part::bytes(file.bytes)
                .file_name(file.filename)
                .mime_str(&file.content_type)
                .map_err(|e| ClientError::Form(format!("Invalid resume media type: {e}")))?;
            body = body.part("resume", part);
        }

        let envelope: ApplicationEnvelope = Self::handle(
            self.request(Method::POST, "/api/v1/application/post")
                .multipart(body)
                .send()
                .await?,
        )
        .await?;
        Ok((envelope.message, envelope.application))
    }

    /// Role-appropriate applications listing; the caller's role picks the
    /// endpoint, exactly as the applications page does. The two envelopes
    /// differ only in the joined contact field: the employer side fills
    /// `applicant`, the seeker side fills `employer`, and whichever the
    /// payload omits stays `None`.
    pub async fn my_applications(&self, role: Role) -> Result<Vec<ListedApplication>, ClientError> {
        let path = match role {
            Role::Employer => "/api/v1/application/employer/getall",
            Role::JobSeeker => "/api/v1/application/jobseeker/getall",
        };
        let envelope: ApplicationListEnvelope =
            Self::handle(self.request(Method::GET, path).send().await?).await?;
        Ok(envelope.applications)
    }

    pub async fn delete_application(&self, id: Uuid) -> Result<String, ClientError> {
        let envelope: MessageEnvelope = Self::handle(
            self.request(Method::DELETE, &format!("/api/v1/application/delete/{id}"))
                .send()
                .await?,
        )
        .await?;
        Ok(envelope.message)
    }
}
