//! The application-submission and role-scoped retrieval workflow, written
//! against the repository and storage traits.

use tracing::info;
use uuid::Uuid;

use crate::applications::repo::{ApplicationRepo, NewApplication};
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::application::{
    Application, EmployerApplication, PartyRef, SeekerApplication,
};
use crate::models::user::Role;
use crate::storage::{ResumeStore, ResumeUpload};

/// Media types accepted for a resume attachment. Checked before any upload
/// is attempted.
pub const ALLOWED_RESUME_TYPES: &[&str] = &[
    "application/pdf",
    "image/png",
    "image/jpeg",
    "image/webp",
];

/// Submission form as collected from the multipart body. Presence of each
/// field is enforced here, not at parse time.
#[derive(Debug, Default)]
pub struct SubmitApplication {
    pub name: Option<String>,
    pub email: Option<String>,
    pub cover_letter: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub job_id: Option<String>,
    pub resume: Option<ResumeUpload>,
}

/// Submits a new application on behalf of `caller`.
///
/// The employer party is derived from the referenced job's poster, never
/// taken from the request. Resubmission is not guarded: applying twice to
/// the same job creates two records.
pub async fn submit_application(
    repo: &dyn ApplicationRepo,
    store: &dyn ResumeStore,
    caller: &AuthUser,
    input: SubmitApplication,
) -> Result<Application, AppError> {
    if caller.role == Role::Employer {
        return Err(AppError::RoleForbidden(Role::Employer));
    }

    // A missing, empty, or malformed job id reads the same as an unknown one.
    let job_id = input
        .job_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| AppError::NotFound("Job not found!".to_string()))?;

    let job = repo
        .find_job_by_id(job_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found!".to_string()))?;

    let employer = PartyRef {
        user: job.posted_by,
        role: Role::Employer,
    };

    let (Some(name), Some(email), Some(cover_letter), Some(phone), Some(address)) = (
        required(input.name),
        required(input.email),
        required(input.cover_letter),
        required(input.phone),
        required(input.address),
    ) else {
        return Err(AppError::Validation("Please fill all fields.".to_string()));
    };

    let mut resume = None;
    if let Some(file) = &input.resume {
        if !ALLOWED_RESUME_TYPES.contains(&file.content_type.as_str()) {
            return Err(AppError::Validation(
                "Invalid file type. Please upload a PNG, JPEG, or PDF file.".to_string(),
            ));
        }
        resume = Some(store.upload(file).await?);
    }

    let created = repo
        .create_application(NewApplication {
            name,
            email,
            cover_letter,
            phone,
            address,
            resume,
            applicant: PartyRef {
                user: caller.user_id,
                role: Role::JobSeeker,
            },
            employer,
        })
        .await?;

    info!(
        "Application {} submitted by {} for job {job_id}",
        created.id, caller.user_id
    );
    Ok(created)
}

/// All applications addressed to the calling employer, with applicant
/// contact details joined in. Unbounded, natural storage order.
pub async fn applications_for_employer(
    repo: &dyn ApplicationRepo,
    caller: &AuthUser,
) -> Result<Vec<EmployerApplication>, AppError> {
    if caller.role == Role::JobSeeker {
        return Err(AppError::RoleForbidden(Role::JobSeeker));
    }
    repo.list_for_employer(caller.user_id).await
}

/// All applications submitted by the calling job seeker, with employer
/// name/email joined in.
pub async fn applications_for_job_seeker(
    repo: &dyn ApplicationRepo,
    caller: &AuthUser,
) -> Result<Vec<SeekerApplication>, AppError> {
    if caller.role == Role::Employer {
        return Err(AppError::RoleForbidden(Role::Employer));
    }
    repo.list_for_job_seeker(caller.user_id).await
}

/// Deletes an application by id. No ownership check: any non-Employer
/// caller holding a valid id may delete it.
pub async fn delete_application(
    repo: &dyn ApplicationRepo,
    caller: &AuthUser,
    id: Uuid,
) -> Result<(), AppError> {
    if caller.role == Role::Employer {
        return Err(AppError::RoleForbidden(Role::Employer));
    }

    repo.find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Application not found!".to_string()))?;

    repo.delete_by_id(id).await?;
    info!("Application {id} deleted by {}", caller.user_id);
    Ok(())
}

fn required(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use bytes::Bytes;
    use chrono::Utc;

    use crate::models::application::{ApplicantContact, EmployerContact, ResumeRef};
    use crate::models::job::JobRow;

    struct InMemoryRepo {
        jobs: Vec<JobRow>,
        applications: Mutex<Vec<Application>>,
    }

    impl InMemoryRepo {
        fn with_jobs(jobs: Vec<JobRow>) -> Self {
            Self {
                jobs,
                applications: Mutex::new(Vec::new()),
            }
        }

        fn stored(&self) -> Vec<Application> {
            self.applications.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ApplicationRepo for InMemoryRepo {
        async fn find_job_by_id(&self, job_id: Uuid) -> Result<Option<JobRow>, AppError> {
            Ok(self.jobs.iter().find(|j| j.id == job_id).cloned())
        }

        async fn create_application(
            &self,
            new: NewApplication,
        ) -> Result<Application, AppError> {
            let app = Application {
                id: Uuid::new_v4(),
                name: new.name,
                email: new.email,
                cover_letter: new.cover_letter,
                phone: new.phone,
                address: new.address,
                resume: new.resume,
                applicant_id: new.applicant,
                employer_id: new.employer,
                created_at: Utc::now(),
            };
            self.applications.lock().unwrap().push(app.clone());
            Ok(app)
        }

        async fn list_for_employer(
            &self,
            employer: Uuid,
        ) -> Result<Vec<EmployerApplication>, AppError> {
            Ok(self
                .stored()
                .into_iter()
                .filter(|a| a.employer_id.user == employer)
                .map(|application| EmployerApplication {
                    applicant: ApplicantContact {
                        name: application.name.clone(),
                        email: application.email.clone(),
                        phone: application.phone.clone(),
                        address: application.address.clone(),
                    },
                    application,
                })
                .collect())
        }

        async fn list_for_job_seeker(
            &self,
            applicant: Uuid,
        ) -> Result<Vec<SeekerApplication>, AppError> {
            Ok(self
                .stored()
                .into_iter()
                .filter(|a| a.applicant_id.user == applicant)
                .map(|application| SeekerApplication {
                    employer: EmployerContact {
                        name: "Acme".to_string(),
                        email: "hr@acme.test".to_string(),
                    },
                    application,
                })
                .collect())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Application>, AppError> {
            Ok(self.stored().into_iter().find(|a| a.id == id))
        }

        async fn delete_by_id(&self, id: Uuid) -> Result<(), AppError> {
            self.applications.lock().unwrap().retain(|a| a.id != id);
            Ok(())
        }
    }

    struct FakeStore {
        calls: AtomicUsize,
        fail: bool,
    }

    impl FakeStore {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: true,
            }
        }

        fn upload_attempts(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ResumeStore for FakeStore {
        async fn upload(&self, file: &ResumeUpload) -> Result<ResumeRef, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AppError::Upload("object store unreachable".to_string()));
            }
            Ok(ResumeRef {
                public_id: format!("resumes/test/{}", file.filename),
                url: format!("http://store.test/resumes/test/{}", file.filename),
            })
        }
    }

    fn job(posted_by: Uuid) -> JobRow {
        JobRow {
            id: Uuid::new_v4(),
            title: "Backend Engineer".to_string(),
            description: "Build the backend".to_string(),
            category: "Engineering".to_string(),
            country: "US".to_string(),
            city: "Denver".to_string(),
            location: "Remote".to_string(),
            fixed_salary: Some(120_000),
            salary_from: None,
            salary_to: None,
            expired: false,
            posted_by,
            posted_on: Utc::now(),
        }
    }

    fn seeker() -> AuthUser {
        AuthUser {
            user_id: Uuid::new_v4(),
            role: Role::JobSeeker,
        }
    }

    fn employer() -> AuthUser {
        AuthUser {
            user_id: Uuid::new_v4(),
            role: Role::Employer,
        }
    }

    fn filled_form(job_id: Uuid) -> SubmitApplication {
        SubmitApplication {
            name: Some("A".to_string()),
            email: Some("a@x.com".to_string()),
            cover_letter: Some("...".to_string()),
            phone: Some("123".to_string()),
            address: Some("addr".to_string()),
            job_id: Some(job_id.to_string()),
            resume: None,
        }
    }

    fn pdf_attachment() -> ResumeUpload {
        ResumeUpload {
            filename: "cv.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            bytes: Bytes::from_static(b"%PDF-1.4"),
        }
    }

    #[tokio::test]
    async fn employer_cannot_submit() {
        let poster = Uuid::new_v4();
        let the_job = job(poster);
        let repo = InMemoryRepo::with_jobs(vec![the_job.clone()]);
        let store = FakeStore::new();

        let err = submit_application(&repo, &store, &employer(), filled_form(the_job.id))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::RoleForbidden(Role::Employer)));
        assert!(repo.stored().is_empty());
    }

    #[tokio::test]
    async fn missing_job_id_reads_as_job_not_found() {
        let repo = InMemoryRepo::with_jobs(vec![]);
        let store = FakeStore::new();

        let mut form = filled_form(Uuid::new_v4());
        form.job_id = None;

        let err = submit_application(&repo, &store, &seeker(), form)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "Job not found!"));
    }

    #[tokio::test]
    async fn unknown_job_id_is_not_found() {
        let repo = InMemoryRepo::with_jobs(vec![]);
        let store = FakeStore::new();

        let err = submit_application(&repo, &store, &seeker(), filled_form(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(repo.stored().is_empty());
    }

    #[tokio::test]
    async fn any_missing_field_creates_no_record() {
        let the_job = job(Uuid::new_v4());
        let repo = InMemoryRepo::with_jobs(vec![the_job.clone()]);
        let store = FakeStore::new();

        for blank in ["name", "email", "coverLetter", "phone", "address"] {
            let mut form = filled_form(the_job.id);
            match blank {
                "name" => form.name = None,
                "email" => form.email = Some("   ".to_string()),
                "coverLetter" => form.cover_letter = None,
                "phone" => form.phone = Some(String::new()),
                "address" => form.address = None,
                _ => unreachable!(),
            }

            let err = submit_application(&repo, &store, &seeker(), form)
                .await
                .unwrap_err();
            assert!(
                matches!(&err, AppError::Validation(msg) if msg == "Please fill all fields."),
                "field {blank}: unexpected error {err:?}"
            );
        }
        assert!(repo.stored().is_empty());
    }

    #[tokio::test]
    async fn disallowed_media_type_rejected_before_upload() {
        let the_job = job(Uuid::new_v4());
        let repo = InMemoryRepo::with_jobs(vec![the_job.clone()]);
        let store = FakeStore::new();

        let mut form = filled_form(the_job.id);
        form.resume = Some(ResumeUpload {
            filename: "virus.exe".to_string(),
            content_type: "application/x-msdownload".to_string(),
            bytes: Bytes::from_static(b"MZ"),
        });

        let err = submit_application(&repo, &store, &seeker(), form)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.upload_attempts(), 0);
        assert!(repo.stored().is_empty());
    }

    #[tokio::test]
    async fn submission_without_file_has_no_resume_reference() {
        let poster = Uuid::new_v4();
        let the_job = job(poster);
        let repo = InMemoryRepo::with_jobs(vec![the_job.clone()]);
        let store = FakeStore::new();
        let caller = seeker();

        let created = submit_application(&repo, &store, &caller, filled_form(the_job.id))
            .await
            .unwrap();

        assert!(created.resume.is_none());
        assert_eq!(created.applicant_id.user, caller.user_id);
        assert_eq!(created.applicant_id.role, Role::JobSeeker);
        // Employer party comes from the job's poster, not the request.
        assert_eq!(created.employer_id.user, poster);
        assert_eq!(created.employer_id.role, Role::Employer);
        assert_eq!(store.upload_attempts(), 0);
    }

    #[tokio::test]
    async fn successful_upload_attaches_reference() {
        let the_job = job(Uuid::new_v4());
        let repo = InMemoryRepo::with_jobs(vec![the_job.clone()]);
        let store = FakeStore::new();

        let mut form = filled_form(the_job.id);
        form.resume = Some(pdf_attachment());

        let created = submit_application(&repo, &store, &seeker(), form)
            .await
            .unwrap();

        let resume = created.resume.expect("resume reference");
        assert_eq!(resume.public_id, "resumes/test/cv.pdf");
        assert_eq!(store.upload_attempts(), 1);
    }

    #[tokio::test]
    async fn upload_failure_creates_no_record() {
        let the_job = job(Uuid::new_v4());
        let repo = InMemoryRepo::with_jobs(vec![the_job.clone()]);
        let store = FakeStore::failing();

        let mut form = filled_form(the_job.id);
        form.resume = Some(pdf_attachment());

        let err = submit_application(&repo, &store, &seeker(), form)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Upload(_)));
        assert!(repo.stored().is_empty());
    }

    #[tokio::test]
    async fn resubmission_creates_a_second_record() {
        let the_job = job(Uuid::new_v4());
        let repo = InMemoryRepo::with_jobs(vec![the_job.clone()]);
        let store = FakeStore::new();
        let caller = seeker();

        submit_application(&repo, &store, &caller, filled_form(the_job.id))
            .await
            .unwrap();
        submit_application(&repo, &store, &caller, filled_form(the_job.id))
            .await
            .unwrap();

        assert_eq!(repo.stored().len(), 2);
    }

    #[tokio::test]
    async fn employer_listing_is_scoped_to_caller() {
        let job_a = job(Uuid::new_v4());
        let job_b = job(Uuid::new_v4());
        let repo = InMemoryRepo::with_jobs(vec![job_a.clone(), job_b.clone()]);
        let store = FakeStore::new();

        submit_application(&repo, &store, &seeker(), filled_form(job_a.id))
            .await
            .unwrap();
        submit_application(&repo, &store, &seeker(), filled_form(job_b.id))
            .await
            .unwrap();

        let caller = AuthUser {
            user_id: job_a.posted_by,
            role: Role::Employer,
        };
        let listed = applications_for_employer(&repo, &caller).await.unwrap();

        assert_eq!(listed.len(), 1);
        assert!(listed
            .iter()
            .all(|a| a.application.employer_id.user == caller.user_id));
    }

    #[tokio::test]
    async fn listing_role_gates() {
        let repo = InMemoryRepo::with_jobs(vec![]);

        let err = applications_for_employer(&repo, &seeker())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::RoleForbidden(Role::JobSeeker)));

        let err = applications_for_job_seeker(&repo, &employer())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::RoleForbidden(Role::Employer)));
    }

    #[tokio::test]
    async fn delete_unknown_application_is_not_found() {
        let repo = InMemoryRepo::with_jobs(vec![]);

        let err = delete_application(&repo, &seeker(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "Application not found!"));
    }

    #[tokio::test]
    async fn delete_removes_record_from_listings() {
        let the_job = job(Uuid::new_v4());
        let repo = InMemoryRepo::with_jobs(vec![the_job.clone()]);
        let store = FakeStore::new();
        let caller = seeker();

        let created = submit_application(&repo, &store, &caller, filled_form(the_job.id))
            .await
            .unwrap();

        delete_application(&repo, &caller, created.id).await.unwrap();

        let mine = applications_for_job_seeker(&repo, &caller).await.unwrap();
        assert!(mine.iter().all(|a| a.application.id != created.id));

        let theirs = applications_for_employer(
            &repo,
            &AuthUser {
                user_id: the_job.posted_by,
                role: Role::Employer,
            },
        )
        .await
        .unwrap();
        assert!(theirs.is_empty());
    }

    #[tokio::test]
    async fn employer_cannot_delete() {
        let repo = InMemoryRepo::with_jobs(vec![]);

        let err = delete_application(&repo, &employer(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::RoleForbidden(Role::Employer)));
    }

    #[tokio::test]
    async fn another_seeker_may_delete_with_a_valid_id() {
        // Observed contract: deletion checks role, not ownership.
        let the_job = job(Uuid::new_v4());
        let repo = InMemoryRepo::with_jobs(vec![the_job.clone()]);
        let store = FakeStore::new();

        let created = submit_application(&repo, &store, &seeker(), filled_form(the_job.id))
            .await
            .unwrap();

        delete_application(&repo, &seeker(), created.id)
            .await
            .unwrap();
        assert!(repo.stored().is_empty());
    }
}
