//! Role-aware view composition: which routes a session may reach, which
//! card variant renders an applications list entry, and the in-memory list
//! state the pages keep for the current session.

use uuid::Uuid;

use crate::api::{Application, ListedApplication, Role};

/// Minimal session state the navigation layer cares about.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub user: Option<SessionUser>,
}

#[derive(Debug, Clone)]
pub struct SessionUser {
    pub id: Uuid,
    pub name: String,
    pub role: Role,
}

impl Session {
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn for_user(id: Uuid, name: impl Into<String>, role: Role) -> Self {
        Self {
            user: Some(SessionUser {
                id,
                name: name.into(),
                role,
            }),
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }
}

/// Navigable routes of the single-page client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Jobs,
    JobDetail(Uuid),
    Apply(Uuid),
    MyApplications,
    PostJob,
    MyJobs,
}

/// Navigation decision for a route under a given session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    Allow,
    RedirectToLogin,
    RedirectHome,
}

/// Route gating: unauthenticated callers only reach Home and Login;
/// employer pages bounce job seekers home, and the application form is
/// job-seeker-only.
pub fn guard(route: Route, session: &Session) -> Guard {
    let Some(user) = &session.user else {
        return match route {
            Route::Home | Route::Login => Guard::Allow,
            _ => Guard::RedirectToLogin,
        };
    };

    match route {
        Route::PostJob | Route::MyJobs if user.role != Role::Employer => Guard::RedirectHome,
        Route::Apply(_) if user.role != Role::JobSeeker => Guard::RedirectHome,
        _ => Guard::Allow,
    }
}

/// The Apply button on a job detail page renders only for job seekers.
pub fn can_apply(role: Role) -> bool {
    role == Role::JobSeeker
}

/// The two presentational variants for one applications-list entry.
#[derive(Debug, Clone)]
pub enum ApplicationCard {
    /// Job seeker's own submission: shows a delete action.
    Seeker { entry: ListedApplication },
    /// Employer's received application: shows the resume viewer when a
    /// resume was attached.
    Employer {
        entry: ListedApplication,
        resume_url: Option<String>,
    },
}

impl ApplicationCard {
    pub fn application(&self) -> &Application {
        match self {
            ApplicationCard::Seeker { entry } => &entry.application,
            ApplicationCard::Employer { entry, .. } => &entry.application,
        }
    }
}

/// Picks the card variant per entry from the same listing payload, keyed on
/// the viewer's role.
pub fn compose_cards(role: Role, entries: Vec<ListedApplication>) -> Vec<ApplicationCard> {
    entries
        .into_iter()
        .map(|entry| match role {
            Role::JobSeeker => ApplicationCard::Seeker { entry },
            Role::Employer => {
                let resume_url = entry.application.resume.as_ref().map(|r| r.url.clone());
                ApplicationCard::Employer { entry, resume_url }
            }
        })
        .collect()
}

/// In-memory list state for the applications page. Held only for the
/// current session; a successful submit appends the created record rather
/// than refetching.
#[derive(Debug, Default)]
pub struct ApplicationsView {
    pub entries: Vec<ListedApplication>,
}

impl ApplicationsView {
    pub fn loaded(entries: Vec<ListedApplication>) -> Self {
        Self { entries }
    }

    pub fn record_submitted(&mut self, application: Application) {
        self.entries.push(ListedApplication {
            application,
            applicant: None,
            employer: None,
        });
    }

    pub fn record_deleted(&mut self, id: Uuid) {
        self.entries.retain(|e| e.application.id != id);
    }

    pub fn cards(&self, role: Role) -> Vec<ApplicationCard> {
        compose_cards(role, self.entries.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{PartyRef, ResumeRef};
    use chrono::Utc;

    fn application(resume: Option<ResumeRef>) -> Application {
        Application {
            id: Uuid::new_v4(),
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            cover_letter: "...".to_string(),
            phone: "123".to_string(),
            address: "addr".to_string(),
            resume,
            applicant_id: PartyRef {
                user: Uuid::new_v4(),
                role: Role::JobSeeker,
            },
            employer_id: PartyRef {
                user: Uuid::new_v4(),
                role: Role::Employer,
            },
            created_at: Utc::now(),
        }
    }

    fn entry(resume: Option<ResumeRef>) -> ListedApplication {
        ListedApplication {
            application: application(resume),
            applicant: None,
            employer: None,
        }
    }

    #[test]
    fn anonymous_sessions_bounce_to_login() {
        let session = Session::anonymous();
        assert_eq!(guard(Route::Home, &session), Guard::Allow);
        assert_eq!(guard(Route::Login, &session), Guard::Allow);
        assert_eq!(guard(Route::Jobs, &session), Guard::RedirectToLogin);
        assert_eq!(
            guard(Route::MyApplications, &session),
            Guard::RedirectToLogin
        );
    }

    #[test]
    fn employer_routes_bounce_job_seekers_home() {
        let seeker = Session::for_user(Uuid::new_v4(), "A", Role::JobSeeker);
        assert_eq!(guard(Route::PostJob, &seeker), Guard::RedirectHome);
        assert_eq!(guard(Route::MyJobs, &seeker), Guard::RedirectHome);
        assert_eq!(guard(Route::MyApplications, &seeker), Guard::Allow);

        let employer = Session::for_user(Uuid::new_v4(), "E", Role::Employer);
        assert_eq!(guard(Route::PostJob, &employer), Guard::Allow);
        assert_eq!(
            guard(Route::Apply(Uuid::new_v4()), &employer),
            Guard::RedirectHome
        );
    }

    #[test]
    fn apply_button_is_seeker_only() {
        assert!(can_apply(Role::JobSeeker));
        assert!(!can_apply(Role::Employer));
    }

    #[test]
    fn card_variant_follows_viewer_role() {
        let with_resume = entry(Some(ResumeRef {
            public_id: "resumes/x/cv.pdf".to_string(),
            url: "http://s/cv.pdf".to_string(),
        }));
        let without = entry(None);

        let cards = compose_cards(Role::JobSeeker, vec![with_resume.clone()]);
        assert!(matches!(cards[0], ApplicationCard::Seeker { .. }));

        let cards = compose_cards(Role::Employer, vec![with_resume, without]);
        match &cards[0] {
            ApplicationCard::Employer { resume_url, .. } => {
                assert_eq!(resume_url.as_deref(), Some("http://s/cv.pdf"));
            }
            other => panic!("unexpected card {other:?}"),
        }
        match &cards[1] {
            ApplicationCard::Employer { resume_url, .. } => assert!(resume_url.is_none()),
            other => panic!("unexpected card {other:?}"),
        }
    }

    #[test]
    fn submit_appends_and_delete_removes_locally() {
        let mut view = ApplicationsView::loaded(vec![entry(None)]);
        let created = application(None);
        let created_id = created.id;

        view.record_submitted(created);
        assert_eq!(view.entries.len(), 2);
        assert_eq!(view.cards(Role::JobSeeker).len(), 2);

        view.record_deleted(created_id);
        assert_eq!(view.entries.len(), 1);
        assert!(view
            .entries
            .iter()
            .all(|e| e.application.id != created_id));
    }
}
