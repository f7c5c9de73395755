use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The two mutually exclusive account roles.
/// Wire form is the exact strings `"Job Seeker"` and `"Employer"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role")]
pub enum Role {
    #[serde(rename = "Job Seeker")]
    #[sqlx(rename = "Job Seeker")]
    JobSeeker,
    Employer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::JobSeeker => f.write_str("Job Seeker"),
            Role::Employer => f.write_str("Employer"),
        }
    }
}

/// Account record. Owned by the auth subsystem; read-only here.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_wire_strings_round_trip() {
        let seeker = serde_json::to_string(&Role::JobSeeker).unwrap();
        assert_eq!(seeker, "\"Job Seeker\"");
        assert_eq!(serde_json::from_str::<Role>(&seeker).unwrap(), Role::JobSeeker);

        let employer = serde_json::to_string(&Role::Employer).unwrap();
        assert_eq!(employer, "\"Employer\"");
        assert_eq!(
            serde_json::from_str::<Role>(&employer).unwrap(),
            Role::Employer
        );
    }
}
