//! Typed client for the Career Cave API, plus the role-aware view
//! composition the browser front end performs: endpoint selection, route
//! guards, and card-variant rendering decisions. No markup lives here.

pub mod api;
pub mod views;

pub use api::{ApiClient, ClientError};
