//! Applications filed by institutions and their review workflow
//!
//! An application starts as `DRAFT`, is submitted for review, and is then
//! approved or rejected. The backend refuses any other move with a 400.

use crate::api::ApplicationApi;
use crate::dto::null_as_empty;
use serde::{Deserialize, Serialize};

pub const STATUS_DRAFT: &str = "DRAFT";
pub const STATUS_SUBMITTED: &str = "SUBMITTED";
pub const STATUS_APPROVED: &str = "APPROVED";
pub const STATUS_REJECTED: &str = "REJECTED";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: i64,
    /// Backend-generated, `APP-` followed by eight hex digits.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub application_number: String,
    #[serde(default)]
    pub institution_id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub application_type: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejected_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
}

/// Body of `POST /api/applications`. Number, status and timestamps are
/// assigned by the backend.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPayload {
    pub institution_id: i64,
    pub application_type: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of `POST /api/applications/{id}/reject`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectionRequest {
    pub rejection_reason: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Submit,
    Approve,
    Reject,
}

impl Transition {
    /// Last path segment of the transition endpoint.
    pub fn name(self) -> &'static str {
        match self {
            Transition::Submit => "submit",
            Transition::Approve => "approve",
            Transition::Reject => "reject",
        }
    }

    pub fn required_status(self) -> &'static str {
        match self {
            Transition::Submit => STATUS_DRAFT,
            Transition::Approve | Transition::Reject => STATUS_SUBMITTED,
        }
    }

    pub fn target_status(self) -> &'static str {
        match self {
            Transition::Submit => STATUS_SUBMITTED,
            Transition::Approve => STATUS_APPROVED,
            Transition::Reject => STATUS_REJECTED,
        }
    }

    pub fn allowed_from(self, status: &str) -> bool {
        status == self.required_status()
    }
}

/// Which listing endpoint to ask. The backend filters on one key at a time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ApplicationFilter {
    #[default]
    All,
    Status(String),
    Type(String),
    Institution(i64),
}

pub async fn list_applications<A>(
    api: &A,
    filter: &ApplicationFilter,
) -> crate::Result<Vec<Application>>
where
    A: ApplicationApi + ?Sized,
{
    let result = match filter {
        ApplicationFilter::All => api.list_applications().await,
        ApplicationFilter::Status(status) => api.list_applications_by_status(status).await,
        ApplicationFilter::Type(kind) => api.list_applications_by_type(kind).await,
        ApplicationFilter::Institution(id) => api.list_applications_by_institution(*id).await,
    };
    match &result {
        Ok(applications) => tracing::debug!("Loaded {} applications ({:?})", applications.len(), filter),
        Err(e) => tracing::error!("Error fetching applications: {}", e),
    }
    result
}

/// Runs one workflow step. A rejection needs a reason; the other steps
/// ignore it.
pub async fn advance<A>(
    api: &A,
    id: i64,
    transition: Transition,
    reason: &str,
) -> crate::Result<Application>
where
    A: ApplicationApi + ?Sized,
{
    let result = match transition {
        Transition::Submit => api.submit_application(id).await,
        Transition::Approve => api.approve_application(id).await,
        Transition::Reject => {
            let body = RejectionRequest {
                rejection_reason: reason.to_string(),
            };
            api.reject_application(id, &body).await
        }
    };
    match &result {
        Ok(application) => tracing::info!(
            "Application {} is now {}",
            application.application_number,
            application.status
        ),
        Err(e) => tracing::error!("Error running {} on application {}: {}", transition.name(), id, e),
    }
    result
}
