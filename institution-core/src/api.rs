//! Backend abstraction for the institution and application endpoints

use crate::application::{Application, ApplicationPayload, RejectionRequest, Transition};
use crate::dto::{InstitutionPayload, MedicalInstitution};
use async_trait::async_trait;

/// Collection path for medical institutions.
pub const INSTITUTIONS_PATH: &str = "/api/medical-institutions";

/// Prompt shown before a delete is sent.
pub const DELETE_PROMPT: &str = "Delete this medical institution?";

pub fn institution_path(id: i64) -> String {
    format!("{INSTITUTIONS_PATH}/{id}")
}

pub fn code_path(code: &str) -> String {
    format!("{INSTITUTIONS_PATH}/code/{}", urlencoding::encode(code))
}

pub fn status_path(status: &str) -> String {
    format!("{INSTITUTIONS_PATH}/status/{}", urlencoding::encode(status))
}

pub const APPLICATIONS_PATH: &str = "/api/applications";

pub const APPLICATION_DELETE_PROMPT: &str = "Delete this application?";

pub fn application_path(id: i64) -> String {
    format!("{APPLICATIONS_PATH}/{id}")
}

pub fn application_number_path(number: &str) -> String {
    format!("{APPLICATIONS_PATH}/number/{}", urlencoding::encode(number))
}

pub fn applications_by_institution_path(institution_id: i64) -> String {
    format!("{APPLICATIONS_PATH}/institution/{institution_id}")
}

pub fn applications_by_status_path(status: &str) -> String {
    format!("{APPLICATIONS_PATH}/status/{}", urlencoding::encode(status))
}

pub fn applications_by_type_path(application_type: &str) -> String {
    format!("{APPLICATIONS_PATH}/type/{}", urlencoding::encode(application_type))
}

pub fn transition_path(id: i64, transition: Transition) -> String {
    format!("{APPLICATIONS_PATH}/{id}/{}", transition.name())
}

/// The REST surface the front ends consume.
///
/// Futures are not `Send`: the browser implementation awaits JS promises.
/// Mutations ignore the response body; only the status matters.
#[async_trait(?Send)]
#[cfg_attr(test, mockall::automock)]
pub trait InstitutionApi {
    /// `GET /api/medical-institutions`
    async fn list(&self) -> crate::Result<Vec<MedicalInstitution>>;

    /// `GET /api/medical-institutions/{id}`
    async fn get(&self, id: i64) -> crate::Result<MedicalInstitution>;

    /// `GET /api/medical-institutions/code/{code}`
    async fn find_by_code(&self, code: &str) -> crate::Result<MedicalInstitution>;

    /// `GET /api/medical-institutions/status/{status}`
    async fn list_by_status(&self, status: &str) -> crate::Result<Vec<MedicalInstitution>>;

    /// `POST /api/medical-institutions`
    async fn create(&self, payload: &InstitutionPayload) -> crate::Result<()>;

    /// `PUT /api/medical-institutions/{id}`
    async fn update(&self, id: i64, payload: &InstitutionPayload) -> crate::Result<()>;

    /// `DELETE /api/medical-institutions/{id}`
    async fn delete(&self, id: i64) -> crate::Result<()>;
}

/// The application endpoints. Unlike the institution mutations, every
/// write answers with the stored record.
#[async_trait(?Send)]
#[cfg_attr(test, mockall::automock)]
pub trait ApplicationApi {
    /// `GET /api/applications`
    async fn list_applications(&self) -> crate::Result<Vec<Application>>;

    /// `GET /api/applications/{id}`
    async fn get_application(&self, id: i64) -> crate::Result<Application>;

    /// `GET /api/applications/number/{number}`
    async fn find_application_by_number(&self, number: &str) -> crate::Result<Application>;

    /// `GET /api/applications/institution/{institution_id}`
    async fn list_applications_by_institution(
        &self,
        institution_id: i64,
    ) -> crate::Result<Vec<Application>>;

    /// `GET /api/applications/status/{status}`
    async fn list_applications_by_status(&self, status: &str) -> crate::Result<Vec<Application>>;

    /// `GET /api/applications/type/{application_type}`
    async fn list_applications_by_type(
        &self,
        application_type: &str,
    ) -> crate::Result<Vec<Application>>;

    /// `POST /api/applications`
    async fn create_application(&self, payload: &ApplicationPayload) -> crate::Result<Application>;

    /// `DELETE /api/applications/{id}`
    async fn delete_application(&self, id: i64) -> crate::Result<()>;

    /// `POST /api/applications/{id}/submit`
    async fn submit_application(&self, id: i64) -> crate::Result<Application>;

    /// `POST /api/applications/{id}/approve`
    async fn approve_application(&self, id: i64) -> crate::Result<Application>;

    /// `POST /api/applications/{id}/reject`
    async fn reject_application(
        &self,
        id: i64,
        body: &RejectionRequest,
    ) -> crate::Result<Application>;
}

/// Blocking yes/no prompt asked before destructive actions.
#[cfg_attr(test, mockall::automock)]
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

/// Answers yes without asking.
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _message: &str) -> bool {
        true
    }
}
