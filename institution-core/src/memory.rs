//! In-process stand-in for the institution endpoints.
//!
//! Used by `--demo` runs and by tests that need to count requests. It
//! assigns ids and the `ACTIVE` status the way the real backend does, and
//! records every request it answers. Like the backend, an update takes the
//! status from the request body, which never has one, so edited records
//! come back with an empty status.

use crate::api::{
    application_number_path, application_path, applications_by_institution_path,
    applications_by_status_path, applications_by_type_path, code_path, institution_path,
    status_path, transition_path, ApplicationApi, InstitutionApi, APPLICATIONS_PATH,
    INSTITUTIONS_PATH,
};
use crate::application::{
    Application, ApplicationPayload, RejectionRequest, Transition, STATUS_APPROVED, STATUS_DRAFT,
    STATUS_SUBMITTED,
};
use crate::dto::{InstitutionPayload, MedicalInstitution, STATUS_ACTIVE};
use crate::error::ApiError;
use async_trait::async_trait;
use std::cell::{Cell, RefCell};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub path: String,
}

impl RecordedRequest {
    fn new(method: &'static str, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }
}

#[derive(Default)]
pub struct InMemoryApi {
    institutions: RefCell<Vec<MedicalInstitution>>,
    next_id: Cell<i64>,
    applications: RefCell<Vec<Application>>,
    requests: RefCell<Vec<RecordedRequest>>,
    failure: RefCell<Option<ApiError>>,
}

impl InMemoryApi {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(1),
            ..Self::default()
        }
    }

    pub fn with_institutions(institutions: Vec<MedicalInstitution>) -> Self {
        let next = institutions.iter().map(|i| i.id).max().unwrap_or(0) + 1;
        Self {
            institutions: RefCell::new(institutions),
            next_id: Cell::new(next),
            ..Self::default()
        }
    }

    pub fn with_demo_data() -> Self {
        let now = current_timestamp();
        let institutions = [
            ("H001", "Tokyo General Hospital", "Hospital", "1-1 Chiyoda, Tokyo", "Sato Ichiro", "MHLW-H-0001"),
            ("C002", "Aoyama Internal Medicine Clinic", "Clinic", "2-2 Minato, Tokyo", "Suzuki Hanako", "MHLW-C-0002"),
            ("P003", "Ginza Pharmacy", "Pharmacy", "3-3 Chuo, Tokyo", "Takahashi Jiro", "MHLW-P-0003"),
        ]
        .into_iter()
        .zip(1..)
        .map(|((code, name, kind, address, representative, license), id)| MedicalInstitution {
            id,
            institution_code: code.into(),
            institution_name: name.into(),
            institution_type: kind.into(),
            address: address.into(),
            representative_name: representative.into(),
            license_number: license.into(),
            status: STATUS_ACTIVE.into(),
            created_at: Some(now.clone()),
            updated_at: Some(now.clone()),
            version: Some(1),
            ..MedicalInstitution::default()
        })
        .collect();
        let api = Self::with_institutions(institutions);

        let application = |id, number: &str, institution_id, kind: &str, title: &str, status: &str| {
            Application {
                id,
                application_number: number.into(),
                institution_id: Some(institution_id),
                application_type: kind.into(),
                title: title.into(),
                status: status.into(),
                submitted_at: Some(now.clone()),
                created_at: Some(now.clone()),
                updated_at: Some(now.clone()),
                version: Some(2),
                ..Application::default()
            }
        };
        let mut approved = application(2, "APP-87654321", 2, "Renewal application", "License renewal", STATUS_APPROVED);
        approved.approved_at = Some(now.clone());
        approved.version = Some(3);
        *api.applications.borrow_mut() = vec![
            application(1, "APP-12345678", 1, "New practice notification", "Notice of new practice", STATUS_SUBMITTED),
            approved,
        ];
        api
    }

    pub fn applications(&self) -> Vec<Application> {
        self.applications.borrow().clone()
    }

    /// Every subsequent request fails with `error` until cleared.
    pub fn fail_with(&self, error: ApiError) {
        *self.failure.borrow_mut() = Some(error);
    }

    pub fn clear_failure(&self) {
        *self.failure.borrow_mut() = None;
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    pub fn snapshot(&self) -> Vec<MedicalInstitution> {
        self.institutions.borrow().clone()
    }

    fn record(&self, method: &'static str, path: impl Into<String>) -> crate::Result<()> {
        self.requests.borrow_mut().push(RecordedRequest::new(method, path));
        match self.failure.borrow().as_ref() {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn insert(&self, payload: &InstitutionPayload) -> i64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let now = current_timestamp();
        self.institutions.borrow_mut().push(MedicalInstitution {
            id,
            status: STATUS_ACTIVE.into(),
            created_at: Some(now.clone()),
            updated_at: Some(now),
            version: Some(1),
            ..apply(MedicalInstitution::default(), payload)
        });
        id
    }
}

fn apply(mut record: MedicalInstitution, payload: &InstitutionPayload) -> MedicalInstitution {
    record.institution_code = payload.institution_code.clone();
    record.institution_name = payload.institution_name.clone();
    record.institution_type = payload.institution_type.clone();
    record.address = payload.address.clone();
    record.phone = Some(payload.phone.clone()).filter(|p| !p.is_empty());
    record.email = Some(payload.email.clone()).filter(|e| !e.is_empty());
    record.representative_name = payload.representative_name.clone();
    record.license_number = payload.license_number.clone();
    record
}

fn current_timestamp() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let Ok(duration) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return "0".into();
    };
    duration.as_secs().to_string()
}

#[async_trait(?Send)]
impl InstitutionApi for InMemoryApi {
    async fn list(&self) -> crate::Result<Vec<MedicalInstitution>> {
        self.record("GET", INSTITUTIONS_PATH)?;
        Ok(self.snapshot())
    }

    async fn get(&self, id: i64) -> crate::Result<MedicalInstitution> {
        let path = institution_path(id);
        self.record("GET", path.clone())?;
        self.institutions
            .borrow()
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or(ApiError::NotFound(path))
    }

    async fn find_by_code(&self, code: &str) -> crate::Result<MedicalInstitution> {
        let path = code_path(code);
        self.record("GET", path.clone())?;
        self.institutions
            .borrow()
            .iter()
            .find(|i| i.institution_code == code)
            .cloned()
            .ok_or(ApiError::NotFound(path))
    }

    async fn list_by_status(&self, status: &str) -> crate::Result<Vec<MedicalInstitution>> {
        self.record("GET", status_path(status))?;
        Ok(self
            .institutions
            .borrow()
            .iter()
            .filter(|i| i.status == status)
            .cloned()
            .collect())
    }

    async fn create(&self, payload: &InstitutionPayload) -> crate::Result<()> {
        self.record("POST", INSTITUTIONS_PATH)?;
        self.insert(payload);
        Ok(())
    }

    async fn update(&self, id: i64, payload: &InstitutionPayload) -> crate::Result<()> {
        let path = institution_path(id);
        self.record("PUT", path.clone())?;
        let mut institutions = self.institutions.borrow_mut();
        let Some(slot) = institutions.iter_mut().find(|i| i.id == id) else {
            return Err(ApiError::NotFound(path));
        };
        let mut updated = apply(slot.clone(), payload);
        updated.status = String::new();
        updated.updated_at = Some(current_timestamp());
        updated.version = Some(slot.version.unwrap_or(0) + 1);
        *slot = updated;
        Ok(())
    }

    async fn delete(&self, id: i64) -> crate::Result<()> {
        let path = institution_path(id);
        self.record("DELETE", path.clone())?;
        let mut institutions = self.institutions.borrow_mut();
        let before = institutions.len();
        institutions.retain(|i| i.id != id);
        if institutions.len() == before {
            return Err(ApiError::NotFound(path));
        }
        Ok(())
    }
}

impl InMemoryApi {
    fn applications_where(&self, keep: impl Fn(&Application) -> bool) -> Vec<Application> {
        self.applications.borrow().iter().filter(|a| keep(a)).cloned().collect()
    }

    /// Mirrors the backend: an unknown id or a move out of the wrong status
    /// is a 400, not a 404.
    fn advance(
        &self,
        id: i64,
        transition: Transition,
        reason: Option<String>,
    ) -> crate::Result<Application> {
        let path = transition_path(id, transition);
        self.record("POST", path.clone())?;
        let refused = || ApiError::Status {
            method: "POST".into(),
            url: path.clone(),
            status: 400,
        };

        let mut applications = self.applications.borrow_mut();
        let Some(application) = applications.iter_mut().find(|a| a.id == id) else {
            return Err(refused());
        };
        if !transition.allowed_from(&application.status) {
            return Err(refused());
        }

        let now = current_timestamp();
        application.status = transition.target_status().into();
        application.approved_at = None;
        application.rejected_at = None;
        application.rejection_reason = None;
        match transition {
            Transition::Submit => application.submitted_at = Some(now.clone()),
            Transition::Approve => application.approved_at = Some(now.clone()),
            Transition::Reject => {
                application.rejected_at = Some(now.clone());
                application.rejection_reason = reason;
            }
        }
        application.updated_at = Some(now);
        application.version = Some(application.version.unwrap_or(0) + 1);
        Ok(application.clone())
    }
}

#[async_trait(?Send)]
impl ApplicationApi for InMemoryApi {
    async fn list_applications(&self) -> crate::Result<Vec<Application>> {
        self.record("GET", APPLICATIONS_PATH)?;
        Ok(self.applications())
    }

    async fn get_application(&self, id: i64) -> crate::Result<Application> {
        let path = application_path(id);
        self.record("GET", path.clone())?;
        self.applications_where(|a| a.id == id)
            .pop()
            .ok_or(ApiError::NotFound(path))
    }

    async fn find_application_by_number(&self, number: &str) -> crate::Result<Application> {
        let path = application_number_path(number);
        self.record("GET", path.clone())?;
        self.applications_where(|a| a.application_number == number)
            .pop()
            .ok_or(ApiError::NotFound(path))
    }

    async fn list_applications_by_institution(
        &self,
        institution_id: i64,
    ) -> crate::Result<Vec<Application>> {
        self.record("GET", applications_by_institution_path(institution_id))?;
        Ok(self.applications_where(|a| a.institution_id == Some(institution_id)))
    }

    async fn list_applications_by_status(&self, status: &str) -> crate::Result<Vec<Application>> {
        self.record("GET", applications_by_status_path(status))?;
        Ok(self.applications_where(|a| a.status == status))
    }

    async fn list_applications_by_type(
        &self,
        application_type: &str,
    ) -> crate::Result<Vec<Application>> {
        self.record("GET", applications_by_type_path(application_type))?;
        Ok(self.applications_where(|a| a.application_type == application_type))
    }

    async fn create_application(&self, payload: &ApplicationPayload) -> crate::Result<Application> {
        self.record("POST", APPLICATIONS_PATH)?;
        let mut applications = self.applications.borrow_mut();
        let id = applications.iter().map(|a| a.id).max().unwrap_or(0) + 1;
        let now = current_timestamp();
        let created = Application {
            id,
            application_number: format!("APP-{id:08X}"),
            institution_id: Some(payload.institution_id),
            application_type: payload.application_type.clone(),
            title: payload.title.clone(),
            description: payload.description.clone(),
            status: STATUS_DRAFT.into(),
            created_at: Some(now.clone()),
            updated_at: Some(now),
            version: Some(1),
            ..Application::default()
        };
        applications.push(created.clone());
        Ok(created)
    }

    async fn delete_application(&self, id: i64) -> crate::Result<()> {
        let path = application_path(id);
        self.record("DELETE", path.clone())?;
        let mut applications = self.applications.borrow_mut();
        let before = applications.len();
        applications.retain(|a| a.id != id);
        if applications.len() == before {
            return Err(ApiError::NotFound(path));
        }
        Ok(())
    }

    async fn submit_application(&self, id: i64) -> crate::Result<Application> {
        self.advance(id, Transition::Submit, None)
    }

    async fn approve_application(&self, id: i64) -> crate::Result<Application> {
        self.advance(id, Transition::Approve, None)
    }

    async fn reject_application(
        &self,
        id: i64,
        body: &RejectionRequest,
    ) -> crate::Result<Application> {
        self.advance(id, Transition::Reject, Some(body.rejection_reason.clone()))
    }
}
